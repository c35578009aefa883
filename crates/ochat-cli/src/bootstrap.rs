//! CLI bootstrap, the composition root.
//!
//! The only place where the supervisor, client and favourites store are
//! constructed. Handlers receive the composed [`CliContext`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use ochat_client::{ClientConfig, HttpHealthProbe, InferenceClient};
use ochat_core::{FavouritesStore, ServerProbe, favourites_path_in};
use ochat_runtime::{ProcessSupervisor, ServerOrigin, SupervisorConfig};
use tracing::{debug, info};

use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Server executable override; `ollama` on `PATH` otherwise.
    pub server_bin: Option<PathBuf>,
    /// Data directory override for the favourites file.
    pub data_dir: Option<PathBuf>,
    pub client: ClientConfig,
    /// How long a freshly spawned server may take to answer.
    pub ready_timeout: Duration,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            server_bin: cli.server_bin.clone(),
            data_dir: cli.data_dir.clone(),
            client: ClientConfig::default(),
            ready_timeout: Duration::from_secs(15),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    client: InferenceClient,
    supervisor: ProcessSupervisor,
    favourites: FavouritesStore,
    ready_timeout: Duration,
}

impl CliContext {
    pub const fn client(&self) -> &InferenceClient {
        &self.client
    }

    pub const fn supervisor(&self) -> &ProcessSupervisor {
        &self.supervisor
    }

    pub const fn favourites(&self) -> &FavouritesStore {
        &self.favourites
    }

    /// Make sure a server is answering, spawning one if needed.
    ///
    /// A freshly spawned server is polled until it answers so the first
    /// request does not race its startup.
    pub async fn ensure_server(&self) -> Result<ServerOrigin> {
        let origin = self.supervisor.ensure_running().await.map_err(|e| {
            if e.is_missing_program() {
                anyhow!(
                    "{e}\n\nInstall Ollama from https://ollama.com or point \
                     OCHAT_SERVER_BIN (--server-bin) at the server executable."
                )
            } else {
                anyhow::Error::new(e)
            }
        })?;

        if let ServerOrigin::Spawned { pid } = origin {
            info!(pid, "Waiting for spawned server");
            self.supervisor
                .wait_until_ready(self.ready_timeout)
                .await
                .context("Spawned the inference server but it never answered")?;
        }
        Ok(origin)
    }

    /// Stop the server if this process spawned it, and wait until it is
    /// reaped so it cannot outlive the shell.
    pub async fn shutdown(&self) {
        self.supervisor.shutdown_and_wait().await;
    }
}

/// Build the CLI context from its configuration.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let client =
        InferenceClient::new(config.client.clone()).context("Failed to build HTTP client")?;

    let probe: Arc<dyn ServerProbe> = Arc::new(HttpHealthProbe::new(&config.client));
    let mut supervisor_config =
        SupervisorConfig::new().with_probe_timeout(config.client.probe_timeout());
    if let Some(program) = config.server_bin {
        supervisor_config = supervisor_config.with_program(program);
    }
    let supervisor = ProcessSupervisor::new(supervisor_config, probe);

    let favourites = match config.data_dir {
        Some(dir) => FavouritesStore::open(favourites_path_in(&dir)),
        None => FavouritesStore::at_default_location()
            .context("Failed to resolve the data directory")?,
    };
    debug!(favourites = %favourites.path().display(), "CLI context ready");

    Ok(CliContext {
        client,
        supervisor,
        favourites,
        ready_timeout: config.ready_timeout,
    })
}
