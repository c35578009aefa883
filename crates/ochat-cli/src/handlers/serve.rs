//! `serve` handler: hold the server up until Ctrl+C.

use std::time::Duration;

use anyhow::{Result, bail};
use ochat_runtime::{ServerOrigin, SupervisorStatus};
use tracing::debug;

use crate::bootstrap::CliContext;

const STATUS_POLL: Duration = Duration::from_secs(1);

/// Keep a managed server running until Ctrl+C or until it exits on its own.
///
/// `origin` is what `ensure_server` reported. An external server is left to
/// whoever started it.
pub async fn execute(ctx: &CliContext, origin: ServerOrigin) -> Result<()> {
    let pid = match origin {
        ServerOrigin::External => {
            println!(
                "{} is already answering at {}; nothing to supervise.",
                server_label(ctx).await,
                ctx.client().config().base_url()
            );
            return Ok(());
        }
        ServerOrigin::Spawned { pid } => pid,
        ServerOrigin::AlreadyManaged => match ctx.supervisor().status().await {
            SupervisorStatus::Running { pid } => pid,
            SupervisorStatus::Stopped => bail!("Inference server exited during startup"),
        },
    };

    println!(
        "{} running (pid {pid}). Press Ctrl+C to stop.",
        server_label(ctx).await
    );

    let exited = async {
        loop {
            tokio::time::sleep(STATUS_POLL).await;
            if ctx.supervisor().status().await == SupervisorStatus::Stopped {
                break;
            }
        }
    };

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            println!("Stopping server...");
            Ok(())
        }
        () = exited => bail!("Inference server (pid {pid}) exited unexpectedly"),
    }
}

/// "Ollama 0.1.32", or a generic label if the version call fails.
async fn server_label(ctx: &CliContext) -> String {
    match ctx.client().server_version().await {
        Ok(version) => format!("Ollama {version}"),
        Err(e) => {
            debug!(error = %e, "Could not read server version");
            "Server".to_string()
        }
    }
}
