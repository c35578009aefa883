//! Lifecycle owner of the local inference server process.
//!
//! The supervisor keeps at most one child behind a `tokio::sync::Mutex`, so
//! concurrent `ensure_running` calls spawn at most once. Each spawned child
//! is owned by a watcher task that reaps it and clears the handle when it
//! exits, whether it crashed or was asked to stop. Only the watcher signals
//! the child, since only it knows whether the child has been reaped.
//!
//! Watchers of stopped children are kept until [`ProcessSupervisor::wait_for_exit`]
//! collects them. A process about to exit must call it (or
//! [`ProcessSupervisor::shutdown_and_wait`]): dropping the runtime drops the
//! watcher, and the child is then killed outright instead of being given its
//! grace period.

use std::fmt;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use ochat_core::ServerProbe;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SupervisorConfig;
use crate::error::SupervisorError;
use crate::{logs, shutdown};

/// What `ensure_running` found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerOrigin {
    /// This supervisor already owns a running child.
    AlreadyManaged,
    /// A server started outside this app answered the probe; nothing was
    /// spawned and nothing will be stopped.
    External,
    /// A new child was spawned.
    Spawned { pid: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorStatus {
    /// No managed child. An external server may still be running.
    Stopped,
    Running { pid: u32 },
}

impl fmt::Display for SupervisorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "Stopped"),
            Self::Running { pid } => write!(f, "Running (pid {pid})"),
        }
    }
}

/// Handle to the managed child. The child itself lives in its watcher task.
struct ServerHandle {
    pid: u32,
    /// Distinguishes this child from a later respawn.
    generation: u64,
    stop: CancellationToken,
    watcher: JoinHandle<()>,
}

#[derive(Default)]
struct State {
    handle: Option<ServerHandle>,
    next_generation: u64,
    /// Watchers still reaping children that were asked to stop.
    stopping: Vec<JoinHandle<()>>,
}

/// Starts, watches and stops the inference server.
///
/// Construct exactly one per application and share it by reference.
///
/// # Example
///
/// ```ignore
/// let supervisor = ProcessSupervisor::new(SupervisorConfig::default(), probe);
/// if let ServerOrigin::Spawned { .. } = supervisor.ensure_running().await? {
///     supervisor.wait_until_ready(Duration::from_secs(10)).await?;
/// }
/// // ... talk to the server ...
/// supervisor.shutdown_and_wait().await;
/// ```
pub struct ProcessSupervisor {
    config: SupervisorConfig,
    probe: Arc<dyn ServerProbe>,
    state: Arc<Mutex<State>>,
}

impl ProcessSupervisor {
    pub fn new(config: SupervisorConfig, probe: Arc<dyn ServerProbe>) -> Self {
        Self {
            config,
            probe,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub const fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Make sure a server is available, spawning one if needed.
    ///
    /// Does nothing when a managed child exists or an external server
    /// answers the probe.
    ///
    /// # Errors
    ///
    /// Returns `Spawn` if the executable cannot be started.
    pub async fn ensure_running(&self) -> Result<ServerOrigin, SupervisorError> {
        let mut state = self.state.lock().await;

        if let Some(handle) = &state.handle {
            debug!(pid = handle.pid, "Server already managed");
            return Ok(ServerOrigin::AlreadyManaged);
        }

        if self.probe.is_alive(self.config.probe_timeout).await {
            info!("Inference server already running, not spawning");
            return Ok(ServerOrigin::External);
        }

        let mut child = self.spawn_child()?;
        let Some(pid) = child.id() else {
            // Only possible if the child was already reaped.
            return Err(self.spawn_error(std::io::Error::other("child exited before reporting a PID")));
        };
        logs::forward_output(&mut child, pid);

        let generation = state.next_generation;
        state.next_generation += 1;
        let stop = CancellationToken::new();

        let watcher = tokio::spawn(watch_child(
            child,
            pid,
            generation,
            stop.clone(),
            Arc::clone(&self.state),
            self.config.shutdown_grace,
        ));

        state.handle = Some(ServerHandle {
            pid,
            generation,
            stop,
            watcher,
        });
        info!(pid, program = %self.config.program.display(), "Spawned inference server");
        Ok(ServerOrigin::Spawned { pid })
    }

    /// Ask the managed child to stop. Idempotent and non-blocking.
    ///
    /// Clears the handle straight away. The watcher task sends the
    /// termination signal, reaps the child in the background and kills it if
    /// it outlives the grace period. External servers are left alone.
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        let Some(handle) = state.handle.take() else {
            debug!("No managed server to stop");
            return;
        };

        info!(pid = handle.pid, "Stopping inference server");
        handle.stop.cancel();
        state.stopping.retain(|watcher| !watcher.is_finished());
        state.stopping.push(handle.watcher);
    }

    /// Wait until every child stopped by [`shutdown`](Self::shutdown) has
    /// been reaped, which takes at most the grace period plus a kill.
    pub async fn wait_for_exit(&self) {
        let watchers = std::mem::take(&mut self.state.lock().await.stopping);
        for watcher in watchers {
            if let Err(e) = watcher.await {
                warn!(error = %e, "Server watcher task failed");
            }
        }
    }

    /// [`shutdown`](Self::shutdown) followed by [`wait_for_exit`](Self::wait_for_exit).
    pub async fn shutdown_and_wait(&self) {
        self.shutdown().await;
        self.wait_for_exit().await;
    }

    pub async fn status(&self) -> SupervisorStatus {
        let state = self.state.lock().await;
        state
            .handle
            .as_ref()
            .map_or(SupervisorStatus::Stopped, |h| SupervisorStatus::Running { pid: h.pid })
    }

    /// Poll the probe until the server answers or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// Returns `NotReady` when the deadline passes first.
    pub async fn wait_until_ready(&self, timeout: Duration) -> Result<(), SupervisorError> {
        let deadline = Instant::now() + timeout;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            if self.probe.is_alive(self.config.probe_timeout).await {
                info!(attempts, "Inference server is ready");
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!(attempts, ?timeout, "Inference server did not become ready");
                return Err(SupervisorError::NotReady { after: timeout });
            }
            debug!(attempts, "Server not answering yet, retrying");
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    fn spawn_child(&self) -> Result<Child, SupervisorError> {
        debug!(
            program = %self.config.program.display(),
            args = ?self.config.args,
            "Spawning inference server"
        );
        Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The child must not outlive a watcher dropped with the runtime.
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))
    }

    fn spawn_error(&self, source: std::io::Error) -> SupervisorError {
        SupervisorError::Spawn {
            program: self.config.program.display().to_string(),
            source,
        }
    }
}

impl fmt::Debug for ProcessSupervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessSupervisor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Own the child until it exits, then clear the handle if it still refers
/// to this child.
async fn watch_child(
    mut child: Child,
    pid: u32,
    generation: u64,
    stop: CancellationToken,
    state: Arc<Mutex<State>>,
    grace: Duration,
) {
    let exited = tokio::select! {
        status = child.wait() => Some(status),
        () = stop.cancelled() => None,
    };
    let status = match exited {
        Some(status) => status,
        None => shutdown::terminate(&mut child, grace).await,
    };

    match status {
        Ok(status) => match status.code() {
            Some(code) => info!(pid, code, "Inference server exited"),
            None => info!(pid, %status, "Inference server terminated by signal"),
        },
        Err(e) => warn!(pid, error = %e, "Failed to reap inference server"),
    }

    let mut state = state.lock().await;
    if state
        .handle
        .as_ref()
        .is_some_and(|h| h.generation == generation)
    {
        state.handle = None;
        debug!(pid, "Cleared handle of exited server");
    }
}
