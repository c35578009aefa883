//! Configuration for [`ProcessSupervisor`](crate::ProcessSupervisor).

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Server executable looked up on `PATH` when none is configured.
pub const DEFAULT_PROGRAM: &str = "ollama";

/// How the supervisor launches and waits on the server process.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    pub(crate) program: PathBuf,
    pub(crate) args: Vec<String>,
    /// Bound on each liveness probe
    pub(crate) probe_timeout: Duration,
    /// Delay between probes while waiting for a fresh server
    pub(crate) poll_interval: Duration,
    /// How long a child may ignore SIGTERM before it is killed
    pub(crate) shutdown_grace: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            args: vec!["serve".to_string()],
            probe_timeout: Duration::from_secs(2),
            poll_interval: Duration::from_millis(250),
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

impl SupervisorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Executable to spawn. Defaults to `ollama`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to the executable. Defaults to `serve`.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}
