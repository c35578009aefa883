//! Supervisor errors.

use std::io;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The server executable could not be started. Fatal for the caller.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The server did not answer its liveness probe in time.
    #[error("Inference server did not become ready within {after:?}")]
    NotReady { after: Duration },
}

impl SupervisorError {
    /// True when the executable itself is missing.
    pub fn is_missing_program(&self) -> bool {
        matches!(self, Self::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
