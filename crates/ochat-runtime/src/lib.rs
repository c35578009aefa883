//! Process runtime for the local inference server.
//!
//! [`ProcessSupervisor`] is the only component that starts or stops the
//! server executable. It reuses a server that is already listening, spawns
//! one otherwise, forwards the child's output into `tracing`, and notices
//! when the child exits so a later call can spawn it again.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod config;
mod error;
mod logs;
mod shutdown;
mod supervisor;

pub use config::{DEFAULT_PROGRAM, SupervisorConfig};
pub use error::SupervisorError;
pub use supervisor::{ProcessSupervisor, ServerOrigin, SupervisorStatus};

// Dev-dependencies used only by the integration tests
#[cfg(test)]
use {async_trait as _, tokio_test as _};
