//! Liveness probe port for the inference server.
//!
//! The process supervisor asks this port whether a server is already
//! listening before it spawns one. The HTTP implementation lives in
//! `ochat-client`; tests substitute [`StaticProbe`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

/// Answers "is the inference server already listening?".
#[async_trait]
pub trait ServerProbe: Send + Sync {
    /// Single check bounded by `timeout`.
    ///
    /// Must never fail: any error is reported as `false`.
    async fn is_alive(&self, timeout: Duration) -> bool;
}

/// Probe with a fixed, switchable answer.
#[derive(Debug, Default)]
pub struct StaticProbe {
    alive: AtomicBool,
}

impl StaticProbe {
    pub const fn new(alive: bool) -> Self {
        Self {
            alive: AtomicBool::new(alive),
        }
    }

    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }
}

#[async_trait]
impl ServerProbe for StaticProbe {
    async fn is_alive(&self, _timeout: Duration) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}
