//! Shared helpers for supervisor integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ochat_core::ServerProbe;
use ochat_runtime::{ProcessSupervisor, SupervisorConfig};

/// Probe that records how often it was asked.
#[derive(Debug, Default)]
pub struct CountingProbe {
    alive: AtomicBool,
    calls: AtomicUsize,
}

impl CountingProbe {
    pub fn new(alive: bool) -> Arc<Self> {
        Arc::new(Self {
            alive: AtomicBool::new(alive),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServerProbe for CountingProbe {
    async fn is_alive(&self, _timeout: Duration) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.alive.load(Ordering::SeqCst)
    }
}

/// Stand-in server that idles until signalled.
pub fn sleeper_config() -> SupervisorConfig {
    SupervisorConfig::new()
        .with_program("sleep")
        .with_args(["30"])
        .with_poll_interval(Duration::from_millis(20))
}

pub fn supervisor_with(config: SupervisorConfig, probe: Arc<CountingProbe>) -> ProcessSupervisor {
    ProcessSupervisor::new(config, probe)
}
