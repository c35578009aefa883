//! Ctrl+C to cancellation bridge for long-running requests.

use ochat_client::CancellationToken;
use tokio::task::JoinHandle;
use tracing::debug;

/// Cancels its token on the first Ctrl+C while alive.
pub(crate) struct CtrlC {
    token: CancellationToken,
    watcher: JoinHandle<()>,
}

impl CtrlC {
    pub(crate) fn install() -> Self {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Ctrl+C received, cancelling request");
                trigger.cancel();
            }
        });
        Self { token, watcher }
    }

    pub(crate) const fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for CtrlC {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}
