//! `models pull` handler.

use anyhow::{Context, Result};
use ochat_client::ClientError;
use tracing::debug;

use super::CtrlC;
use crate::bootstrap::CliContext;
use crate::presentation::PullProgress;

/// Pull a model, drawing overall progress. Ctrl+C cancels the download.
pub async fn execute(ctx: &CliContext, name: &str) -> Result<()> {
    let interrupt = CtrlC::install();
    let mut progress = PullProgress::new(name);

    let result = ctx
        .client()
        .pull_model_with_cancel(
            name,
            |layer| {
                debug!(
                    digest = %layer.digest,
                    completed = layer.completed,
                    total = layer.total,
                    "Layer progress"
                );
                progress.record(layer);
            },
            interrupt.token(),
        )
        .await;

    match result {
        Ok(()) => {
            progress.finish(&format!("pulled {name}"));
            println!("Pulled '{name}'.");
            Ok(())
        }
        Err(ClientError::Cancelled { .. }) => {
            let percent = progress.percent();
            progress.abandon(&format!("cancelled at {percent}%"));
            println!("Pull of '{name}' cancelled.");
            Ok(())
        }
        Err(e) => {
            progress.abandon("failed");
            Err(e).with_context(|| format!("Failed to pull '{name}'"))
        }
    }
}
