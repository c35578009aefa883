//! Model pulls with streamed per-layer progress.

use futures_util::StreamExt;
use ochat_core::LayerProgress;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{InferenceClient, check_status};
use crate::error::{ClientError, ClientResult, Operation};
use crate::ndjson::ndjson_frames;
use crate::wire::{PullEvent, PullRequest};

impl InferenceClient {
    /// Download a model from the registry.
    ///
    /// `on_progress` receives every frame that carries a layer digest with
    /// both byte counters. Status-only frames are skipped. Aggregating layers
    /// into an overall percentage is the caller's job
    /// ([`ProgressAggregator`](ochat_core::ProgressAggregator)).
    pub async fn pull_model<F>(&self, name: &str, on_progress: F) -> ClientResult<()>
    where
        F: FnMut(LayerProgress),
    {
        self.pull_model_with_cancel(name, on_progress, &CancellationToken::new())
            .await
    }

    /// [`pull_model`](Self::pull_model) with an explicit cancel handle.
    pub async fn pull_model_with_cancel<F>(
        &self,
        name: &str,
        mut on_progress: F,
        cancel: &CancellationToken,
    ) -> ClientResult<()>
    where
        F: FnMut(LayerProgress),
    {
        let url = self.config.endpoint("pull");
        let budget = self.config.pull_timeout;

        self.bounded(Operation::PullModel, budget, Some(cancel), async {
            let request = self.http.post(&url).json(&PullRequest { model: name });
            let response = self.send(Operation::PullModel, budget, &url, request).await?;

            if response.status() == StatusCode::BAD_REQUEST {
                return Err(ClientError::NotFound {
                    model: name.to_string(),
                });
            }
            let response = check_status(response).await?;

            info!(model = name, "Pulling model");
            let mut frames = std::pin::pin!(ndjson_frames(response.bytes_stream()));

            while let Some(frame) = frames.next().await {
                let frame =
                    frame.map_err(|e| ClientError::from_reqwest(Operation::PullModel, &url, budget, e))?;
                match PullEvent::from_frame(&frame) {
                    PullEvent::Progress(progress) => on_progress(progress),
                    PullEvent::Status(text) => debug!(model = name, status = text, "Pull status"),
                    PullEvent::Failed(message) => {
                        warn!(model = name, error = %message, "Server reported an error mid-pull");
                        return Err(ClientError::StreamFailed {
                            operation: Operation::PullModel,
                            message: message.to_string(),
                        });
                    }
                    PullEvent::Ignored => {}
                }
            }

            info!(model = name, "Pull finished");
            Ok(())
        })
        .await
    }
}
