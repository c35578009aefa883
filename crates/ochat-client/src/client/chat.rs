//! Chat completions, atomic or token-streamed.

use futures_util::StreamExt;
use ochat_core::{ChatMessage, ChatResponse};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{InferenceClient, check_status, decode_body};
use crate::error::{ClientError, ClientResult, Operation};
use crate::ndjson::{StreamFrame, ndjson_frames};
use crate::wire::{ChatEvent, ChatRequest};

impl InferenceClient {
    /// Send a conversation and wait for the complete reply.
    pub async fn chat(&self, model: &str, messages: &[ChatMessage]) -> ClientResult<ChatResponse> {
        let url = self.config.endpoint("chat");
        let budget = self.config.chat_timeout;
        let body = ChatRequest {
            model,
            messages,
            stream: false,
        };

        self.bounded(Operation::Chat, budget, None, async {
            let request = self.http.post(&url).json(&body);
            let response = self.send(Operation::Chat, budget, &url, request).await?;
            let response = check_status(response).await?;
            decode_body(Operation::Chat, &url, budget, response).await
        })
        .await
    }

    /// Send a conversation and deliver the reply token by token.
    ///
    /// `on_token` is called once per non-empty content fragment, in arrival
    /// order. Nothing is accumulated here; fold the tokens into a
    /// [`Conversation`](ochat_core::Conversation) on the caller side.
    pub async fn chat_stream<F>(
        &self,
        model: &str,
        messages: &[ChatMessage],
        on_token: F,
    ) -> ClientResult<()>
    where
        F: FnMut(&str),
    {
        self.chat_stream_with_cancel(model, messages, on_token, &CancellationToken::new())
            .await
    }

    /// [`chat_stream`](Self::chat_stream) with an explicit cancel handle.
    ///
    /// Cancelling aborts the connection and returns `Cancelled`; no further
    /// tokens are delivered after that.
    pub async fn chat_stream_with_cancel<F>(
        &self,
        model: &str,
        messages: &[ChatMessage],
        mut on_token: F,
        cancel: &CancellationToken,
    ) -> ClientResult<()>
    where
        F: FnMut(&str),
    {
        let url = self.config.endpoint("chat");
        let budget = self.config.chat_timeout;
        let body = ChatRequest {
            model,
            messages,
            stream: true,
        };

        self.bounded(Operation::Chat, budget, Some(cancel), async {
            let request = self.http.post(&url).json(&body);
            let response = self.send(Operation::Chat, budget, &url, request).await?;
            let response = check_status(response).await?;

            let mut frames = std::pin::pin!(ndjson_frames(response.bytes_stream()));
            let mut tokens = 0usize;

            while let Some(frame) = frames.next().await {
                let frame = frame.map_err(|e| ClientError::from_reqwest(Operation::Chat, &url, budget, e))?;
                if let StreamFrame::Text(text) = &frame {
                    debug!(line = %text, "Non-JSON line in chat stream");
                }
                match ChatEvent::from_frame(&frame) {
                    ChatEvent::Token(token) => {
                        tokens += 1;
                        on_token(token);
                    }
                    ChatEvent::Failed(message) => {
                        warn!(model, error = %message, "Server reported an error mid-stream");
                        return Err(ClientError::StreamFailed {
                            operation: Operation::Chat,
                            message: message.to_string(),
                        });
                    }
                    ChatEvent::Ignored => {}
                }
            }

            debug!(model, tokens, "Chat stream closed");
            Ok(())
        })
        .await
    }
}
