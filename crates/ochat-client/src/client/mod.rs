//! Inference server client.
//!
//! Each operation lives in its own submodule as an `impl InferenceClient`
//! block; this module holds the shared request plumbing: latency budgets,
//! cancellation, status checking and body decoding.

mod chat;
mod models;
mod pull;

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, Operation};

/// Client for the local inference server's HTTP API.
///
/// Cheap to clone; clones share the connection pool. Calls are independent
/// and may run concurrently.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    pub(crate) http: Client,
    pub(crate) config: ClientConfig,
}

impl InferenceClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|source| ClientError::Transport {
                context: "failed to build HTTP client".to_string(),
                source,
            })?;
        Ok(Self { http, config })
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run `request` within `budget`, aborting it early if `cancel` fires.
    ///
    /// Dropping the request future on timeout or cancellation drops the
    /// in-flight response, which closes the connection instead of draining it.
    pub(crate) async fn bounded<T, F>(
        &self,
        operation: Operation,
        budget: Duration,
        cancel: Option<&CancellationToken>,
        request: F,
    ) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let timed = tokio::time::timeout(budget, request);

        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(%operation, "Cancelled by caller");
                    return Err(ClientError::Cancelled { operation });
                }
                outcome = timed => outcome,
            },
            None => timed.await,
        };

        outcome.unwrap_or_else(|_| {
            warn!(%operation, budget = ?budget, "Request timed out");
            Err(ClientError::Timeout {
                operation,
                after: budget,
            })
        })
    }

    /// Send a prepared request, classifying transport failures.
    pub(crate) async fn send(
        &self,
        operation: Operation,
        budget: Duration,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<Response> {
        debug!(%operation, %url, "Sending request");
        request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(operation, url, budget, e))
    }
}

/// Turn a non-success response into `RequestRejected`.
pub(crate) async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::RequestRejected {
        status: status.as_u16(),
        message: rejection_message(status, &body),
    })
}

/// The server's `error` field when present, else the status line.
pub(crate) fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| status.to_string())
}

/// Read a whole response body and decode it as JSON.
pub(crate) async fn decode_body<T: DeserializeOwned>(
    operation: Operation,
    url: &str,
    budget: Duration,
    response: Response,
) -> ClientResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::from_reqwest(operation, url, budget, e))?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::format(e.to_string()))
}
