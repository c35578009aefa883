//! Error types for inference server operations.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// The client operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Chat,
    ListModels,
    PullModel,
    DeleteModel,
    Version,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chat => "chat",
            Self::ListModels => "list models",
            Self::PullModel => "pull model",
            Self::DeleteModel => "delete model",
            Self::Version => "server version",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`InferenceClient`](crate::InferenceClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The connection could not be established; the server is most likely
    /// not running.
    #[error("Inference server is not reachable at {url}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The operation exceeded its fixed latency budget.
    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: Operation, after: Duration },

    /// The server answered with a non-success status.
    #[error("Request rejected ({status}): {message}")]
    RequestRejected { status: u16, message: String },

    /// The server accepted the request, then sent an error frame in the
    /// middle of the stream.
    #[error("Server reported an error during {operation}: {message}")]
    StreamFailed { operation: Operation, message: String },

    /// The model requested for a pull does not exist in the registry.
    #[error("Model '{model}' does not exist")]
    NotFound { model: String },

    /// A response body was not valid JSON or lacked required fields.
    #[error("Invalid response from inference server: {message}")]
    Format { message: String },

    /// The caller cancelled a streaming call.
    #[error("{operation} was cancelled")]
    Cancelled { operation: Operation },

    /// Any other transport failure.
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Whether starting the server is the likely fix.
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Classify a reqwest failure for `operation` against `url`.
    pub(crate) fn from_reqwest(
        operation: Operation,
        url: &str,
        budget: Duration,
        err: reqwest::Error,
    ) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                operation,
                after: budget,
            }
        } else if err.is_connect() {
            Self::Unreachable {
                url: url.to_string(),
                source: err,
            }
        } else {
            Self::Transport {
                context: format!("{operation} request to {url} failed"),
                source: err,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_operation() {
        let err = ClientError::Timeout {
            operation: Operation::PullModel,
            after: Duration::from_secs(3600),
        };
        let msg = err.to_string();
        assert!(msg.contains("pull model"));
        assert!(msg.contains("3600"));
        assert!(err.is_timeout());
        assert!(!err.is_unreachable());
    }

    #[test]
    fn test_request_rejected_message() {
        let err = ClientError::RequestRejected {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Request rejected (500): boom");
    }

    #[test]
    fn test_stream_failed_message_has_no_status() {
        let err = ClientError::StreamFailed {
            operation: Operation::PullModel,
            message: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Server reported an error during pull model: disk full");
    }

    #[test]
    fn test_not_found_message() {
        let err = ClientError::NotFound {
            model: "no-such-model".to_string(),
        };
        assert!(err.to_string().contains("no-such-model"));
    }

    #[test]
    fn test_cancelled_message() {
        let err = ClientError::Cancelled {
            operation: Operation::Chat,
        };
        assert_eq!(err.to_string(), "chat was cancelled");
    }

    #[test]
    fn test_format_helper() {
        let err = ClientError::format("missing models");
        assert!(matches!(err, ClientError::Format { ref message } if message == "missing models"));
    }
}
