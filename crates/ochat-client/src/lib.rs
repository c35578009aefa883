//! HTTP client for the local inference server.
//!
//! - [`InferenceClient`] - chat (atomic or token-streamed), model listing,
//!   model pulls with per-layer progress, and model deletion
//! - [`HttpHealthProbe`] - single-shot liveness check used before spawning
//! - [`ndjson_frames`] / [`NdjsonDecoder`] - newline-delimited JSON decoding
//!   of chunked response bodies
//!
//! Every call is individually time-bounded and every failure is returned as
//! a typed [`ClientError`]; nothing is retried.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod health;
mod ndjson;
mod wire;

// ============================================================================
// Public API
// ============================================================================

pub use client::InferenceClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult, Operation};
pub use health::HttpHealthProbe;
pub use ndjson::{NdjsonDecoder, StreamFrame, ndjson_frames};

// Cancellation handle accepted by the streaming calls
pub use tokio_util::sync::CancellationToken;

// Used by the integration tests' mock server only
#[cfg(test)]
use axum as _;
