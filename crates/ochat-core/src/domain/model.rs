//! Locally installed models as reported by the inference server.
//!
//! These are read-only snapshots; they reflect server state at the time of
//! the last list call and are never mutated client-side.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Format and quantisation details of an installed model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetails {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub parameter_size: String,
    #[serde(default)]
    pub quantization_level: String,
}

/// One entry of the server's model listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub modified_at: DateTime<FixedOffset>,
    /// Size on disk in bytes.
    #[serde(rename = "size")]
    pub size_bytes: u64,
    pub digest: String,
    #[serde(default)]
    pub details: ModelDetails,
}

impl ModelInfo {
    /// Short digest as shown by `ollama list`.
    pub fn short_digest(&self) -> &str {
        self.digest.get(..12).unwrap_or(&self.digest)
    }
}

/// Response body of the tags endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    pub models: Vec<ModelInfo>,
}
