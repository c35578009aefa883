//! Request bodies and frame classification for the server's HTTP API.

use ochat_core::{ChatMessage, LayerProgress};
use serde::Serialize;
use serde_json::Value;

use crate::ndjson::StreamFrame;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct PullRequest<'a> {
    pub model: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteRequest<'a> {
    pub name: &'a str,
}

/// What a single chat stream frame means to the caller.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ChatEvent<'a> {
    Token(&'a str),
    Failed(&'a str),
    Ignored,
}

impl<'a> ChatEvent<'a> {
    pub fn from_frame(frame: &'a StreamFrame) -> Self {
        if let Some(message) = frame.error_message() {
            return Self::Failed(message);
        }
        match frame {
            StreamFrame::Json(value) => value
                .pointer("/message/content")
                .and_then(Value::as_str)
                .filter(|content| !content.is_empty())
                .map_or(Self::Ignored, Self::Token),
            // Opaque text is still part of the reply
            StreamFrame::Text(text) => Self::Token(text),
        }
    }
}

/// What a single pull stream frame means to the caller.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PullEvent<'a> {
    Progress(LayerProgress),
    Status(&'a str),
    Failed(&'a str),
    Ignored,
}

impl<'a> PullEvent<'a> {
    pub fn from_frame(frame: &'a StreamFrame) -> Self {
        if let Some(message) = frame.error_message() {
            return Self::Failed(message);
        }
        let Some(value) = frame.as_json() else {
            return Self::Ignored;
        };

        let digest = value.get("digest").and_then(Value::as_str);
        let completed = value.get("completed").and_then(Value::as_u64);
        let total = value.get("total").and_then(Value::as_u64);

        match (digest, completed, total) {
            (Some(digest), Some(completed), Some(total)) => {
                Self::Progress(LayerProgress::new(digest, completed, total))
            }
            _ => value
                .get("status")
                .and_then(Value::as_str)
                .map_or(Self::Ignored, Self::Status),
        }
    }
}
