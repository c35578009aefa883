//! Core domain types and port definitions for ochat.
//!
//! This crate has no network or process code. It holds the data model shared
//! by the client, the runtime and the terminal shell:
//!
//! - Chat messages, the non-streaming chat response, and the caller-side
//!   `Conversation` fold that accumulates streamed tokens
//! - Model listing types as reported by the inference server
//! - Per-layer pull progress and the `ProgressAggregator`
//! - The `ServerProbe` port used by the process supervisor
//! - The persisted favourites list and data directory resolution

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod favourites;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    ChatMessage, ChatResponse, Conversation, LayerProgress, MessageRole, ModelDetails, ModelInfo,
    ModelList, ProgressAggregator,
};
pub use favourites::{FavouritesError, FavouritesStore};
pub use paths::{DATA_DIR_ENV, PathError, data_root, favourites_path, favourites_path_in};
pub use ports::{ServerProbe, StaticProbe};
