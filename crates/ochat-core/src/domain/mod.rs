//! Domain types, independent of any transport or UI concern.

mod chat;
mod model;
mod progress;

pub use chat::{ChatMessage, ChatResponse, Conversation, MessageRole};
pub use model::{ModelDetails, ModelInfo, ModelList};
pub use progress::{LayerProgress, ProgressAggregator};
