//! Chat domain types.
//!
//! `ChatMessage` is the wire shape sent to the inference server's chat
//! endpoint. `Conversation` is the in-memory transcript owned by the shell;
//! it is where streamed tokens are folded into the assistant reply, so the
//! client itself never accumulates text.

use serde::{Deserialize, Serialize};

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single chat turn as exchanged with the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Body of a non-streaming chat reply.
///
/// Only `message` is required; the timing counters are present on real
/// servers but optional so that minimal mock servers still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub message: ChatMessage,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

/// In-memory transcript of one chat session.
///
/// Messages are append-only. The single exception is the trailing assistant
/// message opened by [`Conversation::begin_assistant`], which grows as tokens
/// are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a conversation with a system prompt.
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(prompt)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Open an empty assistant message that subsequent tokens extend.
    pub fn begin_assistant(&mut self) {
        self.messages.push(ChatMessage::assistant(String::new()));
    }

    /// Append a streamed token to the open assistant message.
    ///
    /// Opens one first if the last message is not from the assistant.
    pub fn append_token(&mut self, token: &str) {
        match self.messages.last_mut() {
            Some(last) if last.role == MessageRole::Assistant => last.content.push_str(token),
            _ => self.messages.push(ChatMessage::assistant(token)),
        }
    }

    /// Replace the open assistant message with a complete reply.
    pub fn finish_assistant(&mut self, reply: ChatMessage) {
        if self
            .messages
            .last()
            .is_some_and(|m| m.role == MessageRole::Assistant && m.content.is_empty())
        {
            self.messages.pop();
        }
        self.messages.push(reply);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Assistant)
            .map(|m| m.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_as_display_name() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let json = serde_json::to_value(role).unwrap();
            assert_eq!(json, serde_json::json!(role.to_string()));
        }
        assert!(serde_json::from_str::<MessageRole>("\"tool\"").is_err());
    }

    #[test]
    fn test_message_wire_shape() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn test_tokens_fold_into_last_assistant_message() {
        let mut convo = Conversation::new();
        convo.push_user("Why is the sky blue?");
        convo.begin_assistant();
        for token in ["Ray", "leigh", " scattering"] {
            convo.append_token(token);
        }

        assert_eq!(convo.len(), 2);
        assert_eq!(convo.last_reply(), Some("Rayleigh scattering"));
        assert_eq!(convo.messages()[0].content, "Why is the sky blue?");
    }

    #[test]
    fn test_append_without_open_reply_starts_one() {
        let mut convo = Conversation::new();
        convo.push_user("hello");
        convo.append_token("hi");
        assert_eq!(convo.len(), 2);
        assert_eq!(convo.messages()[1], ChatMessage::assistant("hi"));
    }

    #[test]
    fn test_finish_replaces_empty_placeholder() {
        let mut convo = Conversation::with_system_prompt("be brief");
        convo.push_user("hello");
        convo.begin_assistant();
        convo.finish_assistant(ChatMessage::assistant("hi there"));

        assert_eq!(convo.len(), 3);
        assert_eq!(convo.last_reply(), Some("hi there"));
    }

    #[test]
    fn test_chat_response_minimal_body() {
        let body = r#"{"message":{"role":"assistant","content":"ok"}}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.message.content, "ok");
        assert!(!resp.done);
        assert!(resp.eval_count.is_none());
    }
}
