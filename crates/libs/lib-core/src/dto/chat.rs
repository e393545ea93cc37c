//! # Chat DTOs
//!
//! - `POST /api/chat` - [`ChatRequest`] -> [`ChatResponse`] or
//!   [`ErrorResponse`](super::ErrorResponse)
//! - `POST /api/chat/stream` - [`ChatRequest`] -> chunked `text/plain`
//!
//! ## Wire Format
//!
//! ```text
//! { "message": "Thép hộp 40x80 giá bao nhiêu?", "history": [...] }
//! ```
//!
//! `message` is kept as a raw JSON value so that a missing, non-string or
//! blank message can be answered with a 400 instead of a deserialization
//! rejection. `history` is accepted for client compatibility and not used
//! when composing the prompt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub history: Option<Value>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(Value::String(message.into())),
            history: None,
        }
    }

    /// The message text, or `None` when it is missing, not a string, or blank.
    pub fn message_text(&self) -> Option<&str> {
        match &self.message {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of a conversation as kept by the chat widget. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ChatRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_message_text_validation() {
        assert_eq!(request(json!({"message": "Xin chào"})).message_text(), Some("Xin chào"));
        assert_eq!(request(json!({"message": ""})).message_text(), None);
        assert_eq!(request(json!({"message": "   "})).message_text(), None);
        assert_eq!(request(json!({"message": 42})).message_text(), None);
        assert_eq!(request(json!({})).message_text(), None);
    }

    #[test]
    fn test_history_is_accepted() {
        let req = request(json!({
            "message": "Giá thép?",
            "history": [{"id": "1", "role": "user", "content": "hi", "timestamp": "2025-01-01T00:00:00Z"}]
        }));
        assert!(req.history.is_some());

        let history: Vec<ChatMessage> = serde_json::from_value(req.history.unwrap()).unwrap();
        assert_eq!(history[0].role, ChatRole::User);
    }
}
