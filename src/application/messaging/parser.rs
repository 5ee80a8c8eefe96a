//! Message parser - Parses raw chat text into structured messages

use crate::domain::entities::{ChatMessage, Content};

/// Parses incoming text into `ChatMessage` values
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse message text. `None` (no text at all, e.g. a photo) is `Content::Empty`.
    pub fn parse(&self, chat_id: impl Into<String>, text: Option<&str>) -> ChatMessage {
        let chat_id = chat_id.into();

        let Some(text) = text else {
            return ChatMessage::empty(chat_id);
        };

        if text.trim().is_empty() {
            return ChatMessage::empty(chat_id);
        }

        if let Some(cmd_text) = text.strip_prefix(self.command_prefix.as_str()) {
            return self.parse_command(chat_id, cmd_text);
        }

        // Location names are passed on verbatim
        ChatMessage::new(chat_id, Content::Text(text.to_string()))
    }

    fn parse_command(&self, chat_id: String, cmd_text: &str) -> ChatMessage {
        let mut parts = cmd_text.split_whitespace();
        let head = parts.next().unwrap_or("");
        // "/start@my_bot" in group chats
        let name = head.split('@').next().unwrap_or("").to_lowercase();
        let args = parts.map(|s| s.to_string()).collect();

        ChatMessage::new(chat_id, Content::Command { name, args })
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new("/")
    }
}
