use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::OutboundReply;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a message to a chat, returning the platform message id
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError>;

    /// Show a chat action such as "typing"
    async fn send_chat_action(&self, _chat_id: &str, _action: &str) -> Result<(), BotError> {
        Ok(())
    }

    /// Get bot info
    fn bot_info(&self) -> BotInfo;

    /// Deliver a prepared reply
    async fn send_reply(&self, reply: &OutboundReply) -> Result<String, BotError> {
        self.send_message(&reply.chat_id, &reply.text).await
    }
}

#[async_trait]
impl<B: Bot + ?Sized> Bot for Arc<B> {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        (**self).send_message(chat_id, text).await
    }

    async fn send_chat_action(&self, chat_id: &str, action: &str) -> Result<(), BotError> {
        (**self).send_chat_action(chat_id, action).await
    }

    fn bot_info(&self) -> BotInfo {
        (**self).bot_info()
    }
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
