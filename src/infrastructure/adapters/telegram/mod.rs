//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::ChatMessage;
use crate::domain::traits::{Bot, BotInfo};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Long-poll timeout passed to getUpdates, in seconds
pub const POLL_TIMEOUT_SECS: i64 = 60;

/// Pause after a failed getUpdates call
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T, BotError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(BotError::Api(
                self.description.unwrap_or_else(|| "request failed".to_string()),
            )),
        }
    }
}

impl Update {
    /// Convert into a chat message. Updates without a message yield `None`.
    pub fn to_chat_message(&self, parser: &MessageParser) -> Option<ChatMessage> {
        let msg = self.message.as_ref()?;
        Some(parser.parse(msg.chat.id.to_string(), msg.text.as_deref()))
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
    parser: MessageParser,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Result<Self, BotError> {
        Self::with_api_base(token, API_BASE)
    }

    /// Adapter talking to a non-default Bot API server
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Result<Self, BotError> {
        let api_base: String = api_base.into();
        // Must outlive the long-poll window
        let client = Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS as u64 + 15))
            .build()?;

        Ok(Self {
            token: token.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
            info: BotInfo {
                id: "unknown".to_string(),
                name: "weather-bot".to_string(),
                username: "weather_bot".to_string(),
            },
            parser: MessageParser::default(),
        })
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, BotError>
    where
        Req: Serialize + ?Sized,
        Resp: for<'de> Deserialize<'de>,
    {
        let response = self.client
            .post(self.api_url(method))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let data: ApiResponse<Resp> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(format!("{} (status {})", e.without_url(), status)))?;

        data.into_result()
    }

    /// Fetch bot info from Telegram API. Fails on an invalid token.
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: Option<String>,
        }

        let data: BotInfoResponse = self.call("getMe", &serde_json::json!({})).await?;

        self.info = BotInfo {
            id: data.id.to_string(),
            name: data.first_name,
            username: data.username.unwrap_or_default(),
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<String>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        };

        self.call("getUpdates", &request).await
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command {
            command: &'static str,
            description: &'static str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest {
            commands: Vec<Command>,
        }

        let request = SetMyCommandsRequest {
            commands: vec![
                Command { command: "start", description: "Приветствие и справка" },
                Command { command: "help", description: "Как пользоваться ботом" },
            ],
        };

        let _: bool = self.call("setMyCommands", &request).await?;
        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }

    /// Long-poll for updates and forward chat messages in order.
    ///
    /// Returns once the receiving side of `tx` is dropped.
    pub async fn poll_updates(&self, tx: mpsc::UnboundedSender<ChatMessage>) {
        let mut offset: i64 = 0;

        tracing::info!("Starting update polling");
        loop {
            match self.get_updates(offset, POLL_TIMEOUT_SECS).await {
                Ok(updates) => {
                    if !updates.is_empty() {
                        tracing::debug!("Received {} updates", updates.len());
                    }
                    for update in &updates {
                        let Some(message) = update.to_chat_message(&self.parser) else {
                            continue;
                        };
                        if tx.send(message).is_err() {
                            tracing::info!("Update channel closed, stopping polling");
                            return;
                        }
                    }
                    offset = Self::get_next_offset(&updates, offset);
                }
                Err(e) => {
                    tracing::error!("Failed to get updates: {}", e);
                    tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                }
            }
        }
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        tracing::debug!(chat_id, "Sending message");
        let result: MessageResult = self
            .call("sendMessage", &SendMessageRequest { chat_id, text })
            .await?;

        Ok(result.message_id.to_string())
    }

    async fn send_chat_action(&self, chat_id: &str, action: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SendChatActionRequest<'a> {
            chat_id: &'a str,
            action: &'a str,
        }

        let _: bool = self
            .call("sendChatAction", &SendChatActionRequest { chat_id, action })
            .await?;
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Content;

    fn update(id: i64, text: Option<&str>) -> Update {
        Update {
            update_id: id,
            message: Some(Message {
                message_id: id * 10,
                from: None,
                chat: Chat { id: -100500 },
                text: text.map(|t| t.to_string()),
            }),
        }
    }

    #[test]
    fn test_update_to_chat_message() {
        let parser = MessageParser::default();
        let msg = update(1, Some("Berlin")).to_chat_message(&parser).unwrap();
        assert_eq!(msg.chat_id, "-100500");
        assert_eq!(msg.content, Content::Text("Berlin".to_string()));

        let photo = update(2, None).to_chat_message(&parser).unwrap();
        assert_eq!(photo.content, Content::Empty);

        let no_message = Update { update_id: 3, message: None };
        assert!(no_message.to_chat_message(&parser).is_none());
    }

    #[test]
    fn test_next_offset() {
        let updates = vec![update(7, Some("a")), update(9, Some("b"))];
        assert_eq!(TelegramAdapter::get_next_offset(&updates, 0), 10);
        assert_eq!(TelegramAdapter::get_next_offset(&[], 42), 42);
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let data: ApiResponse<bool> = serde_json::from_str(body).unwrap();
        match data.into_result() {
            Err(BotError::Api(msg)) => assert_eq!(msg, "Unauthorized"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
