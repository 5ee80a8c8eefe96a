//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::ChatMessage;
use crate::domain::traits::{Bot, BotInfo};

/// Chat id used for every console message
pub const CONSOLE_CHAT_ID: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    parser: MessageParser,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "weather-bot".to_string(),
                username: "console".to_string(),
            },
            parser: MessageParser::default(),
        }
    }

    /// Read stdin line by line and forward each line as a chat message.
    ///
    /// Returns on EOF or when the receiver is dropped.
    pub async fn read_lines(&self, tx: mpsc::UnboundedSender<ChatMessage>) -> Result<(), BotError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            let message = self.parser.parse(CONSOLE_CHAT_ID, Some(line.as_str()));
            if tx.send(message).is_err() {
                break;
            }
        }

        Ok(())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
