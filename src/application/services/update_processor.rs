//! Update processor - per-message orchestration of weather and advice lookups

use tokio::sync::mpsc;

use crate::application::errors::ApiError;
use crate::application::messaging::replies;
use crate::domain::entities::{ChatMessage, Content, OutboundReply};
use crate::domain::traits::Bot;
use crate::infrastructure::config::Config;
use crate::infrastructure::llm::RecommendationClient;
use crate::infrastructure::weather::WeatherClient;

/// Command answered with the welcome text
pub const GREETING_COMMAND: &str = "start";
const HELP_COMMAND: &str = "help";

/// How processing of a single message ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Welcomed,
    UnknownCommand,
    Skipped,
    WeatherFailed,
    RecommendationFailed,
    NoAdvice,
    Advised,
}

/// Handles inbound messages one at a time
pub struct UpdateProcessor<B: Bot> {
    bot: B,
    weather: WeatherClient,
    advisor: RecommendationClient,
}

impl<B: Bot> UpdateProcessor<B> {
    pub fn new(bot: B, weather: WeatherClient, advisor: RecommendationClient) -> Self {
        Self { bot, weather, advisor }
    }

    /// Build both API clients from the loaded config
    pub fn from_config(bot: B, config: &Config) -> Result<Self, ApiError> {
        let weather = WeatherClient::new(&config.weather_api.key, &config.weather_api.base_url)?;
        let advisor = RecommendationClient::new(&config.gigachat.api_key, &config.gigachat.base_url)?;
        Ok(Self::new(bot, weather, advisor))
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Drain the channel in order. Each message is finished before the next is read.
    pub async fn run(&self, mut updates: mpsc::UnboundedReceiver<ChatMessage>) {
        while let Some(message) = updates.recv().await {
            self.process(&message).await;
        }
        tracing::info!("Update channel closed");
    }

    /// Process one message, sending zero or more replies
    pub async fn process(&self, message: &ChatMessage) -> Outcome {
        let chat_id = message.chat_id.as_str();

        let outcome = match &message.content {
            Content::Command { name, .. } => self.handle_command(chat_id, name).await,
            Content::Empty => Outcome::Skipped,
            Content::Text(location) => self.handle_location(chat_id, location).await,
        };

        tracing::info!(chat_id, ?outcome, "Message processed");
        outcome
    }

    async fn handle_command(&self, chat_id: &str, name: &str) -> Outcome {
        match name {
            GREETING_COMMAND | HELP_COMMAND => {
                self.reply(chat_id, replies::WELCOME).await;
                Outcome::Welcomed
            }
            other => {
                self.reply(chat_id, replies::unknown_command(other)).await;
                Outcome::UnknownCommand
            }
        }
    }

    async fn handle_location(&self, chat_id: &str, location: &str) -> Outcome {
        self.typing(chat_id).await;
        let weather = match self.weather.fetch_weather(location).await {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!(chat_id, location, error = %e, "Weather lookup failed");
                self.reply(chat_id, replies::weather_failure(location)).await;
                return Outcome::WeatherFailed;
            }
        };

        self.reply(chat_id, replies::weather_summary(&weather)).await;

        self.typing(chat_id).await;
        let advice = match self.advisor.fetch_recommendation(&weather).await {
            Ok(advice) => advice,
            Err(e) => {
                tracing::warn!(chat_id, error = %e, "Recommendation failed");
                self.reply(chat_id, replies::recommendation_failure(&e)).await;
                return Outcome::RecommendationFailed;
            }
        };

        self.reply(chat_id, replies::advice(&advice)).await;
        if advice.trim().is_empty() {
            Outcome::NoAdvice
        } else {
            Outcome::Advised
        }
    }

    async fn reply(&self, chat_id: &str, text: impl Into<String>) {
        let reply = OutboundReply::new(chat_id, text);
        if let Err(e) = self.bot.send_reply(&reply).await {
            tracing::error!(chat_id, "Failed to send message: {}", e);
        }
    }

    async fn typing(&self, chat_id: &str) {
        if let Err(e) = self.bot.send_chat_action(chat_id, "typing").await {
            tracing::debug!(chat_id, "Chat action failed: {}", e);
        }
    }
}
