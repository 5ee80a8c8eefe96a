//! Application layer errors

use thiserror::Error;

/// Chat transport errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the outbound weather and recommendation calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// Timeout, DNS failure, refused connection
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// Body does not match the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// HTTP client or endpoint could not be set up
    #[error("Client setup error: {0}")]
    Setup(String),
}

impl ApiError {
    /// Short description shown to chat users.
    pub fn user_description(&self) -> String {
        match self {
            ApiError::Transport(_) => "сервис недоступен или не ответил вовремя".to_string(),
            ApiError::UnexpectedStatus(code) => format!("сервис ответил с кодом {}", code),
            ApiError::Decode(_) => "сервис вернул ответ в неожиданном формате".to_string(),
            ApiError::Setup(_) => "внутренняя ошибка настройки клиента".to_string(),
        }
    }
}

/// reqwest puts the full request URL (API key included) into its message
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if e.is_builder() {
            ApiError::Setup(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<reqwest::Error> for BotError {
    fn from(e: reqwest::Error) -> Self {
        BotError::Network(e.without_url().to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Config file does not exist: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
