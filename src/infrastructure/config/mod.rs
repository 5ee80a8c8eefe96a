//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::application::errors::ConfigError;

/// Environment variable holding the config file path
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH_WEATHER";

pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.weatherapi.com/v1/current.json";

/// Deployment environment, selects the log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::InvalidValue(format!("unknown env: {}", other))),
        }
    }
}

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub env: Environment,
    pub weather_api: WeatherApiConfig,
    pub telegram_bot: TelegramBotConfig,
    pub gigachat: GigaChatConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherApiConfig {
    pub key: String,
    pub base_url: String,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramBotConfig {
    pub telegram_bot_token: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GigaChatConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Resolve the config path: explicit argument first, then `CONFIG_PATH_WEATHER`.
    pub fn resolve_path(explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
        let path = match explicit {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => std::env::var(CONFIG_PATH_ENV)
                .ok()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| ConfigError::MissingField(CONFIG_PATH_ENV.to_string()))?,
        };
        Ok(PathBuf::from(path))
    }

    /// Read and parse a YAML file. Environment overrides are not applied.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Load from file, apply process environment overrides and validate.
    pub fn load_with_env(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override file values from environment variables looked up through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(env) = lookup("ENV") {
            self.env = env.parse()?;
        }
        if let Some(key) = lookup("WEATHER_API_KEY") {
            self.weather_api.key = key;
        }
        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN") {
            self.telegram_bot.telegram_bot_token = token;
        }
        if let Some(key) = lookup("GIGACHAT_API_KEY") {
            self.gigachat.api_key = key;
        }

        Ok(())
    }

    /// Check that everything needed to serve messages is present.
    ///
    /// The bot token is checked separately by the Telegram runner so the
    /// console adapter works without one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weather_api.key.is_empty() {
            return Err(ConfigError::MissingField("weather_api.key".to_string()));
        }
        if self.gigachat.api_key.is_empty() {
            return Err(ConfigError::MissingField("gigachat.api_key".to_string()));
        }
        if self.gigachat.base_url.is_empty() {
            return Err(ConfigError::MissingField("gigachat.base_url".to_string()));
        }

        for (field, value) in [
            ("weather_api.base_url", &self.weather_api.base_url),
            ("gigachat.base_url", &self.gigachat.base_url),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", field, e)))?;
        }

        Ok(())
    }

    /// Bot token, or an error if none is configured
    pub fn bot_token(&self) -> Result<&str, ConfigError> {
        if self.telegram_bot.telegram_bot_token.is_empty() {
            return Err(ConfigError::MissingField("telegram_bot.telegram_bot_token".to_string()));
        }
        Ok(&self.telegram_bot.telegram_bot_token)
    }
}
