//! GigaChat recommendation client - clothing advice for a weather record

use reqwest::{header, Client, StatusCode};
use std::time::Duration;

use crate::application::errors::ApiError;
use crate::domain::entities::Weather;
use crate::infrastructure::llm::types::{ChatRequest, ChatResponse, LLMMessage};

/// Model name sent with every request
pub const MODEL: &str = "GigaChat";

/// Request timeout for one recommendation
pub const RECOMMENDATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Recommendation API client
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl RecommendationClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(api_key, base_url, RECOMMENDATION_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        })
    }

    /// Ask for clothing advice. An empty `choices` list yields `Ok("")`.
    pub async fn fetch_recommendation(&self, weather: &Weather) -> Result<String, ApiError> {
        let request = build_request(weather);
        tracing::debug!(
            model = %request.model,
            prompt_chars = request.messages[0].content.chars().count(),
            "Requesting recommendation"
        );

        let response = self.client
            .post(&self.base_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Recommendation response");
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus(status.as_u16()));
        }

        // Body read failures count as transport errors
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        Ok(chat_response.into_first_content().unwrap_or_default())
    }
}

/// Single-turn prompt describing the weather
pub fn build_prompt(weather: &Weather) -> String {
    let current = &weather.current;
    format!(
        "Погода за окном: температура {:.1}°C, влажность {}%, скорость ветра {:.1} км/ч. Что порекомендуешь надеть на улицу?",
        current.temperature_c, current.humidity, current.wind_kph
    )
}

pub fn build_request(weather: &Weather) -> ChatRequest {
    ChatRequest {
        model: MODEL.to_string(),
        messages: vec![LLMMessage::user(build_prompt(weather))],
        stream: false,
        repetition_penalty: 1,
    }
}
