//! WeatherAPI client - current conditions for a free-text location

use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use crate::application::errors::ApiError;
use crate::domain::entities::Weather;

/// Request timeout for one weather lookup
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Weather API client
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: Url,
    client: Client,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(api_key, base_url, WEATHER_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Setup(format!("invalid weather base url: {}", e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url,
            client,
        })
    }

    /// Request URL for a location
    pub fn request_url(&self, location: &str) -> Url {
        weather_url(&self.base_url, &self.api_key, location)
    }

    /// Fetch current weather. Every call goes to the network.
    pub async fn fetch_weather(&self, location: &str) -> Result<Weather, ApiError> {
        tracing::debug!(location, "Fetching weather");

        let response = self.client
            .get(self.request_url(location))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus(status.as_u16()));
        }

        // Body read failures count as transport errors
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;

        let weather: Weather = serde_json::from_str(&body)?;
        if weather.location.name.trim().is_empty() {
            return Err(ApiError::Decode("response has no location name".to_string()));
        }

        Ok(weather)
    }
}

/// Append `key` and the form-encoded location to the base URL's query.
pub fn weather_url(base_url: &Url, api_key: &str, location: &str) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair("key", api_key)
        .append_pair("q", location);
    url
}
