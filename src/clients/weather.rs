//! WeatherAPI client for current conditions.

use super::{endpoint_url, get_json};
use crate::config::WeatherSettings;
use crate::error::FetchError;
use crate::models::{WeatherResponse, WeatherSnapshot};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument};

/// Client for WeatherAPI's `current.json`.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    location: String,
}

impl WeatherClient {
    pub fn new(http: Client, settings: &WeatherSettings) -> Self {
        Self {
            http,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            location: settings.location.clone(),
        }
    }

    /// The configured location.
    pub fn default_location(&self) -> &str {
        &self.location
    }

    /// Current conditions for `location`. Air quality is not requested.
    ///
    /// Failures are returned to the caller; nothing is retried here.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_current(&self, location: &str) -> Result<WeatherSnapshot, FetchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey("weather"))?;
        let url = endpoint_url(
            &self.base_url,
            "current.json",
            &[("key", key), ("q", location), ("aqi", "no")],
        )?;

        let response: WeatherResponse = get_json(&self.http, url, "weather/current").await?;
        let snapshot = WeatherSnapshot::from(response);
        info!(
            location = %snapshot.location,
            temperature_c = snapshot.temperature_c,
            condition = %snapshot.condition,
            "Fetched current weather"
        );
        Ok(snapshot)
    }
}

/// Picture shown next to the temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIcon {
    Rain,
    Cloud,
    Sun,
}

impl WeatherIcon {
    /// Rain wins over cloud; anything else is sunny.
    pub fn for_condition(condition: &str) -> Self {
        let condition = condition.to_lowercase();
        if condition.contains("rain") || condition.contains("дождь") {
            WeatherIcon::Rain
        } else if condition.contains("cloud") || condition.contains("облач") {
            WeatherIcon::Cloud
        } else {
            WeatherIcon::Sun
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::Sun => "☀",
        }
    }
}
