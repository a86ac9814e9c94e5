//! Data models for articles and weather conditions.
//!
//! This module defines both the wire shapes returned by the external APIs and
//! the validated types the rest of the application works with:
//! - [`RawArticle`] / [`NewsResponse`]: NewsAPI payloads, every field optional
//! - [`Article`]: an article that passed the retention rules
//! - [`WeatherResponse`]: WeatherAPI `current.json` payload (nested)
//! - [`WeatherSnapshot`]: flattened current conditions for one location
//!
//! Wire types use camelCase / snake_case names exactly as the APIs send them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Title marker NewsAPI uses for articles that were pulled by the publisher.
pub const REMOVED_MARKER: &str = "[Removed]";

/// The outlet an article was published by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

/// A news item that passed the retention rules.
///
/// `url` is the identity key: two articles with the same url are the same
/// article, whichever feed they came from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub content: Option<String>,
}

impl Article {
    /// Description text, or an empty string when there is none.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Which optional field an article must carry to be kept.
///
/// Image-led layouts (grid, carousel) need a picture; text-led layouts need a
/// description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    RequireImage,
    RequireDescription,
}

/// An article as NewsAPI returns it. Any field may be null.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub source: Option<ArticleSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    pub content: Option<String>,
}

/// RFC 3339 timestamp, or `None` for anything else (missing, empty, wrong
/// type). A bad timestamp drops its article, not the whole response.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc)))
}

fn non_empty(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

impl RawArticle {
    /// Whether this article may be shown under the given retention rule.
    ///
    /// The title must be non-empty and must not contain [`REMOVED_MARKER`]
    /// (case-sensitive), and the field named by `retention` must be non-empty.
    pub fn is_retained(&self, retention: Retention) -> bool {
        let title_ok = self
            .title
            .as_deref()
            .is_some_and(|t| !t.is_empty() && !t.contains(REMOVED_MARKER));
        let extra_ok = match retention {
            Retention::RequireImage => non_empty(&self.url_to_image),
            Retention::RequireDescription => non_empty(&self.description),
        };
        title_ok && extra_ok
    }

    /// Validate and convert. Returns `None` when the article is not retained
    /// or lacks the identity and timestamp fields.
    pub fn into_article(self, retention: Retention) -> Option<Article> {
        if !self.is_retained(retention) {
            return None;
        }
        Some(Article {
            source: self.source.unwrap_or(ArticleSource {
                id: None,
                name: String::new(),
            }),
            author: self.author,
            title: self.title?,
            description: self.description,
            url: self.url.filter(|u| !u.is_empty())?,
            url_to_image: self.url_to_image,
            published_at: self.published_at?,
            content: self.content,
        })
    }
}

/// Body of both the `everything` and `top-headlines` endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// Body of WeatherAPI's `current.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub location: WeatherLocation,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherLocation {
    pub name: String,
    pub country: String,
    pub localtime: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub condition: ConditionText,
    pub humidity: u8,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub vis_km: f64,
    pub uv: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionText {
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

/// Current conditions for one location, as displayed on the weather page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub country: String,
    pub local_time: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub condition_icon: String,
    pub humidity: u8,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub visibility_km: f64,
    pub uv_index: f64,
}

impl From<WeatherResponse> for WeatherSnapshot {
    fn from(resp: WeatherResponse) -> Self {
        let WeatherResponse { location, current } = resp;
        Self {
            location: location.name,
            country: location.country,
            local_time: location.localtime,
            temperature_c: current.temp_c,
            feels_like_c: current.feelslike_c,
            condition: current.condition.text,
            condition_icon: current.condition.icon,
            humidity: current.humidity,
            wind_kph: current.wind_kph,
            wind_dir: current.wind_dir,
            pressure_mb: current.pressure_mb,
            visibility_km: current.vis_km,
            uv_index: current.uv,
        }
    }
}
