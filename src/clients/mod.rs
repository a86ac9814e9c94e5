//! HTTP clients for the external news and weather APIs.
//!
//! | API | Module | Endpoints |
//! |-----|--------|-----------|
//! | NewsAPI | [`news`] | `everything`, `top-headlines` |
//! | WeatherAPI | [`weather`] | `current.json` |
//!
//! Both clients share one [`reqwest::Client`] built by [`http_client`] and
//! report failures as [`FetchError`](crate::error::FetchError).

use crate::error::FetchError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

pub mod news;
pub mod weather;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("viewpoint-news/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client.
pub fn http_client() -> Result<Client, FetchError> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// Join `path` onto `base` and append the query pairs.
///
/// `Url::join` would drop the last segment of a base like `.../v2`, so the
/// path is appended textually.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `base` is not an absolute URL.
pub(crate) fn endpoint_url(
    base: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Url, FetchError> {
    let mut url = Url::parse(&format!("{}/{}", base.trim_end_matches('/'), path))?;
    url.query_pairs_mut().extend_pairs(query);
    Ok(url)
}

/// The URL with credential parameters masked, for logging.
pub(crate) fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apiKey" || k == "key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

/// GET `url` and decode the JSON body.
///
/// # Arguments
///
/// * `http` - Shared client from [`http_client`]
/// * `url` - Full request URL, credentials included
/// * `endpoint` - Short name used in logs and errors
///
/// # Errors
///
/// * [`FetchError::Status`] for a non-success status
/// * [`FetchError::Request`] if the request or body read fails
/// * [`FetchError::Decode`] if the body is not the expected JSON
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: Url,
    endpoint: &'static str,
) -> Result<T, FetchError> {
    debug!(url = %redacted(&url), endpoint, "GET");
    let response = http.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { status, endpoint });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
