//! NewsAPI client.
//!
//! Two endpoints are used:
//! - `everything`: free-text search for a [`Topic`], newest first
//! - `top-headlines`: the day's headlines for a country
//!
//! Each call filters the raw article list through the topic's [`Retention`]
//! rule before returning it. The `try_*` methods surface failures as
//! [`FetchError`]; the plain `fetch_*` methods log the failure once and return
//! an empty list, for callers that treat "no data" and "failed" alike.

use super::{endpoint_url, get_json};
use crate::config::NewsSettings;
use crate::error::FetchError;
use crate::models::{Article, NewsResponse, Retention};
use reqwest::Client;
use tracing::{error, info, instrument, warn};

/// Themed keyword sets used against the `everything` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Technology, AI, quantum computing, security, innovation.
    Technology,
    /// Science, research, discoveries, education.
    Science,
    /// The wider science and education set of the science page.
    ScienceEducation,
}

impl Topic {
    pub fn name(self) -> &'static str {
        match self {
            Topic::Technology => "technology",
            Topic::Science => "science",
            Topic::ScienceEducation => "science-education",
        }
    }

    /// Boolean-OR query text for the given article language.
    pub fn query(self, language: &str) -> &'static str {
        match (self, language == "ru") {
            (Topic::Technology, true) => {
                concat!(
                    "технологии OR искусственный интеллект OR ",
                    "квантовые вычисления OR кибербезопасность OR инновации"
                )
            }
            (Topic::Science, true) => {
                "наука OR исследования OR открытие OR прорыв OR научные достижения OR образование"
            }
            (Topic::ScienceEducation, true) => {
                concat!(
                    "наука OR образование OR исследования OR университет OR ",
                    "открытие OR научные достижения OR обучение OR академия"
                )
            }
            (Topic::Technology, false) => {
                concat!(
                    "technology OR artificial intelligence OR ",
                    "quantum computing OR cybersecurity OR innovation"
                )
            }
            (Topic::Science, false) => {
                concat!(
                    "science OR research OR discovery OR ",
                    "breakthrough OR scientific achievements OR education"
                )
            }
            (Topic::ScienceEducation, false) => {
                concat!(
                    "science OR education OR research OR university OR ",
                    "discovery OR scientific achievements OR learning OR academy"
                )
            }
        }
    }

    /// Picture-led feeds need an image; text feeds need a description.
    pub fn retention(self) -> Retention {
        match self {
            Topic::Technology => Retention::RequireImage,
            Topic::Science | Topic::ScienceEducation => Retention::RequireDescription,
        }
    }
}

/// Headlines feed into an image carousel.
pub const HEADLINES_RETENTION: Retention = Retention::RequireImage;

/// Client for the news-search and top-headlines endpoints.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    language: String,
    country: String,
}

impl NewsClient {
    pub fn new(http: Client, settings: &NewsSettings) -> Self {
        if settings.api_key.is_none() {
            error!("News API key is not configured; news requests will fail");
        }
        Self {
            http,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            language: settings.language.clone(),
            country: settings.country.clone(),
        }
    }

    /// Country used for headlines when the caller does not pick one.
    pub fn default_country(&self) -> &str {
        &self.country
    }

    fn api_key(&self) -> Result<&str, FetchError> {
        self.api_key.as_deref().ok_or(FetchError::MissingApiKey("news"))
    }

    /// Newest articles for a topic, filtered by the topic's retention rule.
    #[instrument(level = "info", skip(self, topic), fields(topic = topic.name()))]
    pub async fn try_fetch_topic(
        &self,
        topic: Topic,
        page_size: usize,
    ) -> Result<Vec<Article>, FetchError> {
        let page_size = page_size.to_string();
        let url = endpoint_url(
            &self.base_url,
            "everything",
            &[
                ("apiKey", self.api_key()?),
                ("q", topic.query(&self.language)),
                ("language", self.language.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ],
        )?;

        let response: NewsResponse = get_json(&self.http, url, "news/everything").await?;
        Ok(retain(response, topic.retention(), topic.name()))
    }

    /// Top headlines for a country, keeping only articles with an image.
    #[instrument(level = "info", skip(self))]
    pub async fn try_fetch_top_headlines(
        &self,
        country: &str,
        page_size: usize,
    ) -> Result<Vec<Article>, FetchError> {
        let page_size = page_size.to_string();
        let url = endpoint_url(
            &self.base_url,
            "top-headlines",
            &[
                ("apiKey", self.api_key()?),
                ("country", country),
                ("pageSize", page_size.as_str()),
            ],
        )?;

        let response: NewsResponse = get_json(&self.http, url, "news/top-headlines").await?;
        Ok(retain(response, HEADLINES_RETENTION, "headlines"))
    }

    /// Like [`try_fetch_topic`](Self::try_fetch_topic), but a failure is
    /// logged and reported as an empty list.
    pub async fn fetch_topic(&self, topic: Topic, page_size: usize) -> Vec<Article> {
        self.try_fetch_topic(topic, page_size)
            .await
            .unwrap_or_else(|e| {
                error!(
                    topic = topic.name(),
                    status = ?e.status(),
                    error = %e,
                    "Failed to fetch news"
                );
                Vec::new()
            })
    }

    /// Like [`try_fetch_top_headlines`](Self::try_fetch_top_headlines), but a
    /// failure is logged and reported as an empty list.
    pub async fn fetch_top_headlines(&self, country: &str, page_size: usize) -> Vec<Article> {
        self.try_fetch_top_headlines(country, page_size)
            .await
            .unwrap_or_else(|e| {
                error!(%country, status = ?e.status(), error = %e, "Failed to fetch top headlines");
                Vec::new()
            })
    }
}

/// Apply the retention rule to a response, preserving API order.
///
/// # Arguments
///
/// * `response` - Decoded body of `everything` or `top-headlines`
/// * `retention` - Which optional field each article must carry
/// * `feed` - Feed name used in log lines
///
/// # Returns
///
/// The retained articles. Articles missing a url or a valid timestamp are
/// dropped along with those failing `retention`.
fn retain(response: NewsResponse, retention: Retention, feed: &str) -> Vec<Article> {
    if response.status != "ok" {
        warn!(feed, status = %response.status, "News API reported a non-ok status");
    }
    let total_results = response.total_results;
    let received = response.articles.len();
    let articles: Vec<Article> = response
        .articles
        .into_iter()
        .filter_map(|raw| raw.into_article(retention))
        .collect();

    if articles.is_empty() {
        warn!(feed, received, "No articles left after filtering");
    } else {
        info!(feed, total_results, received, kept = articles.len(), "Fetched articles");
    }
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use tracing_test::traced_test;

    const BODY: &str = r#"{
        "status": "ok",
        "totalResults": 4,
        "articles": [
            {"source": {"id": null, "name": "Habr"}, "author": null,
             "title": "Квантовый процессор", "description": "Описание",
             "url": "https://habr.com/1", "urlToImage": "https://habr.com/1.png",
             "publishedAt": "2025-06-08T10:00:00Z", "content": null},
            {"source": {"id": null, "name": "RBC"}, "author": null,
             "title": "Без картинки", "description": "Есть описание",
             "url": "https://rbc.ru/2", "urlToImage": null,
             "publishedAt": "2025-06-08T09:00:00Z", "content": null},
            {"source": {"id": null, "name": "[Removed]"}, "author": null,
             "title": "[Removed]", "description": "[Removed]",
             "url": "https://removed.com", "urlToImage": "https://removed.com/x.png",
             "publishedAt": "1970-01-01T00:00:00Z", "content": null},
            {"source": {"id": null, "name": "TASS"}, "author": null,
             "title": null, "description": "Нет заголовка",
             "url": "https://tass.ru/4", "urlToImage": "https://tass.ru/4.png",
             "publishedAt": "2025-06-08T08:00:00Z", "content": null}
        ]
    }"#;

    fn settings(base_url: String) -> NewsSettings {
        NewsSettings {
            api_key: Some("test-key".to_string()),
            base_url,
            language: "ru".to_string(),
            country: "ru".to_string(),
        }
    }

    fn client(server: &Server) -> NewsClient {
        NewsClient::new(Client::new(), &settings(server.url()))
    }

    #[tokio::test]
    async fn test_topic_sends_required_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
                Matcher::UrlEncoded("q".into(), Topic::Technology.query("ru").into()),
                Matcher::UrlEncoded("language".into(), "ru".into()),
                Matcher::UrlEncoded("sortBy".into(), "publishedAt".into()),
                Matcher::UrlEncoded("pageSize".into(), "6".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let articles = client(&server)
            .try_fetch_topic(Topic::Technology, 6)
            .await
            .unwrap();
        mock.assert_async().await;

        // Only the first article has a title and an image and is not removed.
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://habr.com/1");
        assert_eq!(articles[0].source.name, "Habr");
    }

    #[tokio::test]
    async fn test_text_topic_requires_description() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(BODY)
            .create_async()
            .await;

        let articles = client(&server)
            .try_fetch_topic(Topic::Science, 5)
            .await
            .unwrap();
        let urls: Vec<&str> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["https://habr.com/1", "https://rbc.ru/2"]);
    }

    #[tokio::test]
    async fn test_top_headlines_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/top-headlines")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
                Matcher::UrlEncoded("country".into(), "ru".into()),
                Matcher::UrlEncoded("pageSize".into(), "5".into()),
            ]))
            .with_status(200)
            .with_body(BODY)
            .create_async()
            .await;

        let articles = client(&server)
            .try_fetch_top_headlines("ru", 5)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_surfaced_by_try() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = client(&server)
            .try_fetch_topic(Topic::Science, 5)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_server_error_becomes_empty_and_logs_once() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let articles = client(&server).fetch_topic(Topic::Technology, 6).await;
        assert!(articles.is_empty());
        assert!(logs_contain("Failed to fetch news"));
        logs_assert(|lines: &[&str]| {
            match lines.iter().filter(|line| line.contains("ERROR")).count() {
                1 => Ok(()),
                n => Err(format!("expected one error line, saw {n}")),
            }
        });
    }

    #[tokio::test]
    async fn test_bad_timestamp_keeps_sibling_articles() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/everything")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"status": "ok", "totalResults": 2, "articles": [
                    {"source": {"id": null, "name": "Habr"}, "author": null,
                     "title": "Без даты", "description": "Описание",
                     "url": "https://habr.com/0", "urlToImage": null,
                     "publishedAt": "", "content": null},
                    {"source": {"id": null, "name": "Habr"}, "author": null,
                     "title": "С датой", "description": "Описание",
                     "url": "https://habr.com/1", "urlToImage": null,
                     "publishedAt": "2025-06-08T10:00:00Z", "content": null}
                ]}"#,
            )
            .create_async()
            .await;

        let articles = client(&server)
            .try_fetch_topic(Topic::Science, 5)
            .await
            .unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://habr.com/1");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/top-headlines")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let c = client(&server);
        let err = c.try_fetch_top_headlines("ru", 5).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(c.fetch_top_headlines("ru", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_never_hits_the_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut s = settings(server.url());
        s.api_key = None;
        let c = NewsClient::new(Client::new(), &s);
        let err = c.try_fetch_topic(Topic::Technology, 6).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingApiKey("news")));
        mock.assert_async().await;
    }

    #[test]
    fn test_topic_queries_per_language() {
        assert!(Topic::Science.query("ru").contains("наука"));
        assert!(Topic::Science.query("en").contains("science"));
        assert_eq!(Topic::Technology.retention(), Retention::RequireImage);
        assert_eq!(Topic::ScienceEducation.retention(), Retention::RequireDescription);
    }
}
