//! Article aggregation across feeds.
//!
//! The search page works on one combined corpus built from three feeds:
//! technology, science and top headlines. The three requests run
//! concurrently and are joined when all of them settle. Each branch falls back
//! to an empty list on failure, so the join itself cannot fail.
//!
//! Duplicates are removed by url, keeping the first occurrence; feed order is
//! technology, science, headlines.

use crate::clients::news::{NewsClient, Topic};
use crate::models::Article;
use itertools::Itertools;
use tracing::{info, instrument};

/// Articles requested from each feed when building the search corpus.
pub const FEED_PAGE_SIZE: usize = 20;

/// A source of article lists that never fails: errors surface as an empty
/// list.
pub trait NewsFeed {
    /// Newest articles for a topic.
    async fn topic(&self, topic: Topic, page_size: usize) -> Vec<Article>;

    /// Top headlines for the feed's default country.
    async fn headlines(&self, page_size: usize) -> Vec<Article>;
}

impl NewsFeed for NewsClient {
    async fn topic(&self, topic: Topic, page_size: usize) -> Vec<Article> {
        self.fetch_topic(topic, page_size).await
    }

    async fn headlines(&self, page_size: usize) -> Vec<Article> {
        self.fetch_top_headlines(self.default_country(), page_size)
            .await
    }
}

/// Fetch technology, science and headlines concurrently and merge them into
/// one corpus without duplicate urls.
#[instrument(level = "info", skip_all)]
pub async fn collect_all<F: NewsFeed>(feed: &F) -> Vec<Article> {
    let (technology, science, headlines) = tokio::join!(
        feed.topic(Topic::Technology, FEED_PAGE_SIZE),
        feed.topic(Topic::Science, FEED_PAGE_SIZE),
        feed.headlines(FEED_PAGE_SIZE),
    );

    let fetched = technology.len() + science.len() + headlines.len();
    let corpus = dedup_by_url(technology.into_iter().chain(science).chain(headlines));
    info!(
        fetched,
        unique = corpus.len(),
        "Aggregated articles for search"
    );
    corpus
}

/// Drop every article whose url was already seen, preserving order.
pub fn dedup_by_url(articles: impl IntoIterator<Item = Article>) -> Vec<Article> {
    articles
        .into_iter()
        .unique_by(|article| article.url.clone())
        .collect()
}
