//! Search page over the aggregated corpus.

use super::ArticleCard;
use crate::aggregate::{collect_all, NewsFeed};
use crate::locale::{Locale, Msg};
use crate::models::Article;
use crate::search::search;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// What the search page shows for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Blank query: prompt the reader to type.
    Hint { message: String },
    NoResults { message: String },
    Results { articles: Vec<ArticleCard> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub query: String,
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

/// The corpus is fetched once; every query runs against it locally.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    corpus: Vec<Article>,
}

impl SearchPage {
    pub async fn load<F: NewsFeed>(feed: &F) -> Self {
        Self {
            corpus: collect_all(feed).await,
        }
    }

    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    pub fn query(&self, query: &str, now: DateTime<Utc>, locale: Locale) -> SearchView {
        let outcome = if query.trim().is_empty() {
            SearchOutcome::Hint {
                message: locale.text(Msg::StartTyping).to_string(),
            }
        } else {
            let hits = search(&self.corpus, query);
            debug!(query, hits = hits.len(), "Searched corpus");
            if hits.is_empty() {
                SearchOutcome::NoResults {
                    message: locale.no_results_for(query),
                }
            } else {
                SearchOutcome::Results {
                    articles: ArticleCard::from_all(hits, now, locale),
                }
            }
        };
        SearchView {
            query: query.to_string(),
            outcome,
        }
    }
}
