//! Home page: technology grid, science text feed and headline carousel.

use super::{ArticleCard, ViewState};
use crate::clients::news::{NewsClient, Topic};
use crate::error::FetchError;
use crate::locale::{Locale, Msg};
use crate::models::Article;
use crate::telemetry::Telemetry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

/// Articles in the technology grid.
pub const GRID_SIZE: usize = 6;
/// Articles in the science text feed.
pub const TEXT_FEED_SIZE: usize = 5;
/// Headlines in the carousel.
pub const CAROUSEL_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub grid: ViewState<Vec<ArticleCard>>,
    pub text_feed: ViewState<Vec<ArticleCard>>,
    pub carousel: ViewState<Vec<ArticleCard>>,
}

impl HomePage {
    /// Load all three sections concurrently. Each section settles on its
    /// own; one failing section does not affect the others.
    #[instrument(level = "info", skip_all)]
    pub async fn load(
        client: &NewsClient,
        telemetry: &Telemetry,
        locale: Locale,
        now: DateTime<Utc>,
    ) -> Self {
        let (grid, text_feed, carousel) = tokio::join!(
            client.try_fetch_topic(Topic::Technology, GRID_SIZE),
            client.try_fetch_topic(Topic::Science, TEXT_FEED_SIZE),
            client.try_fetch_top_headlines(client.default_country(), CAROUSEL_SIZE),
        );

        Self {
            grid: section(grid, "grid", telemetry, locale, now),
            text_feed: section(text_feed, "text-feed", telemetry, locale, now),
            carousel: section(carousel, "carousel", telemetry, locale, now),
        }
    }
}

fn section(
    result: Result<Vec<Article>, FetchError>,
    name: &str,
    telemetry: &Telemetry,
    locale: Locale,
    now: DateTime<Utc>,
) -> ViewState<Vec<ArticleCard>> {
    if let Err(e) = &result {
        telemetry.capture_error(e, &[("page", "home"), ("section", name)]);
    }
    let mut state = ViewState::default();
    state.resolve(
        result.map(|articles| ArticleCard::from_all(&articles, now, locale)),
        locale.text(Msg::NewsError),
    );
    state
}
