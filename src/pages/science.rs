//! Science and education page.
//!
//! One request fetches [`SCIENCE_PAGE_SIZE`] articles; the page reveals them
//! [`BATCH`] at a time. Revealing more never refetches.

use super::{ArticleCard, ViewState};
use crate::clients::news::{NewsClient, Topic};
use crate::locale::{Locale, Msg};
use crate::telemetry::Telemetry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

pub const SCIENCE_PAGE_SIZE: usize = 20;
pub const BATCH: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SciencePage {
    pub state: ViewState<Vec<ArticleCard>>,
    pub visible: usize,
}

impl Default for SciencePage {
    fn default() -> Self {
        Self {
            state: ViewState::Loading,
            visible: BATCH,
        }
    }
}

impl SciencePage {
    #[instrument(level = "info", skip_all)]
    pub async fn load(
        &mut self,
        client: &NewsClient,
        telemetry: &Telemetry,
        locale: Locale,
        now: DateTime<Utc>,
    ) {
        self.state.begin();
        self.visible = BATCH;

        let result = client
            .try_fetch_topic(Topic::ScienceEducation, SCIENCE_PAGE_SIZE)
            .await;
        if let Err(e) = &result {
            telemetry.capture_error(e, &[("page", "science")]);
        }
        self.state.resolve(
            result.map(|articles| ArticleCard::from_all(&articles, now, locale)),
            locale.text(Msg::ScienceError),
        );
    }

    /// Reveal the next batch. Does nothing unless more articles are hidden.
    pub fn load_more(&mut self) {
        if self.has_more() {
            self.visible += BATCH;
            debug!(visible = self.visible, "Revealed more science articles");
        }
    }

    pub fn has_more(&self) -> bool {
        self.state
            .ready()
            .is_some_and(|cards| cards.len() > self.visible)
    }

    pub fn visible_articles(&self) -> &[ArticleCard] {
        match self.state.ready() {
            Some(cards) => &cards[..cards.len().min(self.visible)],
            None => &[],
        }
    }
}
