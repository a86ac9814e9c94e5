//! Pages of the reader and the state each one moves through.
//!
//! Every data-backed view starts in [`ViewState::Loading`] and settles in
//! either [`ViewState::Ready`] or [`ViewState::Error`]. A settled view stays
//! settled until a new fetch cycle calls [`ViewState::begin`].
//!
//! # Pages
//!
//! | Route | Module | Data |
//! |-------|--------|------|
//! | `home` | [`home`] | technology grid, science feed, headline carousel |
//! | `science` | [`science`] | science and education feed, revealed in batches |
//! | `weather` | [`weather`] | current conditions with a retry control |
//! | `search` | [`search`] | aggregated corpus filtered per query |
//!
//! [`run`] is the entry point used by `main`; it executes one route inside
//! the render [`boundary`].

use crate::categorize::{categorize, Category};
use crate::cli::{Command, OutputFormat};
use crate::clients::news::NewsClient;
use crate::clients::weather::WeatherClient;
use crate::config::Settings;
use crate::locale::{format_time_ago, Locale, Msg};
use crate::models::Article;
use crate::outputs::{json, markdown};
use crate::telemetry::{Level, Telemetry};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::error::Error;
use std::io::IsTerminal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::{info, warn};

pub mod boundary;
pub mod home;
pub mod science;
pub mod search;
pub mod weather;

pub type PageError = Box<dyn Error + Send + Sync>;

/// Loading / error / ready state of one data-backed view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    /// Enter a new fetch cycle.
    pub fn begin(&mut self) {
        *self = ViewState::Loading;
    }

    /// Settle a loading view. `message` is what the reader sees on failure.
    /// Settled views ignore late results.
    pub fn resolve<E: std::fmt::Display>(&mut self, result: Result<T, E>, message: &str) {
        if !self.is_loading() {
            warn!("Ignoring a result for a view that already settled");
            return;
        }
        *self = match result {
            Ok(value) => ViewState::Ready(value),
            Err(e) => {
                warn!(error = %e, "View failed to load");
                ViewState::Error(message.to_string())
            }
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// An article prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image: Option<String>,
    pub source: String,
    pub author: Option<String>,
    pub category: Category,
    pub published_at: DateTime<Utc>,
    pub time_ago: String,
}

impl ArticleCard {
    pub fn new(article: &Article, now: DateTime<Utc>, locale: Locale) -> Self {
        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            url: article.url.clone(),
            image: article.url_to_image.clone(),
            source: article.source.name.clone(),
            author: article.author.clone(),
            category: categorize(article),
            published_at: article.published_at,
            time_ago: format_time_ago(article.published_at, now, locale),
        }
    }

    pub fn from_all<'a>(
        articles: impl IntoIterator<Item = &'a Article>,
        now: DateTime<Utc>,
        locale: Locale,
    ) -> Vec<Self> {
        articles
            .into_iter()
            .map(|article| Self::new(article, now, locale))
            .collect()
    }
}

/// Everything a route needs, owned so the route can run on its own task.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub settings: Settings,
    pub telemetry: Telemetry,
    pub http: Client,
    pub format: OutputFormat,
    pub json_output_dir: Option<String>,
}

impl PageContext {
    pub fn locale(&self) -> Locale {
        self.settings.locale
    }

    pub fn news_client(&self) -> NewsClient {
        NewsClient::new(self.http.clone(), &self.settings.news)
    }

    pub fn weather_client(&self) -> WeatherClient {
        WeatherClient::new(self.http.clone(), &self.settings.weather)
    }

    /// Write a rendered page to stdout in the chosen format, and to the JSON
    /// output directory when one is configured.
    pub async fn emit<T: Serialize>(
        &self,
        route: &str,
        view: &T,
        markdown: String,
    ) -> Result<(), PageError> {
        let rendered = match self.format {
            OutputFormat::Markdown => markdown,
            OutputFormat::Json => serde_json::to_string_pretty(view)?,
        };
        let mut stdout = tokio::io::stdout();
        stdout.write_all(rendered.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;

        if let Some(dir) = &self.json_output_dir {
            json::write_page(view, dir, route).await?;
        }
        Ok(())
    }

    /// Show a page's loading placeholder while its fetch is in flight.
    ///
    /// Only Markdown output shows it; JSON output stays one document per
    /// page. The placeholder goes to `out` (stderr when run from
    /// [`run`]) so stdout carries nothing but settled pages.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub async fn show_loading<W: AsyncWrite + Unpin>(
        &self,
        out: &mut W,
        title: Msg,
    ) -> Result<(), PageError> {
        if self.format != OutputFormat::Markdown {
            return Ok(());
        }
        out.write_all(markdown::render_loading(title, self.locale()).as_bytes())
            .await?;
        out.flush().await?;
        Ok(())
    }
}

/// Run one route inside the render boundary.
pub async fn run(command: Command, ctx: PageContext) -> Result<(), PageError> {
    let route = command.route();
    let telemetry = ctx.telemetry.clone();
    let show_details = ctx.settings.is_development();
    let locale = ctx.locale();
    telemetry.add_breadcrumb(format!("open {route}"), "navigation", Level::Info);

    let outcome = boundary::guard(route, &telemetry, show_details, route_task(command, ctx)).await;
    match outcome {
        Ok(result) => result,
        Err(crash) => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(markdown::render_crash(&crash, locale).as_bytes())
                .await?;
            stdout.flush().await?;
            Err(crash.into())
        }
    }
}

async fn route_task(command: Command, ctx: PageContext) -> Result<(), PageError> {
    let now = Utc::now();
    let locale = ctx.locale();
    let mut progress = tokio::io::stderr();
    match command {
        Command::Home => {
            ctx.show_loading(&mut progress, Msg::SiteTitle).await?;
            let page = home::HomePage::load(&ctx.news_client(), &ctx.telemetry, locale, now).await;
            ctx.emit("home", &page, markdown::render_home(&page, locale))
                .await
        }
        Command::Science { pages } => {
            let mut page = science::SciencePage::default();
            ctx.show_loading(&mut progress, Msg::ScienceTitle).await?;
            page.load(&ctx.news_client(), &ctx.telemetry, locale, now)
                .await;
            for _ in 1..pages {
                page.load_more();
            }
            ctx.emit("science", &page, markdown::render_science(&page, locale))
                .await
        }
        Command::Weather { location, no_prompt } => {
            let client = ctx.weather_client();
            let location = location.unwrap_or_else(|| client.default_location().to_string());
            let mut page = weather::WeatherPage::new(client, location);
            ctx.show_loading(&mut progress, Msg::WeatherTitle).await?;
            page.load(&ctx.telemetry, locale).await;

            let interactive = !no_prompt && std::io::stdin().is_terminal();
            let mut answers = BufReader::new(tokio::io::stdin()).lines();
            let mut stdout = tokio::io::stdout();
            while page.can_retry() && interactive {
                ctx.emit("weather", &page, markdown::render_weather(&page, locale))
                    .await?;
                let prompt = locale.text(Msg::TryAgainPrompt);
                if !confirm(&mut answers, &mut stdout, prompt).await? {
                    return Ok(());
                }
                ctx.show_loading(&mut progress, Msg::WeatherTitle).await?;
                page.retry(&ctx.telemetry, locale).await;
            }
            ctx.emit("weather", &page, markdown::render_weather(&page, locale))
                .await
        }
        Command::Search { query } => {
            ctx.show_loading(&mut progress, Msg::SearchTitle).await?;
            let page = search::SearchPage::load(&ctx.news_client()).await;
            match query {
                Some(query) => {
                    let view = page.query(&query, now, locale);
                    ctx.emit("search", &view, markdown::render_search(&view, locale))
                        .await
                }
                None => interactive_search(&ctx, &page, locale).await,
            }
        }
    }
}

/// One query per stdin line until EOF.
async fn interactive_search(
    ctx: &PageContext,
    page: &search::SearchPage,
    locale: Locale,
) -> Result<(), PageError> {
    info!(corpus = page.corpus_len(), "Interactive search ready");
    let hint = page.query("", Utc::now(), locale);
    ctx.emit("search", &hint, markdown::render_search(&hint, locale))
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let view = page.query(&line, Utc::now(), locale);
        ctx.emit("search", &view, markdown::render_search(&view, locale))
            .await?;
    }
    Ok(())
}

/// Ask a yes/no question and read the answer from `input`. Anything but
/// "y"/"д" is no, and so is end of input.
///
/// `input` is shared by every prompt of a session, so lines buffered past
/// one answer are still there for the next.
async fn confirm<R, W>(input: &mut Lines<R>, out: &mut W, prompt: &str) -> Result<bool, PageError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(prompt.as_bytes()).await?;
    out.flush().await?;

    let Some(answer) = input.next_line().await? else {
        return Ok(false);
    };
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes" || answer == "д" || answer == "да")
}
