//! # Viewpoint News
//!
//! A terminal news and weather reader backed by NewsAPI and WeatherAPI.
//!
//! ## Features
//!
//! - Home page: technology grid, science text feed and a top-headlines carousel
//! - Science and education feed revealed in batches of six
//! - Current weather with a retry prompt after a failure
//! - Search across technology, science and headlines, deduplicated by url
//! - Keyword categorisation of every article (AI, Quantum, Space, ...)
//! - Optional error reporting to Sentry
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... WEATHER_API_KEY=... viewpoint_news home
//! viewpoint_news --format json -j ./json search квант
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: `.env`, environment and flags resolve into [`config::Settings`]
//! 2. **Fetching**: [`clients`] talk to the external APIs
//! 3. **Pages**: [`pages`] turn fetch results into loading / error / ready views
//! 4. **Output**: [`outputs`] render views as Markdown or JSON
//!
//! Logs go to stderr so stdout only carries rendered pages.

use clap::Parser;
use tracing::{debug, error, info, instrument};
use sentry_tracing::EventFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod aggregate;
mod categorize;
mod cli;
mod clients;
mod config;
mod error;
mod locale;
mod models;
mod outputs;
mod pages;
mod search;
mod telemetry;
mod utils;

use cli::Cli;
use config::Settings;
use pages::{PageContext, PageError};
use telemetry::{Telemetry, TelemetryConfig};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), PageError> {
    // A missing .env file is fine; the environment may already be set.
    let dotenv = dotenvy::dotenv();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .finish()
        .with(sentry_breadcrumbs())
        .init();

    let start_time = std::time::Instant::now();
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env loaded"),
    }

    let args = Cli::parse();
    let settings = Settings::from_cli(&args);
    info!(
        route = args.command.route(),
        environment = settings.environment.as_str(),
        locale = ?settings.locale,
        "viewpoint_news starting up"
    );

    let http = clients::http_client()?;
    let telemetry = Telemetry::init(TelemetryConfig {
        dsn: settings.error_reporting_dsn.clone(),
        environment: settings.environment,
        release: env!("CARGO_PKG_VERSION"),
    });
    debug!(sending = telemetry.is_sending(), "Telemetry ready");

    let ctx = PageContext {
        settings,
        telemetry: telemetry.clone(),
        http,
        format: args.format,
        json_output_dir: args.json_output_dir,
    };
    let result = pages::run(args.command, ctx).await;

    if let Err(e) = &result {
        error!(error = %e, "Page failed");
    }
    telemetry.shutdown().await;

    let elapsed = start_time.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        elapsed_secs = elapsed.as_secs_f64(),
        "viewpoint_news finished"
    );
    result
}

/// Log lines at info and above become Sentry breadcrumbs. Errors are reported
/// explicitly through [`Telemetry`], so none of them become events here.
fn sentry_breadcrumbs<S>() -> sentry_tracing::SentryLayer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    sentry_tracing::layer()
        .event_filter(|md| match *md.level() {
            tracing::Level::ERROR | tracing::Level::WARN | tracing::Level::INFO => {
                EventFilter::Breadcrumb
            }
            _ => EventFilter::Ignore,
        })
        .span_filter(|_| false)
}
