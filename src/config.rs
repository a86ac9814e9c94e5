//! Runtime settings resolved from the command line and environment.
//!
//! [`Settings`] is built once in `main` from the parsed [`Cli`](crate::cli::Cli)
//! (which itself falls back to environment variables, optionally loaded from a
//! `.env` file) and then handed to the clients and pages.

use crate::cli::Cli;
use crate::locale::Locale;
use clap::ValueEnum;
use serde::Serialize;

/// Deployment environment. Development shows panic details and keeps
/// telemetry events local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// News endpoint configuration.
#[derive(Debug, Clone)]
pub struct NewsSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub country: String,
}

/// Weather endpoint configuration.
#[derive(Debug, Clone)]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub location: String,
}

/// Everything the composition root needs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub news: NewsSettings,
    pub weather: WeatherSettings,
    pub environment: Environment,
    pub locale: Locale,
    pub error_reporting_dsn: Option<String>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            news: NewsSettings {
                api_key: non_blank(cli.news_api_key.as_deref()),
                base_url: cli.news_api_base_url.clone(),
                language: cli.news_language.clone(),
                country: cli.news_country.clone(),
            },
            weather: WeatherSettings {
                api_key: non_blank(cli.weather_api_key.as_deref()),
                base_url: cli.weather_api_base_url.clone(),
                location: cli.weather_location.clone(),
            },
            environment: cli.app_env,
            locale: cli.locale,
            error_reporting_dsn: non_blank(cli.error_reporting_dsn.as_deref()),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
