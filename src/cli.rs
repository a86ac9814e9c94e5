//! Command-line interface definitions for Viewpoint News.
//!
//! Every external input can be given as a flag or an environment variable;
//! a `.env` file in the working directory is loaded before parsing.
//! Each subcommand corresponds to one page of the reader.

use crate::config::Environment;
use crate::locale::Locale;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for Viewpoint News.
///
/// # Examples
///
/// ```sh
/// # Home feed: technology grid, science feed, top headlines
/// viewpoint_news home
///
/// # Science and education, three batches of six
/// viewpoint_news science --pages 3
///
/// # Current weather as JSON
/// viewpoint_news --format json weather --location Kazan
///
/// # Search across all feeds (interactive when no query is given)
/// viewpoint_news search квант
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// How pages are written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Also write each rendered page as JSON under this directory
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Language of the interface text
    #[arg(long, env = "UI_LOCALE", value_enum, default_value_t = Locale::Ru)]
    pub locale: Locale,

    /// Deployment environment
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Production)]
    pub app_env: Environment,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// NewsAPI base URL
    #[arg(long, env = "NEWS_API_BASE_URL", default_value = "https://newsapi.org/v2")]
    pub news_api_base_url: String,

    /// Language of the articles requested from NewsAPI
    #[arg(long, env = "NEWS_LANGUAGE", default_value = "ru")]
    pub news_language: String,

    /// Country for top headlines
    #[arg(long, env = "NEWS_COUNTRY", default_value = "ru")]
    pub news_country: String,

    /// WeatherAPI key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: Option<String>,

    /// WeatherAPI base URL
    #[arg(long, env = "WEATHER_API_BASE_URL", default_value = "http://api.weatherapi.com/v1")]
    pub weather_api_base_url: String,

    /// Location shown on the weather page
    #[arg(long, env = "WEATHER_LOCATION", default_value = "Moscow")]
    pub weather_location: String,

    /// Sentry DSN; error reporting is off when unset
    #[arg(long, env = "ERROR_REPORTING_DSN")]
    pub error_reporting_dsn: Option<String>,
}

/// Pages of the reader.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Technology grid, science feed and top headlines
    Home,

    /// Science and education news
    Science {
        /// Number of six-article batches to show
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Current weather
    Weather {
        /// Override the configured location
        #[arg(long)]
        location: Option<String>,

        /// Never ask to try again after a failure
        #[arg(long)]
        no_prompt: bool,
    },

    /// Search technology, science and top headlines
    Search {
        /// Query text; reads queries line by line from stdin when omitted
        query: Option<String>,
    },
}

impl Command {
    /// Route name used in logs, telemetry tags and output file names.
    pub fn route(&self) -> &'static str {
        match self {
            Command::Home => "home",
            Command::Science { .. } => "science",
            Command::Weather { .. } => "weather",
            Command::Search { .. } => "search",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "viewpoint_news",
            "--format",
            "json",
            "--json-output-dir",
            "./json",
            "science",
            "--pages",
            "3",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.json_output_dir.as_deref(), Some("./json"));
        assert_eq!(cli.command, Command::Science { pages: 3 });
        assert_eq!(cli.command.route(), "science");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["viewpoint_news", "-f", "markdown", "-j", "/tmp/json", "home"]);

        assert_eq!(cli.format, OutputFormat::Markdown);
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
        assert_eq!(cli.command, Command::Home);
    }

    #[test]
    fn test_search_query_is_optional() {
        let cli = Cli::parse_from(["viewpoint_news", "search"]);
        assert_eq!(cli.command, Command::Search { query: None });

        let cli = Cli::parse_from(["viewpoint_news", "search", "квант"]);
        assert_eq!(
            cli.command,
            Command::Search {
                query: Some("квант".to_string())
            }
        );
    }

    #[test]
    fn test_weather_flags() {
        let cli = Cli::parse_from([
            "viewpoint_news",
            "--locale",
            "en",
            "weather",
            "--location",
            "Kazan",
            "--no-prompt",
        ]);
        assert_eq!(cli.locale, Locale::En);
        assert_eq!(
            cli.command,
            Command::Weather {
                location: Some("Kazan".to_string()),
                no_prompt: true
            }
        );
    }
}
