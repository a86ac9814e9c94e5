//! Markdown rendering of each page for the terminal.
//!
//! Renderers are pure: they take a settled (or still loading) page and
//! return the text to print. Every [`ViewState`] is rendered explicitly, so
//! a failed section shows its message next to the sections that loaded.

use crate::locale::{Locale, Msg};
use crate::pages::boundary::CrashScreen;
use crate::pages::home::HomePage;
use crate::pages::science::{SciencePage, BATCH};
use crate::pages::search::{SearchOutcome, SearchView};
use crate::pages::weather::WeatherPage;
use crate::pages::{ArticleCard, ViewState};
use std::fmt::{self, Write};

/// Writing into a `String` cannot fail; the `fmt::Result` is discarded.
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut md = String::new();
    let _ = write(&mut md);
    md
}

pub fn render_home(page: &HomePage, locale: Locale) -> String {
    render(|md| {
        writeln!(md, "# {}\n", locale.text(Msg::SiteTitle))?;
        writeln!(md, "## {}\n", locale.text(Msg::TopNews))?;
        section(md, &page.carousel, locale, card_line)?;
        writeln!(md, "## {}\n", locale.text(Msg::TechNews))?;
        section(md, &page.grid, locale, card_block)?;
        writeln!(md, "## {}\n", locale.text(Msg::ImportantNews))?;
        section(md, &page.text_feed, locale, card_block)
    })
}

pub fn render_science(page: &SciencePage, locale: Locale) -> String {
    render(|md| {
        writeln!(md, "# {}\n", locale.text(Msg::ScienceTitle))?;
        match &page.state {
            ViewState::Ready(_) => {
                let cards = page.visible_articles();
                if cards.is_empty() {
                    writeln!(md, "_{}_\n", locale.text(Msg::NothingFound))?;
                }
                for card in cards {
                    card_block(md, card)?;
                }
                if page.has_more() {
                    let next = page.visible / BATCH + 1;
                    writeln!(md, "_{} {next}_", locale.text(Msg::MoreAvailable))?;
                }
                Ok(())
            }
            state => placeholder(md, state, locale),
        }
    })
}

pub fn render_weather(page: &WeatherPage, locale: Locale) -> String {
    render(|md| {
        writeln!(md, "# {}: {}\n", locale.text(Msg::WeatherTitle), page.location)?;
        let view = match &page.state {
            ViewState::Ready(view) => view,
            state => return placeholder(md, state, locale),
        };
        let s = &view.snapshot;
        writeln!(md, "**{}, {}** ({})\n", s.location, s.country, s.local_time)?;
        writeln!(
            md,
            "{} **{}°C** {}\n",
            view.icon.glyph(),
            s.temperature_c.round(),
            s.condition
        )?;
        writeln!(md, "- {}: {}°C", locale.text(Msg::FeelsLike), s.feels_like_c.round())?;
        writeln!(md, "- {}: {}%", locale.text(Msg::Humidity), s.humidity)?;
        writeln!(md, "- {}: {} km/h {}", locale.text(Msg::Wind), s.wind_kph, s.wind_dir)?;
        writeln!(md, "- {}: {} mb", locale.text(Msg::Pressure), s.pressure_mb)?;
        writeln!(md, "- {}: {} km", locale.text(Msg::Visibility), s.visibility_km)?;
        writeln!(md, "- {}: {}", locale.text(Msg::UvIndex), s.uv_index)
    })
}

pub fn render_search(view: &SearchView, locale: Locale) -> String {
    render(|md| {
        writeln!(md, "# {}\n", locale.text(Msg::SearchTitle))?;
        match &view.outcome {
            SearchOutcome::Hint { message } | SearchOutcome::NoResults { message } => {
                writeln!(md, "_{message}_")
            }
            SearchOutcome::Results { articles } => {
                for card in articles {
                    card_line(md, card)?;
                }
                Ok(())
            }
        }
    })
}

/// Heading plus loading placeholder, shown while a page's data is fetched.
pub fn render_loading(title: Msg, locale: Locale) -> String {
    render(|md| {
        writeln!(md, "# {}\n", locale.text(title))?;
        placeholder(md, &ViewState::<()>::Loading, locale)
    })
}

pub fn render_crash(crash: &CrashScreen, locale: Locale) -> String {
    render(|md| {
        writeln!(md, "# {}\n", crash.apology(locale))?;
        writeln!(md, "{}", crash.reset_hint(locale))?;
        if let Some(details) = &crash.details {
            writeln!(md, "\n```text\n{details}\n```")?;
        }
        Ok(())
    })
}

fn section(
    md: &mut String,
    state: &ViewState<Vec<ArticleCard>>,
    locale: Locale,
    card: fn(&mut String, &ArticleCard) -> fmt::Result,
) -> fmt::Result {
    match state {
        ViewState::Ready(cards) if cards.is_empty() => {
            writeln!(md, "_{}_\n", locale.text(Msg::NothingFound))
        }
        ViewState::Ready(cards) => {
            for c in cards {
                card(md, c)?;
            }
            writeln!(md)
        }
        state => placeholder(md, state, locale),
    }
}

/// Loading and error states; an error offers the retry hint.
fn placeholder<T>(md: &mut String, state: &ViewState<T>, locale: Locale) -> fmt::Result {
    match state {
        ViewState::Loading => writeln!(md, "_{}_\n", locale.text(Msg::Loading)),
        ViewState::Error(message) => {
            writeln!(md, "> {message}\n>\n> {}\n", locale.text(Msg::TryAgain))
        }
        ViewState::Ready(_) => Ok(()),
    }
}

fn card_line(md: &mut String, card: &ArticleCard) -> fmt::Result {
    writeln!(
        md,
        "- [{}]({}) · {} · {}",
        card.title, card.url, card.source, card.time_ago
    )
}

fn card_block(md: &mut String, card: &ArticleCard) -> fmt::Result {
    writeln!(md, "### [{}]({})\n", card.title, card.url)?;
    writeln!(md, "`{}` · {} · {}\n", card.category, card.source, card.time_ago)?;
    if let Some(image) = &card.image {
        writeln!(md, "![]({image})\n")?;
    }
    if let Some(description) = &card.description {
        writeln!(md, "{description}\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::article;
    use chrono::{TimeZone, Utc};

    fn cards(n: usize) -> Vec<ArticleCard> {
        let now = Utc.with_ymd_and_hms(2025, 6, 8, 12, 0, 0).unwrap();
        let articles: Vec<_> = (0..n)
            .map(|i| article(&format!("https://m.test/{i}"), &format!("Квантовый чип {i}")))
            .collect();
        ArticleCard::from_all(&articles, now, Locale::Ru)
    }

    #[test]
    fn test_home_renders_each_section_state() {
        let page = HomePage {
            grid: ViewState::Ready(cards(2)),
            text_feed: ViewState::Loading,
            carousel: ViewState::Error("Не удалось загрузить новости".to_string()),
        };
        let md = render_home(&page, Locale::Ru);

        assert!(md.starts_with("# Точка зрения"));
        assert!(md.contains("### [Квантовый чип 0](https://m.test/0)"));
        assert!(md.contains("`Quantum`"));
        assert!(md.contains("Загрузка…"));
        assert!(md.contains("> Не удалось загрузить новости"));
        assert!(md.contains("Попробовать снова"));
    }

    #[test]
    fn test_science_shows_only_visible_batch() {
        let page = SciencePage {
            state: ViewState::Ready(cards(8)),
            visible: 6,
        };
        let md = render_science(&page, Locale::En);
        assert!(md.contains("Квантовый чип 5"));
        assert!(!md.contains("Квантовый чип 6"));
        assert!(md.contains("Show more: --pages 2"));
    }

    #[test]
    fn test_weather_rounds_temperatures() {
        use crate::clients::weather::tests::settings;
        use crate::clients::weather::{WeatherClient, WeatherIcon};
        use crate::models::WeatherSnapshot;
        use crate::pages::weather::WeatherView;

        let settings = settings("http://x.test".into());
        let client = WeatherClient::new(reqwest::Client::new(), &settings);
        let mut page = WeatherPage::new(client, "Moscow".to_string());
        page.state = ViewState::Ready(WeatherView {
            snapshot: WeatherSnapshot {
                location: "Moscow".to_string(),
                country: "Russia".to_string(),
                local_time: "2025-06-08 14:05".to_string(),
                temperature_c: 21.6,
                feels_like_c: 20.4,
                condition: "Partly cloudy".to_string(),
                condition_icon: String::new(),
                humidity: 71,
                wind_kph: 9.4,
                wind_dir: "SW".to_string(),
                pressure_mb: 1012.0,
                visibility_km: 10.0,
                uv_index: 3.0,
            },
            icon: WeatherIcon::Cloud,
        });
        let md = render_weather(&page, Locale::En);
        assert!(md.contains("☁ **22°C** Partly cloudy"));
        assert!(md.contains("- Feels like: 20°C"));
        assert!(md.contains("- Humidity: 71%"));

        page.state = ViewState::Error(Locale::En.text(Msg::WeatherError).to_string());
        let md = render_weather(&page, Locale::En);
        assert!(md.contains("> Could not load weather data"));
        assert!(md.contains("Try again"));
    }

    #[test]
    fn test_search_outcomes() {
        let hint = SearchView {
            query: String::new(),
            outcome: SearchOutcome::Hint {
                message: Locale::En.text(Msg::StartTyping).to_string(),
            },
        };
        assert!(render_search(&hint, Locale::En).contains("_Start typing to search the news_"));

        let results = SearchView {
            query: "чип".to_string(),
            outcome: SearchOutcome::Results { articles: cards(1) },
        };
        let md = render_search(&results, Locale::En);
        assert!(md.contains("- [Квантовый чип 0](https://m.test/0) · Test Source"));
    }

    #[test]
    fn test_loading_screen() {
        assert_eq!(
            render_loading(Msg::ScienceTitle, Locale::En),
            "# Science and education\n\n_Loading…_\n\n"
        );
    }

    #[test]
    fn test_crash_details_only_when_present() {
        let mut crash = CrashScreen {
            route: "home",
            details: None,
        };
        assert!(!render_crash(&crash, Locale::En).contains("```"));
        crash.details = Some("boom".to_string());
        let md = render_crash(&crash, Locale::En);
        assert!(md.contains("Something went wrong"));
        assert!(md.contains("boom"));
    }
}
