//! Interface text in Russian (the default) and English.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ru,
    En,
}

/// Every fixed piece of interface text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    SiteTitle,
    TopNews,
    TechNews,
    ImportantNews,
    ScienceTitle,
    WeatherTitle,
    SearchTitle,
    Loading,
    NewsError,
    ScienceError,
    WeatherError,
    TryAgain,
    TryAgainPrompt,
    NothingFound,
    StartTyping,
    FeelsLike,
    Humidity,
    Wind,
    Pressure,
    Visibility,
    UvIndex,
    MoreAvailable,
    Apology,
    ApologyReset,
}

impl Locale {
    pub fn text(self, msg: Msg) -> &'static str {
        match self {
            Locale::Ru => ru(msg),
            Locale::En => en(msg),
        }
    }

    /// "Nothing found for <query>" line of the search page.
    pub fn no_results_for(self, query: &str) -> String {
        match self {
            Locale::Ru => format!("Новости по запросу \"{query}\" не найдены"),
            Locale::En => format!("No news found for \"{query}\""),
        }
    }
}

fn ru(msg: Msg) -> &'static str {
    match msg {
        Msg::SiteTitle => "Точка зрения",
        Msg::TopNews => "Главные новости",
        Msg::TechNews => "Новости технологий",
        Msg::ImportantNews => "Важные новости",
        Msg::ScienceTitle => "Наука и образование",
        Msg::WeatherTitle => "Погода",
        Msg::SearchTitle => "Поиск новостей",
        Msg::Loading => "Загрузка…",
        Msg::NewsError => "Не удалось загрузить новости",
        Msg::ScienceError => "Не удалось загрузить новости науки и образования",
        Msg::WeatherError => "Ошибка загрузки данных о погоде",
        Msg::TryAgain => "Попробовать снова",
        Msg::TryAgainPrompt => "Попробовать снова? [y/N] ",
        Msg::NothingFound => "Новости не найдены",
        Msg::StartTyping => "Начните вводить для поиска новостей",
        Msg::FeelsLike => "Ощущается как",
        Msg::Humidity => "Влажность",
        Msg::Wind => "Ветер",
        Msg::Pressure => "Давление",
        Msg::Visibility => "Видимость",
        Msg::UvIndex => "УФ-индекс",
        Msg::MoreAvailable => "Показать ещё: --pages",
        Msg::Apology => "Что-то пошло не так. Приносим извинения.",
        Msg::ApologyReset => "Запустите команду ещё раз.",
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::SiteTitle => "Viewpoint",
        Msg::TopNews => "Top stories",
        Msg::TechNews => "Technology news",
        Msg::ImportantNews => "Important news",
        Msg::ScienceTitle => "Science and education",
        Msg::WeatherTitle => "Weather",
        Msg::SearchTitle => "Search news",
        Msg::Loading => "Loading…",
        Msg::NewsError => "Could not load the news",
        Msg::ScienceError => "Could not load science and education news",
        Msg::WeatherError => "Could not load weather data",
        Msg::TryAgain => "Try again",
        Msg::TryAgainPrompt => "Try again? [y/N] ",
        Msg::NothingFound => "No news found",
        Msg::StartTyping => "Start typing to search the news",
        Msg::FeelsLike => "Feels like",
        Msg::Humidity => "Humidity",
        Msg::Wind => "Wind",
        Msg::Pressure => "Pressure",
        Msg::Visibility => "Visibility",
        Msg::UvIndex => "UV index",
        Msg::MoreAvailable => "Show more: --pages",
        Msg::Apology => "Something went wrong. We are sorry.",
        Msg::ApologyReset => "Run the command again.",
    }
}

/// Russian noun form for a count: 1, 2-4, everything else.
fn ru_plural(n: i64, one: &'static str, few: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else if n < 5 {
        few
    } else {
        many
    }
}

/// Relative age of a timestamp: under an hour is "just now", under a day
/// counts hours, anything older counts days. Future timestamps read as
/// "just now".
pub fn format_time_ago(published: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let hours = (now - published).num_hours();

    if hours < 1 {
        return match locale {
            Locale::Ru => "Только что".to_string(),
            Locale::En => "Just now".to_string(),
        };
    }

    if hours < 24 {
        return match locale {
            Locale::Ru => format!("{hours} {} назад", ru_plural(hours, "час", "часа", "часов")),
            Locale::En if hours == 1 => "1 hour ago".to_string(),
            Locale::En => format!("{hours} hours ago"),
        };
    }

    let days = hours / 24;
    match locale {
        Locale::Ru => format!("{days} {} назад", ru_plural(days, "день", "дня", "дней")),
        Locale::En if days == 1 => "1 day ago".to_string(),
        Locale::En => format!("{days} days ago"),
    }
}
