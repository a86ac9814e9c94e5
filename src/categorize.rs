//! Keyword categorizer for articles.
//!
//! Each article gets exactly one label from a closed set. The label is derived
//! from the lowercased title and description by walking an ordered rule table;
//! the first rule whose predicate matches wins, and [`Category::Technology`] is
//! the fallback when nothing matches.
//!
//! Keywords come in two kinds:
//! - **stems**, matched as substrings (`"исследован"` covers every inflection)
//! - **abbreviations**, matched only as whole words (`"ai"`, `"space"`), since
//!   as substrings they would hit ordinary English words such as "said"
//!
//! Every Russian keyword is a stem, `"ии"` included. It therefore also matches
//! inside words ending in "-ии", so "Новые технологии" is labelled
//! [`Category::AI`].

use crate::models::Article;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

/// Display label attached to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    AI,
    Quantum,
    Space,
    Cyber,
    Blockchain,
    Science,
    Education,
    Technology,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::AI => "AI",
            Category::Quantum => "Quantum",
            Category::Space => "Space",
            Category::Cyber => "Cyber",
            Category::Blockchain => "Blockchain",
            Category::Science => "Science",
            Category::Education => "Education",
            Category::Technology => "Technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// One row of the rule table: a predicate over lowercased text and the label
/// it assigns.
pub struct CategoryRule {
    pub label: Category,
    matches: Predicate,
}

impl CategoryRule {
    /// A rule matching any of the stems as a substring or any of the
    /// abbreviations as a whole word.
    pub fn keywords(
        label: Category,
        stems: &'static [&'static str],
        abbreviations: &'static [&'static str],
    ) -> Self {
        Self {
            label,
            matches: Box::new(move |text: &str| {
                stems.iter().any(|stem| text.contains(stem))
                    || text
                        .split(|c: char| !c.is_alphanumeric())
                        .any(|word| abbreviations.contains(&word))
            }),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        (self.matches)(text)
    }
}

impl fmt::Debug for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryRule")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Ordered rule table. Order matters: an article about AI security lands in
/// `AI`, not `Cyber`.
pub static RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    vec![
        CategoryRule::keywords(
            Category::AI,
            &[
                "ии",
                "искусственный интеллект",
                "машинное обучение",
                "artificial intelligence",
                "machine learning",
            ],
            &["ai"],
        ),
        CategoryRule::keywords(
            Category::Quantum,
            &["квант", "вычисления", "quantum", "computing"],
            &[],
        ),
        CategoryRule::keywords(
            Category::Space,
            &["космос", "роскосмос", "ракета", "rocket", "nasa", "spacecraft"],
            &["space"],
        ),
        CategoryRule::keywords(
            Category::Cyber,
            &["кибер", "безопасность", "хакер", "cyber", "security", "hacker"],
            &[],
        ),
        CategoryRule::keywords(
            Category::Blockchain,
            &["блокчейн", "криптовалют", "blockchain", "cryptocurrenc"],
            &[],
        ),
        CategoryRule::keywords(
            Category::Science,
            &["наука", "исследован", "science", "research"],
            &[],
        ),
        CategoryRule::keywords(
            Category::Education,
            &["образован", "университет", "education", "universit"],
            &[],
        ),
    ]
});

/// Label for arbitrary text against an explicit rule table.
pub fn categorize_text(rules: &[CategoryRule], text: &str) -> Category {
    let text = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&text))
        .map(|rule| rule.label)
        .unwrap_or(Category::Technology)
}

/// Label for an article, from its title and description.
pub fn categorize(article: &Article) -> Category {
    let text = format!("{} {}", article.title, article.description_text());
    categorize_text(&RULES, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::article;

    fn with_text(title: &str, description: Option<&str>) -> Article {
        let mut a = article("https://example.com/a", title);
        a.description = description.map(str::to_string);
        a
    }

    #[test]
    fn test_russian_keywords() {
        let cases = [
            ("Искусственный интеллект пишет код", Category::AI),
            ("Квантовый компьютер Google", Category::Quantum),
            ("Роскосмос запустил спутник", Category::Space),
            ("Хакеры атаковали банк", Category::Cyber),
            ("Курс криптовалюты вырос", Category::Blockchain),
            ("Наука о сне", Category::Science),
            ("Новый университет открылся", Category::Education),
        ];
        for (title, expected) in cases {
            assert_eq!(categorize(&with_text(title, None)), expected, "{title}");
        }
    }

    #[test]
    fn test_english_keywords() {
        assert_eq!(categorize(&with_text("NASA tests new rocket", None)), Category::Space);
        assert_eq!(categorize(&with_text("How AI changes search", None)), Category::AI);
        assert_eq!(
            categorize(&with_text("Bitcoin", Some("Blockchain upgrade ships"))),
            Category::Blockchain
        );
    }

    #[test]
    fn test_russian_ii_matches_inside_words() {
        // "технологии" ends in "ии"
        assert_eq!(
            categorize(&with_text("Новые технологии в медицине", None)),
            Category::AI
        );
        assert_eq!(categorize(&with_text("ИИ в медицине", None)), Category::AI);
        assert_eq!(
            categorize(&with_text("Смартфоны", Some("Итоги презентации"))),
            Category::AI
        );
    }

    #[test]
    fn test_english_abbreviations_match_whole_words_only() {
        // "said" contains "ai", "spacebar" contains "space"
        assert_eq!(categorize(&with_text("He said hello", None)), Category::Technology);
        assert_eq!(categorize(&with_text("A new spacebar", None)), Category::Technology);
        assert_eq!(categorize(&with_text("Space tourism grows", None)), Category::Space);
        assert_eq!(categorize(&with_text("AI-written code", None)), Category::AI);
    }

    #[test]
    fn test_first_match_wins() {
        // Matches both the AI and Cyber rules; AI comes first.
        let a = with_text("Машинное обучение и безопасность", None);
        assert_eq!(categorize(&a), Category::AI);
    }

    #[test]
    fn test_description_is_considered() {
        let a = with_text("Главное за день", Some("Исследование показало"));
        assert_eq!(categorize(&a), Category::Science);
    }

    #[test]
    fn test_default_is_technology() {
        let a = with_text("Смартфоны подешевели", None);
        assert_eq!(categorize(&a), Category::Technology);
        assert_eq!(categorize_text(&[], "anything at all"), Category::Technology);
    }

    #[test]
    fn test_deterministic() {
        let a = with_text("Quantum research at the university", Some("space"));
        let first = categorize(&a);
        for _ in 0..10 {
            assert_eq!(categorize(&a), first);
        }
        assert_eq!(first, Category::Quantum);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::AI.to_string(), "AI");
        assert_eq!(Category::Technology.label(), "Technology");
    }
}
