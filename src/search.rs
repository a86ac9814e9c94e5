//! Free-text search over an aggregated corpus.

use crate::models::Article;

/// Most results a single search returns.
pub const MAX_RESULTS: usize = 10;

/// Articles whose title, description or source name contain `query`,
/// ignoring case, in corpus order and capped at [`MAX_RESULTS`].
///
/// A blank query matches nothing: the search page shows a hint instead of
/// the whole corpus. Blankness is judged on the trimmed query, but matching
/// uses the query as typed.
pub fn search<'a>(corpus: &'a [Article], query: &str) -> Vec<&'a Article> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    corpus
        .iter()
        .filter(|article| matches(article, &needle))
        .take(MAX_RESULTS)
        .collect()
}

fn matches(article: &Article, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle)
        || article
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || article.source.name.to_lowercase().contains(needle)
}
