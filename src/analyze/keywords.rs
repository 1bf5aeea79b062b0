//! Keyword primitives: the article filter and the substring predicates
//! used by the phrase banks.

use crate::article::Article;

/// Articles whose lower-cased `title + " " + content` contains at least one keyword.
/// Input order is preserved.
pub fn filter_by_keywords<'a, S: AsRef<str>>(
    articles: &[&'a Article],
    keywords: &[S],
) -> Vec<&'a Article> {
    let needles: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if needles.is_empty() {
        return Vec::new();
    }
    articles
        .iter()
        .copied()
        .filter(|a| {
            let text = a.text().to_lowercase();
            needles.iter().any(|k| text.contains(k.as_str()))
        })
        .collect()
}

/// Case-sensitive "contains any" check.
pub fn contains_any<S: AsRef<str>>(text: &str, words: &[S]) -> bool {
    words.iter().any(|w| text.contains(w.as_ref()))
}

/// Substring predicate over a corpus, composable for phrase selection.
#[derive(Debug, Clone, Copy)]
pub enum Cond {
    Always,
    Any(&'static [&'static str]),
    All(&'static [Cond]),
}

impl Cond {
    pub fn holds(&self, text: &str) -> bool {
        match self {
            Cond::Always => true,
            Cond::Any(words) => contains_any(text, *words),
            Cond::All(conds) => conds.iter().all(|c| c.holds(text)),
        }
    }
}

/// Items of `words` present in `text`, in list order, at most `limit`.
pub fn present_in_order<S: AsRef<str>>(text: &str, words: &[S], limit: usize) -> Vec<String> {
    words
        .iter()
        .map(|w| w.as_ref())
        .filter(|w| text.contains(*w))
        .take(limit)
        .map(str::to_string)
        .collect()
}
