// src/ingest/mod.rs
//! News acquisition: the [`NewsSource`] contract plus cross-source merging.
//!
//! `collect_batch` asks every source for a domain's articles, logs and skips
//! sources that fail, orders the result newest first and drops duplicates by
//! link and by normalized title.

pub mod rss;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, describe_counter};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::article::Article;
use crate::insight::Domain;

pub use crate::ingest::rss::RssSource;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_articles_total", "Articles kept after merge + dedup.");
        describe_counter!(
            "ingest_dedup_total",
            "Articles removed as duplicate link or title."
        );
        describe_counter!("ingest_source_errors_total", "News source fetch/parse errors.");
    });
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_news(&self, domain: Domain) -> Result<Vec<Article>>;
    fn name(&self) -> &str;
}

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static RE_TITLE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s가-힣]").expect("title punct regex"));

/// Feed text → plain text: decode entities, strip tags, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    let stripped = RE_TAGS.replace_all(&decoded, " ");
    RE_WS.replace_all(&stripped, " ").trim().to_string()
}

/// Title key for duplicate detection: lower-cased, symbols removed, whitespace collapsed.
pub fn normalize_title(title: &str) -> String {
    let lower = title.to_lowercase();
    let no_punct = RE_TITLE_PUNCT.replace_all(&lower, "");
    RE_WS.replace_all(&no_punct, " ").trim().to_string()
}

/// Newest first; on equal timestamps input order is kept.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Keep the first article per link and per normalized title.
/// Returns (kept, removed count).
pub fn dedup_articles(articles: Vec<Article>) -> (Vec<Article>, usize) {
    let mut seen_links: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(articles.len());
    let mut removed = 0usize;

    for a in articles {
        let key = normalize_title(&a.title);
        if seen_links.contains(&a.link) || seen_titles.contains(&key) {
            removed += 1;
            continue;
        }
        seen_links.insert(a.link.clone());
        seen_titles.insert(key);
        kept.push(a);
    }
    (kept, removed)
}

/// Query every source for `domain`, merge, order and dedup.
/// A failing source is logged and counted; it never fails the batch.
pub async fn collect_batch(sources: &[Box<dyn NewsSource>], domain: Domain) -> Vec<Article> {
    ensure_metrics_described();

    let mut raw = Vec::new();
    for s in sources {
        match s.fetch_news(domain).await {
            Ok(mut v) => {
                tracing::debug!(target: "ingest", source = s.name(), %domain, fetched = v.len(), "source ok");
                raw.append(&mut v);
            }
            Err(e) => {
                tracing::warn!(target: "ingest", error = ?e, source = s.name(), %domain, "source error");
                counter!("ingest_source_errors_total").increment(1);
            }
        }
    }

    sort_newest_first(&mut raw);
    let (kept, dedup_cnt) = dedup_articles(raw);

    counter!("ingest_articles_total").increment(kept.len() as u64);
    counter!("ingest_dedup_total").increment(dedup_cnt as u64);
    tracing::info!(target: "ingest", %domain, kept = kept.len(), dedup = dedup_cnt, "batch collected");

    kept
}

/// Articles per domain read from a JSON document:
/// `{ "economy": [Article...], "it": [Article...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureSource {
    #[serde(default)]
    economy: Vec<Article>,
    #[serde(default)]
    it: Vec<Article>,
}

impl FixtureSource {
    pub fn new(economy: Vec<Article>, it: Vec<Article>) -> Self {
        Self { economy, it }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parsing article fixture json")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading article fixture {}", path.display()))?;
        Self::from_json(&s)
    }
}

#[async_trait]
impl NewsSource for FixtureSource {
    async fn fetch_news(&self, domain: Domain) -> Result<Vec<Article>> {
        Ok(match domain {
            Domain::Economy => self.economy.clone(),
            Domain::It => self.it.clone(),
        })
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_decodes_and_strips() {
        let s = "  <p>환율&nbsp;&amp; 금리</p>\n<b>급등</b> ";
        assert_eq!(normalize_text(s), "환율 & 금리 급등");
    }

    #[test]
    fn title_key_ignores_case_and_symbols() {
        assert_eq!(
            normalize_title("[속보]  KOSPI, 2,600선 회복!"),
            normalize_title("속보 kospi 2600선   회복")
        );
    }

    #[test]
    fn dedup_by_link_and_title() {
        let v = vec![
            Article::new("환율 급등", "a"),
            Article::new("환율 급등!", "b"),
            Article::new("다른 기사", "a"),
            Article::new("금리 동결", "c"),
        ];
        let (kept, removed) = dedup_articles(v);
        let links: Vec<&str> = kept.iter().map(|a| a.link.as_str()).collect();
        assert_eq!(links, vec!["a", "c"]);
        assert_eq!(removed, 2);
    }

    #[test]
    fn fixture_json_splits_domains() {
        let f = FixtureSource::from_json(
            r#"{"economy":[{"title":"환율","link":"x"}],"it":[]}"#,
        )
        .unwrap();
        assert_eq!(f.economy.len(), 1);
        assert!(f.it.is_empty());
    }
}
