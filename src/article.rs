//! # Article
//! Immutable news item handed to the engine by the acquisition layer.
//!
//! The engine only ever borrows articles; nothing in `analyze` mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder publisher label used when an article has no `source`.
pub const UNKNOWN_SOURCE: &str = "기타";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Unique per source item.
    pub link: String,
    #[serde(default = "Utc::now")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub source: String,
}

impl Article {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            link: link.into(),
            published_at: Utc::now(),
            source: String::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = at;
        self
    }

    /// `title + " " + content`, the text every keyword check runs against.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }

    /// Publisher label, falling back to [`UNKNOWN_SOURCE`] for blank sources.
    pub fn source_label(&self) -> &str {
        let s = self.source.trim();
        if s.is_empty() {
            UNKNOWN_SOURCE
        } else {
            s
        }
    }
}

/// All article texts joined with a single space.
pub fn corpus(articles: &[&Article]) -> String {
    articles
        .iter()
        .map(|a| a.text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Titles only, joined with a single space (title heuristics look at headlines).
pub fn titles(articles: &[&Article]) -> String {
    articles
        .iter()
        .map(|a| a.title.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
