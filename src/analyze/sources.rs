//! Publisher ranking for title suffixes.

use crate::article::Article;
use std::collections::HashMap;

/// Top `limit` publisher labels by article count. Ties keep first-seen order.
pub fn top_sources(articles: &[&Article], limit: usize) -> Vec<String> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for &a in articles {
        let label = a.source_label();
        match index.get(label) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(label, order.len());
                order.push((label, 1));
            }
        }
    }

    // stable sort keeps insertion order among equal counts
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(limit)
        .map(|(s, _)| s.to_string())
        .collect()
}

/// ` [A·B·C 등 N건]`, or ` [N건]` when nothing is rankable.
pub fn source_suffix(articles: &[&Article], limit: usize) -> String {
    let sources = top_sources(articles, limit);
    if sources.is_empty() {
        format!(" [{}건]", articles.len())
    } else {
        format!(" [{} 등 {}건]", sources.join("·"), articles.len())
    }
}
