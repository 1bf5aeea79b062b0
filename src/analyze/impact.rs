//! Severity of an IT topic. First matching rule wins:
//! critical vocabulary → high-impact vocabulary → batch size → minor.

use crate::analyze::keywords::contains_any;
use crate::analyze::params::ImpactVocab;
use crate::article::{corpus, Article};
use crate::insight::ImpactLevel;

pub fn assess_impact(
    articles: &[&Article],
    vocab: &ImpactVocab,
    moderate_min_articles: usize,
) -> ImpactLevel {
    let text = corpus(articles).to_lowercase();
    let lowered = |words: &[String]| -> Vec<String> {
        words.iter().map(|w| w.to_lowercase()).collect()
    };

    if contains_any(&text, &lowered(&vocab.critical)) {
        return ImpactLevel::Critical;
    }
    if contains_any(&text, &lowered(&vocab.high)) {
        return ImpactLevel::Significant;
    }
    if articles.len() >= moderate_min_articles {
        return ImpactLevel::Moderate;
    }
    ImpactLevel::Minor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(titles: &[&str]) -> ImpactLevel {
        let a: Vec<Article> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| Article::new(*t, format!("l{i}")))
            .collect();
        let refs: Vec<&Article> = a.iter().collect();
        assess_impact(&refs, &ImpactVocab::default(), 5)
    }

    #[test]
    fn critical_wins_regardless_of_count() {
        assert_eq!(run(&["서비스 마비", "혁신적 업데이트"]), ImpactLevel::Critical);
    }

    #[test]
    fn high_impact_then_batch_size_then_minor() {
        assert_eq!(run(&["획기적 신제품", "출시"]), ImpactLevel::Significant);
        assert_eq!(run(&["a", "b", "c", "d", "e"]), ImpactLevel::Moderate);
        assert_eq!(run(&["a", "b"]), ImpactLevel::Minor);
    }

    #[test]
    fn configured_vocabulary_matches_regardless_of_case() {
        let a = [Article::new("AWS Outage hits Korea", "l0"), Article::new("x", "l1")];
        let refs: Vec<&Article> = a.iter().collect();
        let vocab = ImpactVocab {
            critical: vec!["Outage".into()],
            high: vec!["ROLLOUT".into()],
        };
        assert_eq!(assess_impact(&refs, &vocab, 5), ImpactLevel::Critical);

        let b = [Article::new("Global rollout of the new API", "l0")];
        let refs: Vec<&Article> = b.iter().collect();
        assert_eq!(assess_impact(&refs, &vocab, 5), ImpactLevel::Significant);
    }
}
