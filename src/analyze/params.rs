//! Named thresholds and vocabularies for the rule engine.
//!
//! JSON/TOML shape (every field optional):
//! ```toml
//! min_batch_size = 5
//! dominance_ratio = 1.5
//! [direction]
//! up = ["상승", "급등"]
//! down = ["하락", "급락"]
//! [impact]
//! critical = ["마비"]
//! high = ["혁신"]
//! ```

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerParams {
    /// A domain batch smaller than this yields no insights.
    pub min_batch_size: usize,
    /// One direction wins only if its count exceeds the other's times this ratio.
    pub dominance_ratio: f64,
    pub max_causes: usize,
    pub max_effects: usize,
    /// Cap for tags, technologies and action items.
    pub max_list_items: usize,
    pub max_source_urls: usize,
    pub max_title_sources: usize,
    pub high_priority_min_articles: usize,
    pub medium_priority_min_articles: usize,
    pub moderate_impact_min_articles: usize,
    pub direction: DirectionVocab,
    pub impact: ImpactVocab,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            min_batch_size: 5,
            dominance_ratio: 1.5,
            max_causes: 5,
            max_effects: 5,
            max_list_items: 5,
            max_source_urls: 3,
            max_title_sources: 3,
            high_priority_min_articles: 10,
            medium_priority_min_articles: 5,
            moderate_impact_min_articles: 5,
            direction: DirectionVocab::default(),
            impact: ImpactVocab::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DirectionVocab {
    pub up: Vec<String>,
    pub down: Vec<String>,
}

impl Default for DirectionVocab {
    fn default() -> Self {
        Self {
            up: strings(&["상승", "급등", "오름", "증가", "강세", "호조", "플러스"]),
            down: strings(&["하락", "급락", "떨어", "감소", "약세", "부진", "마이너스"]),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImpactVocab {
    pub critical: Vec<String>,
    pub high: Vec<String>,
}

impl Default for ImpactVocab {
    fn default() -> Self {
        Self {
            critical: strings(&["긴급", "심각", "위기", "중단", "마비"]),
            high: strings(&["혁신", "혁명", "획기적", "급증", "폭발", "대규모"]),
        }
    }
}

impl AnalyzerParams {
    /// Parameter hygiene: zero caps/ratios would silently disable whole outputs.
    pub fn sanitized(mut self) -> Self {
        if !self.dominance_ratio.is_finite() || self.dominance_ratio < 1.0 {
            self.dominance_ratio = 1.0;
        }
        self.max_causes = self.max_causes.max(1);
        self.max_effects = self.max_effects.max(1);
        self.max_list_items = self.max_list_items.max(1);
        self.max_source_urls = self.max_source_urls.max(1);
        self.max_title_sources = self.max_title_sources.max(1);
        self
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let p: AnalyzerParams = toml::from_str(
            r#"
dominance_ratio = 2.0
[impact]
critical = ["장애"]
"#,
        )
        .unwrap();
        assert!((p.dominance_ratio - 2.0).abs() < f64::EPSILON);
        assert_eq!(p.min_batch_size, 5);
        assert_eq!(p.impact.critical, vec!["장애".to_string()]);
        // untouched half of a table falls back to its default
        assert!(p.impact.high.contains(&"혁신".to_string()));
        assert_eq!(p.direction, DirectionVocab::default());
    }

    #[test]
    fn sanitized_clamps_degenerate_values() {
        let p = AnalyzerParams {
            dominance_ratio: 0.2,
            max_causes: 0,
            ..Default::default()
        }
        .sanitized();
        assert!((p.dominance_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(p.max_causes, 1);
    }
}
