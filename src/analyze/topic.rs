//! Generic topic analyzer: one compiled rule + a batch → at most one insight.
//!
//! Filter → gate on relevant count → direction/impact → causes/effects →
//! title/summary/explanation → [`NewInsight`].

use std::collections::BTreeMap;

use crate::analyze::direction::{detect_direction, DirectionSignal};
use crate::analyze::extract::{
    action_items, detect_affected, extract_change, extract_tags, extract_technologies,
    extract_timing, impact_description, main_event, statements_or, DEFAULT_CAUSE_TEMPLATE,
    DEFAULT_EFFECT_TEMPLATE,
};
use crate::analyze::impact::assess_impact;
use crate::analyze::keywords::filter_by_keywords;
use crate::analyze::params::AnalyzerParams;
use crate::analyze::phrases::{economy_explanation, economy_summary, it_explanation, it_summary};
use crate::analyze::rules::{CompiledTopic, OutputKind, TopicRule};
use crate::analyze::sources::source_suffix;
use crate::analyze::title::{economy_title, it_title};
use crate::article::{corpus, titles, Article};
use crate::insight::{
    Direction, EconomyInsightData, EconomyIssueType, Impact, ImpactLevel, InsightData,
    ItChangeType, ItInsightData, MetricValue, NewInsight, Priority,
};

pub const DEFAULT_CAUSE_FALLBACK: &str = "여러 요인이 복합적으로 작용하고 있습니다";
pub const DEFAULT_EFFECT_FALLBACK: &str = "시장 전반에 영향을 미칠 것으로 보입니다";
pub const ECONOMY_EVENT_FALLBACK: &str = "경제 이슈 발생";

/// The side of a rule that passed its gate.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub relevant: Vec<&'a Article>,
    pub output: OutputKind,
    pub summary_label: String,
}

/// Filter the batch and apply the relevance gate. `None` means no insight.
pub fn select<'a>(rule: &TopicRule, articles: &[&'a Article]) -> Option<Selection<'a>> {
    let primary = filter_by_keywords(articles, &rule.filter_keywords);

    let Some(alt) = rule.alternate.as_ref() else {
        return (primary.len() >= rule.min_relevant_articles).then(|| Selection {
            relevant: primary,
            output: rule.output,
            summary_label: rule.summary_label().to_string(),
        });
    };

    let secondary = filter_by_keywords(articles, &alt.filter_keywords);
    let primary_ahead = if rule.prefer_primary_on_tie {
        primary.len() >= secondary.len()
    } else {
        primary.len() > secondary.len()
    };

    if primary_ahead && primary.len() >= rule.min_relevant_articles {
        Some(Selection {
            relevant: primary,
            output: rule.output,
            summary_label: rule.summary_label().to_string(),
        })
    } else if secondary.len() >= alt.min_relevant_articles {
        Some(Selection {
            relevant: secondary,
            output: alt.output,
            summary_label: alt.summary_label.clone(),
        })
    } else {
        None
    }
}

pub struct TopicAnalyzer<'p> {
    params: &'p AnalyzerParams,
}

impl<'p> TopicAnalyzer<'p> {
    pub fn new(params: &'p AnalyzerParams) -> Self {
        Self { params }
    }

    pub fn analyze(&self, topic: &CompiledTopic, articles: &[&Article]) -> Option<NewInsight> {
        let rule = &topic.rule;
        let Some(sel) = select(rule, articles) else {
            tracing::debug!(target: "insight", topic = %rule.id, "topic below relevance gate");
            return None;
        };

        let headlines = titles(&sel.relevant);
        let detail = topic.detail.detect(&headlines);
        let suffix = source_suffix(&sel.relevant, self.params.max_title_sources);

        let insight = match sel.output {
            OutputKind::Economy { issue_type } => {
                self.economy(rule, &sel, issue_type, &detail, &suffix)
            }
            OutputKind::It { change_type } => self.it(rule, &sel, change_type, &detail, &suffix),
        };
        tracing::debug!(
            target: "insight",
            topic = %rule.id,
            relevant = sel.relevant.len(),
            title = %insight.title,
            "topic produced insight"
        );
        Some(insight)
    }

    fn source_urls(&self, relevant: &[&Article]) -> Vec<String> {
        relevant
            .iter()
            .take(self.params.max_source_urls)
            .map(|a| a.link.clone())
            .collect()
    }

    fn economy(
        &self,
        rule: &TopicRule,
        sel: &Selection<'_>,
        issue_type: EconomyIssueType,
        detail: &str,
        suffix: &str,
    ) -> NewInsight {
        let p = self.params;
        let relevant = &sel.relevant;
        let count = relevant.len();
        let signal = detect_direction(relevant, &p.direction, p.dominance_ratio);
        let text = corpus(relevant);

        let causes = statements_or(
            relevant,
            &rule.cause_keywords,
            rule.cause_template.as_deref().unwrap_or(DEFAULT_CAUSE_TEMPLATE),
            p.max_causes,
            rule.cause_fallback.as_deref().unwrap_or(DEFAULT_CAUSE_FALLBACK),
        );
        let effects = statements_or(
            relevant,
            &rule.effect_keywords,
            rule.effect_template.as_deref().unwrap_or(DEFAULT_EFFECT_TEMPLATE),
            p.max_effects,
            rule.effect_fallback.as_deref().unwrap_or(DEFAULT_EFFECT_FALLBACK),
        );

        let mut tags = rule.tags.clone();
        tags.truncate(p.max_list_items);

        NewInsight {
            title: economy_title(&rule.label, signal.direction, detail, suffix),
            summary: economy_summary(&sel.summary_label, count, signal.direction, &text),
            easy_explanation: Some(economy_explanation(issue_type, signal.direction, &text)),
            priority: rule
                .fixed_priority
                .unwrap_or_else(|| economy_priority(count, signal.direction, p)),
            tags,
            source_urls: self.source_urls(relevant),
            data: InsightData::Economy(EconomyInsightData {
                issue_type,
                event: main_event(relevant, ECONOMY_EVENT_FALLBACK),
                causes,
                effects,
                direction: signal.direction,
                metrics: Some(direction_metrics(count, signal)),
            }),
        }
    }

    fn it(
        &self,
        rule: &TopicRule,
        sel: &Selection<'_>,
        change_type: ItChangeType,
        detail: &str,
        suffix: &str,
    ) -> NewInsight {
        let p = self.params;
        let relevant = &sel.relevant;
        let count = relevant.len();
        let text = corpus(relevant);

        let level = rule
            .fixed_impact
            .unwrap_or_else(|| assess_impact(relevant, &p.impact, p.moderate_impact_min_articles));
        let timing = rule
            .fixed_timing
            .clone()
            .unwrap_or_else(|| extract_timing(&text));
        let affected = rule
            .fixed_affected
            .clone()
            .unwrap_or_else(|| detect_affected(&text));

        let mut actions = action_items(change_type);
        actions.truncate(p.max_list_items);

        NewInsight {
            title: it_title(&rule.label, detail, suffix),
            summary: it_summary(&sel.summary_label, count, level, &text),
            easy_explanation: Some(it_explanation(change_type, &text)),
            priority: rule.fixed_priority.unwrap_or_else(|| it_priority(level)),
            tags: extract_tags(&text, &rule.tags, p.max_list_items),
            source_urls: self.source_urls(relevant),
            data: InsightData::It(ItInsightData {
                change_type,
                change: extract_change(relevant),
                timing,
                affected,
                impact: Impact {
                    level,
                    description: impact_description(level, count),
                },
                action_items: Some(actions),
                technologies: Some(extract_technologies(&text, p.max_list_items)),
            }),
        }
    }
}

/// High needs both volume and a clear direction; medium needs volume only.
pub fn economy_priority(count: usize, direction: Direction, params: &AnalyzerParams) -> Priority {
    if count >= params.high_priority_min_articles && direction != Direction::Neutral {
        Priority::High
    } else if count >= params.medium_priority_min_articles {
        Priority::Medium
    } else {
        Priority::Low
    }
}

pub fn it_priority(level: ImpactLevel) -> Priority {
    if level.is_major() {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn direction_metrics(count: usize, signal: DirectionSignal) -> BTreeMap<String, MetricValue> {
    BTreeMap::from([
        ("relevantArticles".to_string(), MetricValue::from(count)),
        ("upSignals".to_string(), MetricValue::from(signal.up)),
        ("downSignals".to_string(), MetricValue::from(signal.down)),
    ])
}
