// src/analyze/mod.rs
//! Rule-based insight engine.
//!
//! `DomainAnalyzer::analyze` gates on batch size, then runs every topic rule of
//! its domain through the generic [`TopicAnalyzer`]. Pure and synchronous: no
//! I/O, no shared mutable state, so domains can be analyzed on separate tasks.

pub mod direction;
pub mod extract;
pub mod impact;
pub mod keywords;
pub mod params;
pub mod phrases;
pub mod rules;
pub mod sources;
pub mod title;
pub mod topic;

use anyhow::Result;
use chrono::{DateTime, Utc};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::article::Article;
use crate::config::EngineConfig;
use crate::insight::{Domain, Insight};

pub use crate::analyze::direction::{classify, detect_direction, DirectionSignal};
pub use crate::analyze::params::AnalyzerParams;
pub use crate::analyze::rules::{CompiledTopic, TopicRule};
pub use crate::analyze::topic::TopicAnalyzer;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "insights_generated_total",
            "Insights produced by the rule engine, per domain."
        );
        describe_counter!(
            "insight_topics_skipped_total",
            "Topic rules that did not pass their relevance gate, per domain."
        );
    });
}

/// Anything that turns a domain batch into insights. The rule engine is one
/// implementation; a model-backed analyzer would be another.
pub trait InsightAnalyzer: Send + Sync {
    fn domain(&self) -> Domain;
    fn analyze_at(&self, articles: &[Article], now: DateTime<Utc>) -> Vec<Insight>;

    fn analyze(&self, articles: &[Article]) -> Vec<Insight> {
        self.analyze_at(articles, Utc::now())
    }
}

#[derive(Debug, Clone)]
pub struct DomainAnalyzer {
    domain: Domain,
    topics: Vec<CompiledTopic>,
    params: AnalyzerParams,
}

impl DomainAnalyzer {
    /// Built-in rules for `domain` with default parameters.
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            topics: rules::builtin_topics(domain),
            params: AnalyzerParams::default(),
        }
    }

    pub fn economy() -> Self {
        Self::new(Domain::Economy)
    }

    pub fn it() -> Self {
        Self::new(Domain::It)
    }

    pub fn with_params(mut self, params: AnalyzerParams) -> Self {
        self.params = params.sanitized();
        self
    }

    /// Replace the rule table. Rules are validated before use.
    pub fn with_rules(mut self, rules: Vec<TopicRule>) -> Result<Self> {
        self.topics = rules::compile_rules(self.domain, rules)?;
        Ok(self)
    }

    pub fn from_config(domain: Domain, cfg: &EngineConfig) -> Result<Self> {
        let analyzer = Self::new(domain).with_params(cfg.params.clone());
        match cfg.rules_for(domain) {
            Some(rules) => analyzer.with_rules(rules.to_vec()),
            None => Ok(analyzer),
        }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    pub fn topics(&self) -> &[CompiledTopic] {
        &self.topics
    }
}

impl InsightAnalyzer for DomainAnalyzer {
    fn domain(&self) -> Domain {
        self.domain
    }

    /// Never fails: too few articles or no passing topic is an empty list.
    fn analyze_at(&self, articles: &[Article], now: DateTime<Utc>) -> Vec<Insight> {
        ensure_metrics_described();
        let domain = self.domain.as_str();

        if articles.len() < self.params.min_batch_size {
            tracing::debug!(
                target: "insight",
                domain,
                articles = articles.len(),
                min = self.params.min_batch_size,
                "batch too small, skipping analysis"
            );
            return Vec::new();
        }

        let refs: Vec<&Article> = articles.iter().collect();
        let topic_analyzer = TopicAnalyzer::new(&self.params);
        let mut out = Vec::with_capacity(self.topics.len());

        for topic in &self.topics {
            match topic_analyzer.analyze(topic, &refs) {
                Some(new) => out.push(Insight::create(new, now)),
                None => {
                    counter!("insight_topics_skipped_total", "domain" => domain).increment(1);
                }
            }
        }

        counter!("insights_generated_total", "domain" => domain).increment(out.len() as u64);
        tracing::info!(
            target: "insight",
            domain,
            articles = articles.len(),
            insights = out.len(),
            "domain analysis finished"
        );
        out
    }
}

/// Run several analyzers over their own batches on blocking tasks.
/// Results come back in the order of `jobs`.
pub async fn analyze_all(
    jobs: Vec<(std::sync::Arc<dyn InsightAnalyzer>, Vec<Article>)>,
    now: DateTime<Utc>,
) -> Result<Vec<Vec<Insight>>> {
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|(analyzer, batch)| {
            tokio::task::spawn_blocking(move || analyzer.analyze_at(&batch, now))
        })
        .collect();

    let mut out = Vec::with_capacity(handles.len());
    for h in handles {
        out.push(h.await?);
    }
    Ok(out)
}
