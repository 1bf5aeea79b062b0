//! Daily brief pipeline: fetch → analyze → save → notify, one domain at a time.

use anyhow::{Context, Result};
use chrono::Utc;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

use crate::analyze::{DomainAnalyzer, InsightAnalyzer};
use crate::config::EngineConfig;
use crate::ingest::{collect_batch, NewsSource};
use crate::insight::{Domain, Insight};
use crate::notify::InsightNotifier;
use crate::store::InsightStore;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("brief_runs_total", "Daily brief runs (both domains).");
        describe_gauge!("brief_last_run_ts", "Unix ts when the daily brief last ran.");
    });
}

/// What one domain run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainReport {
    pub articles: usize,
    pub insights: usize,
    pub saved: usize,
    pub notified: bool,
}

pub struct DailyBrief {
    sources: Vec<Box<dyn NewsSource>>,
    analyzers: HashMap<Domain, Arc<dyn InsightAnalyzer>>,
    store: Arc<dyn InsightStore>,
    notifier: Arc<dyn InsightNotifier>,
}

impl DailyBrief {
    /// Rule-based analyzers for both domains.
    pub fn new(
        sources: Vec<Box<dyn NewsSource>>,
        store: Arc<dyn InsightStore>,
        notifier: Arc<dyn InsightNotifier>,
    ) -> Self {
        let mut analyzers: HashMap<Domain, Arc<dyn InsightAnalyzer>> = HashMap::new();
        for d in Domain::ALL {
            analyzers.insert(d, Arc::new(DomainAnalyzer::new(d)));
        }
        Self {
            sources,
            analyzers,
            store,
            notifier,
        }
    }

    pub fn from_config(
        cfg: &EngineConfig,
        sources: Vec<Box<dyn NewsSource>>,
        store: Arc<dyn InsightStore>,
        notifier: Arc<dyn InsightNotifier>,
    ) -> Result<Self> {
        let mut brief = Self::new(sources, store, notifier);
        for d in Domain::ALL {
            let analyzer = DomainAnalyzer::from_config(d, cfg)
                .with_context(|| format!("building {d} analyzer"))?;
            brief = brief.with_analyzer(Arc::new(analyzer));
        }
        Ok(brief)
    }

    /// Swap the analyzer for the analyzer's domain.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn InsightAnalyzer>) -> Self {
        self.analyzers.insert(analyzer.domain(), analyzer);
        self
    }

    pub async fn run_domain(&self, domain: Domain) -> Result<DomainReport> {
        let articles = collect_batch(&self.sources, domain).await;
        let mut report = DomainReport {
            articles: articles.len(),
            ..Default::default()
        };
        tracing::info!(target: "brief", %domain, articles = articles.len(), "fetched articles");
        if articles.is_empty() {
            tracing::info!(target: "brief", %domain, "no articles, skipping analysis");
            return Ok(report);
        }

        let insights: Vec<Insight> = match self.analyzers.get(&domain) {
            Some(a) => a.analyze(&articles),
            None => Vec::new(),
        };
        report.insights = insights.len();
        if insights.is_empty() {
            tracing::info!(target: "brief", %domain, "no insights, skipping save and notify");
            return Ok(report);
        }

        for i in &insights {
            match self.store.save(i).await {
                Ok(()) => report.saved += 1,
                Err(e) => {
                    tracing::warn!(target: "brief", error = ?e, id = %i.id, "failed to save insight")
                }
            }
        }
        tracing::info!(target: "brief", %domain, saved = report.saved, "insights saved");

        self.notifier
            .send_batch(&insights)
            .await
            .with_context(|| format!("notifying {domain} insights"))?;
        report.notified = true;
        tracing::info!(target: "brief", %domain, "notification sent");
        Ok(report)
    }

    /// Economy first, then IT. The first failing domain stops the run.
    pub async fn run(&self) -> Result<Vec<(Domain, DomainReport)>> {
        ensure_metrics_described();
        tracing::info!(target: "brief", at = %Utc::now().to_rfc3339(), "daily brief started");

        let mut out = Vec::with_capacity(Domain::ALL.len());
        for d in Domain::ALL {
            let report = self
                .run_domain(d)
                .await
                .with_context(|| format!("daily brief failed for {d}"))?;
            out.push((d, report));
        }

        counter!("brief_runs_total").increment(1);
        gauge!("brief_last_run_ts").set(Utc::now().timestamp() as f64);
        tracing::info!(target: "brief", "daily brief completed");
        Ok(out)
    }
}
