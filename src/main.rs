//! Daily Brief binary entrypoint.
//! Wires news sources, the rule engine, the store and the notifier from env,
//! then runs the brief once or on an interval.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_insight_engine::brief::DailyBrief;
use news_insight_engine::config::load_config_default;
use news_insight_engine::ingest::{FixtureSource, NewsSource, RssSource};
use news_insight_engine::notify::{InsightNotifier, LogNotifier, WebhookNotifier};
use news_insight_engine::scheduler::spawn_brief_scheduler;
use news_insight_engine::store::MemoryStore;

const DEFAULT_INTERVAL_SECS: u64 = 24 * 60 * 60;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("BRIEF_LOG_JSON").ok().is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_sources() -> Result<Vec<Box<dyn NewsSource>>> {
    let mut sources: Vec<Box<dyn NewsSource>> = Vec::new();

    if let Ok(p) = std::env::var("BRIEF_ARTICLES_PATH") {
        let fixture = FixtureSource::from_path(&PathBuf::from(p))?;
        sources.push(Box::new(fixture));
    }

    let economy = env_list("BRIEF_RSS_FEEDS_ECONOMY");
    let it = env_list("BRIEF_RSS_FEEDS_IT");
    if !economy.is_empty() || !it.is_empty() {
        sources.push(Box::new(RssSource::from_urls(&economy, &it)));
    }

    if sources.is_empty() {
        tracing::warn!(
            target: "brief",
            "no news sources configured (BRIEF_ARTICLES_PATH / BRIEF_RSS_FEEDS_*)"
        );
    }
    Ok(sources)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = load_config_default().context("loading engine config")?;
    let sources = build_sources()?;

    let webhook = WebhookNotifier::from_env();
    let notifier: Arc<dyn InsightNotifier> = if webhook.is_enabled() {
        Arc::new(webhook)
    } else {
        Arc::new(LogNotifier)
    };

    let brief = Arc::new(DailyBrief::from_config(
        &cfg,
        sources,
        Arc::new(MemoryStore::default()),
        notifier,
    )?);

    let run_once = std::env::var("BRIEF_RUN_ONCE").ok().is_some_and(|v| v == "1");
    if run_once {
        let reports = brief.run().await?;
        for (domain, r) in reports {
            tracing::info!(
                target: "brief",
                %domain,
                articles = r.articles,
                insights = r.insights,
                saved = r.saved,
                "domain report"
            );
        }
        return Ok(());
    }

    let secs = std::env::var("BRIEF_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_INTERVAL_SECS);
    tracing::info!(target: "brief", interval_secs = secs, "starting brief scheduler");

    let handle = spawn_brief_scheduler(brief, Duration::from_secs(secs));
    tokio::select! {
        res = handle => { res.context("scheduler task ended")?; }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!(target: "brief", "shutdown requested");
        }
    }
    Ok(())
}
