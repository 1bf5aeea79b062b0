use anyhow::{Context, Result};
use chrono::Local;
use reqwest::Client;
use std::time::Duration;

use super::{format_batch_message, format_insight_message, InsightNotifier};
use crate::insight::Insight;

pub const ENV_WEBHOOK_URL: &str = "BRIEF_WEBHOOK_URL";

/// Posts `{"text": ...}` to a chat webhook. One attempt per message.
#[derive(Clone)]
pub struct WebhookNotifier {
    webhook_url: Option<String>,
    client: Client,
    timeout: Duration,
}

impl WebhookNotifier {
    pub fn from_env() -> Self {
        Self {
            webhook_url: std::env::var(ENV_WEBHOOK_URL)
                .ok()
                .filter(|u| !u.trim().is_empty()),
            client: Client::new(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn new(url: String) -> Self {
        Self {
            webhook_url: Some(url),
            client: Client::new(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn post(&self, text: String) -> Result<()> {
        let Some(url) = &self.webhook_url else {
            tracing::debug!(target: "brief", "webhook disabled (no {ENV_WEBHOOK_URL})");
            return Ok(());
        };
        let body = serde_json::json!({ "text": text });

        self.client
            .post(url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .context("webhook post")?
            .error_for_status()
            .context("webhook non-2xx")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl InsightNotifier for WebhookNotifier {
    async fn send(&self, insight: &Insight) -> Result<()> {
        self.post(format_insight_message(insight)).await
    }

    async fn send_batch(&self, insights: &[Insight]) -> Result<()> {
        if insights.is_empty() {
            return Ok(());
        }
        self.post(format_batch_message(insights, Local::now().date_naive()))
            .await
    }
}
