//! Notification contract and plain-text rendering of insights.
//!
//! Transports only move the text produced by [`format_insight_message`] /
//! [`format_batch_message`]; they never look inside an insight themselves.

pub mod webhook;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::insight::{Domain, Insight, InsightData, Priority};

pub use crate::notify::webhook::WebhookNotifier;

#[async_trait]
pub trait InsightNotifier: Send + Sync {
    async fn send(&self, insight: &Insight) -> Result<()>;
    async fn send_batch(&self, insights: &[Insight]) -> Result<()>;
}

fn domain_emoji(domain: Domain) -> &'static str {
    match domain {
        Domain::Economy => "💰",
        Domain::It => "💻",
    }
}

fn priority_emoji(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "⚪",
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("  • {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_insight_message(insight: &Insight) -> String {
    let mut out = format!(
        "{} {}\n\n{}\n\n",
        domain_emoji(insight.domain),
        insight.title,
        insight.summary
    );

    // write! into a String cannot fail
    match &insight.data {
        InsightData::Economy(d) => {
            let _ = writeln!(out, "📊 이슈: {}", d.event);
            let _ = writeln!(out, "📝 원인:\n{}", bullets(&d.causes));
            if !d.effects.is_empty() {
                let _ = writeln!(out, "📈 영향:\n{}", bullets(&d.effects));
            }
        }
        InsightData::It(d) => {
            let affected: Vec<&str> = d.affected.iter().map(|p| p.as_str()).collect();
            let _ = writeln!(out, "🔄 변화: {}", d.change);
            let _ = writeln!(out, "⏰ 시점: {}", d.timing);
            let _ = writeln!(out, "👥 대상: {}", affected.join(", "));
            let _ = writeln!(out, "💥 영향: {}", d.impact.description);
            if let Some(items) = d.action_items.as_ref().filter(|v| !v.is_empty()) {
                let _ = writeln!(out, "✅ 액션:\n{}", bullets(items));
            }
        }
    }

    let _ = write!(
        out,
        "\n{} 우선순위: {}",
        priority_emoji(insight.priority),
        insight.priority.as_str()
    );
    out
}

/// Daily digest: per-domain counts and the first three titles.
pub fn format_batch_message(insights: &[Insight], date: NaiveDate) -> String {
    let count = |d: Domain| insights.iter().filter(|i| i.domain == d).count();

    let mut out = String::from("📰 Daily Brief Insights\n");
    let _ = writeln!(out, "{}\n", date.format("%Y. %-m. %-d."));
    let _ = writeln!(out, "💰 경제: {}건", count(Domain::Economy));
    let _ = writeln!(out, "💻 IT: {}건\n", count(Domain::It));
    let _ = writeln!(out, "총 {}개의 인사이트가 분석되었습니다.\n", insights.len());
    out.push_str("주요 인사이트:\n");
    for (n, i) in insights.iter().take(3).enumerate() {
        let _ = writeln!(out, "{}. {} {}", n + 1, domain_emoji(i.domain), i.title);
    }
    out
}

/// Writes messages to the tracing log instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl InsightNotifier for LogNotifier {
    async fn send(&self, insight: &Insight) -> Result<()> {
        tracing::info!(target: "brief", id = %insight.id, "\n{}", format_insight_message(insight));
        Ok(())
    }

    async fn send_batch(&self, insights: &[Insight]) -> Result<()> {
        let today = chrono::Local::now().date_naive();
        tracing::info!(target: "brief", count = insights.len(), "\n{}", format_batch_message(insights, today));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{DomainAnalyzer, InsightAnalyzer};
    use crate::article::Article;

    fn economy_insight() -> Insight {
        let a: Vec<Article> = (0..6)
            .map(|i| {
                Article::new("환율 1,400원 상승", format!("https://x/{i}"))
                    .with_content("연준 발언에 수입 물가 우려")
                    .with_source("연합뉴스")
            })
            .collect();
        DomainAnalyzer::economy().analyze(&a).remove(0)
    }

    fn it_insight() -> Insight {
        let a: Vec<Article> = (0..5)
            .map(|i| Article::new("랜섬웨어 보안 경보", format!("https://y/{i}")))
            .collect();
        DomainAnalyzer::it().analyze(&a).remove(0)
    }

    #[test]
    fn economy_message_sections() {
        let m = format_insight_message(&economy_insight());
        assert!(m.starts_with("💰 📌 환율 상승세, 1,400원 돌파 [연합뉴스 등 6건]\n\n"));
        assert!(m.contains("📊 이슈: 환율 1,400원 상승\n"));
        assert!(m.contains("📝 원인:\n  • 연준 관련 요인으로 인한 영향이 나타나고 있습니다\n"));
        assert!(m.contains("📈 영향:\n  • 수입 물가에 상당한 영향을 미칠 것으로 예상됩니다"));
        assert!(m.ends_with("🟡 우선순위: medium"));
    }

    #[test]
    fn it_message_sections() {
        let m = format_insight_message(&it_insight());
        assert!(m.contains("👥 대상: developers, users, enterprises\n"));
        assert!(m.contains("✅ 액션:\n  • 시스템 보안 점검 즉시 실시"));
        assert!(m.ends_with("🔴 우선순위: high"));
    }

    #[test]
    fn batch_message_counts_and_top_three() {
        let list = vec![economy_insight(), it_insight(), it_insight(), economy_insight()];
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let m = format_batch_message(&list, date);
        assert!(m.starts_with("📰 Daily Brief Insights\n2025. 1. 2.\n\n"));
        assert!(m.contains("💰 경제: 2건\n💻 IT: 2건\n\n"));
        assert!(m.contains("총 4개의 인사이트가 분석되었습니다."));
        assert!(m.contains("3. 💻 📌 [보안]"));
        assert!(!m.contains("4. "));
    }
}
