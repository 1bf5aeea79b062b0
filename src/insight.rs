//! # Insight model
//! Output contract of the engine: one structured record per detected topic.
//!
//! Serialized in camelCase so persistence/notification collaborators can
//! consume it without a mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Economy,
    It,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Economy, Domain::It];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Economy => "economy",
            Domain::It => "it",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Market direction of an economy topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Critical,
    Significant,
    Moderate,
    Minor,
}

impl ImpactLevel {
    /// Critical and significant changes are the ones worth a high priority.
    pub fn is_major(self) -> bool {
        matches!(self, ImpactLevel::Critical | ImpactLevel::Significant)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffectedParty {
    Developers,
    Users,
    Enterprises,
    All,
}

impl AffectedParty {
    pub fn as_str(self) -> &'static str {
        match self {
            AffectedParty::Developers => "developers",
            AffectedParty::Users => "users",
            AffectedParty::Enterprises => "enterprises",
            AffectedParty::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomyIssueType {
    ExchangeRate,
    InterestRate,
    EquityMarket,
    Commodity,
    Policy,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItChangeType {
    ProductRelease,
    PolicyChange,
    TechAdoption,
    TechDeprecation,
    Security,
    Organization,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Number(v as f64)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

/// Cause → effect breakdown of an economy topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyInsightData {
    pub issue_type: EconomyIssueType,
    /// What happened.
    pub event: String,
    /// Why it happened (≤5).
    pub causes: Vec<String>,
    /// What it affects (≤5).
    pub effects: Vec<String>,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, MetricValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impact {
    pub level: ImpactLevel,
    pub description: String,
}

/// Change → impact breakdown of an IT topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItInsightData {
    pub change_type: ItChangeType,
    /// What changed.
    pub change: String,
    /// Why now.
    pub timing: String,
    /// Who is affected (set semantics, stable order).
    pub affected: Vec<AffectedParty>,
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightData {
    Economy(EconomyInsightData),
    It(ItInsightData),
}

impl InsightData {
    pub fn domain(&self) -> Domain {
        match self {
            InsightData::Economy(_) => Domain::Economy,
            InsightData::It(_) => Domain::It,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub domain: Domain,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easy_explanation: Option<String>,
    pub analysis_date: DateTime<Utc>,
    pub status: InsightStatus,
    pub priority: Priority,
    pub tags: Vec<String>,
    /// Links of the first relevant articles (≤3), in input order.
    pub source_urls: Vec<String>,
    pub data: InsightData,
}

/// Everything an analyzer decides about an insight; id/date/status are filled by [`Insight::create`].
#[derive(Debug, Clone)]
pub struct NewInsight {
    pub title: String,
    pub summary: String,
    pub easy_explanation: Option<String>,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub source_urls: Vec<String>,
    pub data: InsightData,
}

impl Insight {
    /// Factory: every insight starts life as a draft stamped with `now`.
    pub fn create(params: NewInsight, now: DateTime<Utc>) -> Self {
        let domain = params.data.domain();
        let id = generate_id(domain, now, &params.title, &params.source_urls);
        Self {
            id,
            domain,
            title: params.title,
            summary: params.summary,
            easy_explanation: params.easy_explanation,
            analysis_date: now,
            status: InsightStatus::Draft,
            priority: params.priority,
            tags: params.tags,
            source_urls: params.source_urls,
            data: params.data,
        }
    }

    /// Status transition lives outside the engine; this only returns an updated copy.
    pub fn with_status(&self, status: InsightStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn economy(&self) -> Option<&EconomyInsightData> {
        match &self.data {
            InsightData::Economy(d) => Some(d),
            InsightData::It(_) => None,
        }
    }

    pub fn it(&self) -> Option<&ItInsightData> {
        match &self.data {
            InsightData::It(d) => Some(d),
            InsightData::Economy(_) => None,
        }
    }
}

/// `<domain>-<unix millis>-<12 hex of sha256(title + links)>`.
/// Same content at the same instant gives the same id, so re-runs stay comparable.
fn generate_id(domain: Domain, now: DateTime<Utc>, title: &str, links: &[String]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    for l in links {
        hasher.update(b"\n");
        hasher.update(l.as_bytes());
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    format!("{}-{}-{}", domain.as_str(), now.timestamp_millis(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> NewInsight {
        NewInsight {
            title: "📌 [보안] [연합뉴스 등 2건]".into(),
            summary: "s".into(),
            easy_explanation: None,
            priority: Priority::High,
            tags: vec!["보안".into()],
            source_urls: vec!["https://a/1".into()],
            data: InsightData::It(ItInsightData {
                change_type: ItChangeType::Security,
                change: "c".into(),
                timing: "t".into(),
                affected: vec![AffectedParty::Developers],
                impact: Impact {
                    level: ImpactLevel::Critical,
                    description: "d".into(),
                },
                action_items: Some(vec!["a".into()]),
                technologies: None,
            }),
        }
    }

    #[test]
    fn create_sets_draft_domain_and_id() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let i = Insight::create(sample(), now);
        assert_eq!(i.status, InsightStatus::Draft);
        assert_eq!(i.domain, Domain::It);
        assert!(i.id.starts_with("it-1735808400000-"));
        assert_eq!(i.id.len(), "it-1735808400000-".len() + 12);
        assert_eq!(i.analysis_date, now);
    }

    #[test]
    fn with_status_returns_updated_copy() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let i = Insight::create(sample(), now);
        let p = i.with_status(InsightStatus::Published);
        assert_eq!(i.status, InsightStatus::Draft);
        assert_eq!(p.status, InsightStatus::Published);
        assert_eq!(p.id, i.id);
    }

    #[test]
    fn serializes_camel_case_and_round_trips_it_data() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let i = Insight::create(sample(), now);
        let json = serde_json::to_string(&i).unwrap();
        assert!(json.contains("\"sourceUrls\""));
        assert!(json.contains("\"changeType\":\"security\""));
        assert!(json.contains("\"actionItems\""));
        assert!(!json.contains("easyExplanation"));
        let back: Insight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, i);
    }
}
