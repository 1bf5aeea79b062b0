//! Topic rule tables.
//!
//! A topic rule describes how one insight category is filtered, scored and
//! phrased. The built-in economy and IT tables below can be replaced from the
//! engine config (see `crate::config`), e.g. in TOML:
//!
//! ```toml
//! [[economy_rules]]
//! id = "exchange_rate"
//! label = "환율"
//! filter_keywords = ["환율", "달러"]
//! output = { domain = "economy", issue_type = "exchange_rate" }
//! detail = { kind = "pattern", pattern = '[0-9]{1,},?[0-9]{0,3}원', template = ", {match} 돌파" }
//! ```
//!
//! Rules are validated when compiled; the built-in tables are compiled once.

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::analyze::params::strings;
use crate::analyze::title::{CompiledDetail, TitleDetail};
use crate::insight::{AffectedParty, Domain, EconomyIssueType, ImpactLevel, ItChangeType, Priority};

/// What a rule produces once its gate passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum OutputKind {
    Economy { issue_type: EconomyIssueType },
    It { change_type: ItChangeType },
}

impl OutputKind {
    pub fn domain(self) -> Domain {
        match self {
            OutputKind::Economy { .. } => Domain::Economy,
            OutputKind::It { .. } => Domain::It,
        }
    }
}

/// Competing filter for a two-sided topic (adoption vs deprecation).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlternateFilter {
    pub filter_keywords: Vec<String>,
    #[serde(default = "default_min")]
    pub min_relevant_articles: usize,
    pub summary_label: String,
    pub output: OutputKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopicRule {
    pub id: String,
    /// Label used in the title.
    pub label: String,
    /// Label used in the summary; falls back to `label`.
    #[serde(default)]
    pub summary_label: Option<String>,
    pub filter_keywords: Vec<String>,
    #[serde(default = "default_min")]
    pub min_relevant_articles: usize,
    pub output: OutputKind,
    #[serde(default)]
    pub alternate: Option<AlternateFilter>,
    /// With an alternate filter: the primary side wins equal counts.
    #[serde(default = "default_true")]
    pub prefer_primary_on_tie: bool,
    #[serde(default)]
    pub cause_keywords: Vec<String>,
    #[serde(default)]
    pub effect_keywords: Vec<String>,
    #[serde(default)]
    pub cause_template: Option<String>,
    #[serde(default)]
    pub effect_template: Option<String>,
    #[serde(default)]
    pub cause_fallback: Option<String>,
    #[serde(default)]
    pub effect_fallback: Option<String>,
    /// Economy: the rule's tags. IT: appended after corpus tags.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub detail: TitleDetail,
    #[serde(default)]
    pub fixed_impact: Option<ImpactLevel>,
    #[serde(default)]
    pub fixed_affected: Option<Vec<AffectedParty>>,
    #[serde(default)]
    pub fixed_timing: Option<String>,
    #[serde(default)]
    pub fixed_priority: Option<Priority>,
}

fn default_min() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl TopicRule {
    fn new(id: &str, label: &str, filter: &[&str], output: OutputKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            summary_label: None,
            filter_keywords: strings(filter),
            min_relevant_articles: default_min(),
            output,
            alternate: None,
            prefer_primary_on_tie: true,
            cause_keywords: Vec::new(),
            effect_keywords: Vec::new(),
            cause_template: None,
            effect_template: None,
            cause_fallback: None,
            effect_fallback: None,
            tags: Vec::new(),
            detail: TitleDetail::None,
            fixed_impact: None,
            fixed_affected: None,
            fixed_timing: None,
            fixed_priority: None,
        }
    }

    pub fn summary_label(&self) -> &str {
        self.summary_label.as_deref().unwrap_or(&self.label)
    }

    pub fn domain(&self) -> Domain {
        self.output.domain()
    }
}

fn economy(issue_type: EconomyIssueType) -> OutputKind {
    OutputKind::Economy { issue_type }
}

fn it(change_type: ItChangeType) -> OutputKind {
    OutputKind::It { change_type }
}

pub fn economy_rules() -> Vec<TopicRule> {
    vec![
        TopicRule {
            cause_keywords: strings(&[
                "미국 금리", "연준", "Fed", "중동", "지정학", "경상수지", "무역수지", "중국 경기",
            ]),
            effect_keywords: strings(&[
                "수입 물가", "수출 기업", "외화 부채", "해외여행", "물가", "인플레이션",
            ]),
            cause_fallback: Some("환율 변동성이 증가하고 있습니다".into()),
            effect_fallback: Some("경제 전반에 걸쳐 영향을 미칠 것으로 예상됩니다".into()),
            tags: strings(&["환율", "달러", "경제"]),
            detail: TitleDetail::Pattern {
                pattern: r"[0-9]{1,},?[0-9]{0,3}원".into(),
                template: ", {match} 돌파".into(),
            },
            ..TopicRule::new(
                "exchange_rate",
                "환율",
                &["환율", "달러", "원화", "엔화", "위안화", "유로"],
                economy(EconomyIssueType::ExchangeRate),
            )
        },
        TopicRule {
            cause_keywords: strings(&["인플레이션", "물가", "경기", "고용", "성장률"]),
            effect_keywords: strings(&["대출", "예금", "부동산", "주식", "투자", "소비"]),
            cause_fallback: Some("통화정책 변화가 나타나고 있습니다".into()),
            effect_fallback: Some("금융시장 전반에 영향을 미칠 것으로 보입니다".into()),
            tags: strings(&["금리", "통화정책", "경제"]),
            detail: TitleDetail::Keyword {
                keywords: strings(&["동결", "인상", "인하"]),
                template: " {match}".into(),
            },
            ..TopicRule::new(
                "interest_rate",
                "금리",
                &["금리", "기준금리", "연준", "Fed", "한국은행", "통화정책"],
                economy(EconomyIssueType::InterestRate),
            )
        },
        TopicRule {
            cause_keywords: strings(&["실적", "경기", "금리", "외국인", "기관", "반도체", "기술주"]),
            effect_keywords: strings(&["투자자", "개인", "기업가치", "시가총액", "자산"]),
            cause_fallback: Some("시장 변동성이 증가하고 있습니다".into()),
            effect_fallback: Some("투자 심리에 영향을 미칠 것으로 보입니다".into()),
            tags: strings(&["증시", "주식", "투자"]),
            detail: TitleDetail::Pattern {
                pattern: r"코스피\s*[0-9]{1,},?[0-9]{0,3}".into(),
                template: ", {match}".into(),
            },
            ..TopicRule::new(
                "equity_market",
                "증시",
                &["증시", "주가", "코스피", "KOSPI", "코스닥", "나스닥", "S&P"],
                economy(EconomyIssueType::EquityMarket),
            )
        },
    ]
}

fn it_product_detail() -> TitleDetail {
    TitleDetail::Keyword {
        keywords: strings(&[
            "ChatGPT",
            "GPT",
            "Claude",
            "GitHub Copilot",
            "Copilot",
            "TypeScript",
            "React",
            "AWS",
            "Azure",
            "Docker",
            "Kubernetes",
        ]),
        template: " {match}".into(),
    }
}

pub fn it_rules() -> Vec<TopicRule> {
    vec![
        TopicRule {
            summary_label: Some("제품 출시".into()),
            detail: it_product_detail(),
            ..TopicRule::new(
                "product_release",
                "제품",
                &["출시", "발표", "공개", "론칭", "업데이트", "버전", "릴리즈"],
                it(ItChangeType::ProductRelease),
            )
        },
        TopicRule {
            summary_label: Some("기술 도입".into()),
            min_relevant_articles: 2,
            alternate: Some(AlternateFilter {
                filter_keywords: strings(&["폐기", "중단", "종료", "지원 중단", "deprecated"]),
                min_relevant_articles: 2,
                summary_label: "기술 폐기".into(),
                output: it(ItChangeType::TechDeprecation),
            }),
            detail: it_product_detail(),
            ..TopicRule::new(
                "tech_change",
                "기술",
                &["도입", "채택", "활용", "적용", "확대"],
                it(ItChangeType::TechAdoption),
            )
        },
        TopicRule {
            summary_label: Some("보안 이슈".into()),
            min_relevant_articles: 2,
            tags: strings(&["보안", "긴급"]),
            detail: it_product_detail(),
            fixed_impact: Some(ImpactLevel::Critical),
            fixed_affected: Some(vec![
                AffectedParty::Developers,
                AffectedParty::Users,
                AffectedParty::Enterprises,
            ]),
            fixed_timing: Some("보안 위협 증가로 즉각 대응 필요".into()),
            fixed_priority: Some(Priority::High),
            ..TopicRule::new(
                "security",
                "보안",
                &["보안", "해킹", "취약점", "침해", "유출", "랜섬웨어", "사이버"],
                it(ItChangeType::Security),
            )
        },
    ]
}

pub fn builtin_rules(domain: Domain) -> Vec<TopicRule> {
    match domain {
        Domain::Economy => economy_rules(),
        Domain::It => it_rules(),
    }
}

/// A validated rule with its title detail ready to run.
#[derive(Debug, Clone)]
pub struct CompiledTopic {
    pub rule: TopicRule,
    pub detail: CompiledDetail,
}

fn clean_keywords(words: &mut Vec<String>) {
    words.retain(|w| !w.trim().is_empty());
}

/// Validate and compile a rule table for `domain`.
pub fn compile_rules(domain: Domain, rules: Vec<TopicRule>) -> Result<Vec<CompiledTopic>> {
    let mut out = Vec::with_capacity(rules.len());
    let mut seen = HashSet::new();
    for mut rule in rules {
        if rule.id.trim().is_empty() {
            bail!("{domain} rule with empty id");
        }
        if !seen.insert(rule.id.trim().to_string()) {
            bail!("{domain} rule id {:?} is used twice", rule.id);
        }
        clean_keywords(&mut rule.filter_keywords);
        if rule.filter_keywords.is_empty() {
            bail!("{domain} rule {:?} has no filter keywords", rule.id);
        }
        if rule.domain() != domain {
            bail!(
                "rule {:?} produces {} insights but is listed under {domain}",
                rule.id,
                rule.domain()
            );
        }
        rule.min_relevant_articles = rule.min_relevant_articles.max(1);
        if let Some(alt) = rule.alternate.as_mut() {
            clean_keywords(&mut alt.filter_keywords);
            if alt.filter_keywords.is_empty() {
                bail!("rule {:?}: alternate filter has no keywords", rule.id);
            }
            if alt.output.domain() != domain {
                bail!("rule {:?}: alternate output is not a {domain} kind", rule.id);
            }
            alt.min_relevant_articles = alt.min_relevant_articles.max(1);
        }
        clean_keywords(&mut rule.cause_keywords);
        clean_keywords(&mut rule.effect_keywords);

        let detail = rule
            .detail
            .compile()
            .with_context(|| format!("rule {:?}", rule.id))?;
        out.push(CompiledTopic { rule, detail });
    }
    Ok(out)
}

static ECONOMY_TOPICS: Lazy<Vec<CompiledTopic>> = Lazy::new(|| {
    compile_rules(Domain::Economy, economy_rules()).expect("built-in economy rules")
});
static IT_TOPICS: Lazy<Vec<CompiledTopic>> =
    Lazy::new(|| compile_rules(Domain::It, it_rules()).expect("built-in it rules"));

pub fn builtin_topics(domain: Domain) -> Vec<CompiledTopic> {
    match domain {
        Domain::Economy => ECONOMY_TOPICS.clone(),
        Domain::It => IT_TOPICS.clone(),
    }
}
