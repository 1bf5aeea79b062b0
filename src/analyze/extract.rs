//! Templated statement extraction: causes/effects for economy topics and
//! the change/timing/affected/action breakdown for IT topics.

use crate::analyze::keywords::{contains_any, present_in_order};
use crate::article::Article;
use crate::insight::{AffectedParty, ImpactLevel, ItChangeType};
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder substituted with the matched factor keyword.
pub const KEYWORD_SLOT: &str = "{keyword}";

pub const DEFAULT_CAUSE_TEMPLATE: &str = "{keyword} 관련 요인으로 인한 영향이 나타나고 있습니다";
pub const DEFAULT_EFFECT_TEMPLATE: &str = "{keyword}에 상당한 영향을 미칠 것으로 예상됩니다";

/// One sentence per factor keyword found in at least one article, in keyword-list order,
/// at most `limit`. Empty when nothing matches; the caller picks its own fallback.
pub fn extract_statements<S: AsRef<str>>(
    articles: &[&Article],
    keywords: &[S],
    template: &str,
    limit: usize,
) -> Vec<String> {
    let texts: Vec<String> = articles.iter().map(|a| a.text()).collect();
    keywords
        .iter()
        .map(|k| k.as_ref())
        .filter(|k| !k.is_empty() && texts.iter().any(|t| t.contains(k)))
        .take(limit)
        .map(|k| template.replace(KEYWORD_SLOT, k))
        .collect()
}

/// Extracted statements or the single per-call fallback sentence.
pub fn statements_or<S: AsRef<str>>(
    articles: &[&Article],
    keywords: &[S],
    template: &str,
    limit: usize,
    fallback: &str,
) -> Vec<String> {
    let out = extract_statements(articles, keywords, template, limit);
    if out.is_empty() {
        vec![fallback.to_string()]
    } else {
        out
    }
}

/// "Main event" = headline of the first relevant article (callers pass articles in priority order).
pub fn main_event(articles: &[&Article], fallback: &str) -> String {
    articles
        .first()
        .map(|a| a.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

static RE_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").expect("bracket regex"));

/// First headline with `[...]` tags (e.g. `[속보]`) removed.
pub fn extract_change(articles: &[&Article]) -> String {
    articles
        .first()
        .map(|a| RE_BRACKETS.replace_all(&a.title, "").trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "IT 분야 변화".to_string())
}

pub fn extract_timing(text: &str) -> String {
    let timing = if contains_any(text, &["시장", "수요"]) {
        "시장 수요 증가에 대응"
    } else if contains_any(text, &["경쟁", "선점"]) {
        "경쟁 우위 확보를 위한 전략적 시점"
    } else {
        "기술 발전에 따른 자연스러운 변화"
    };
    timing.to_string()
}

const AFFECTED_MARKERS: &[(AffectedParty, &[&str])] = &[
    (AffectedParty::Developers, &["개발자", "프로그래머", "엔지니어"]),
    (AffectedParty::Users, &["사용자", "고객", "소비자"]),
    (AffectedParty::Enterprises, &["기업", "회사", "조직"]),
];

/// Stakeholders mentioned in the corpus, `[All]` when none.
pub fn detect_affected(text: &str) -> Vec<AffectedParty> {
    let found: Vec<AffectedParty> = AFFECTED_MARKERS
        .iter()
        .filter(|(_, words)| contains_any(text, *words))
        .map(|(party, _)| *party)
        .collect();
    if found.is_empty() {
        vec![AffectedParty::All]
    } else {
        found
    }
}

pub const TECHNOLOGIES: &[&str] = &[
    "AI", "GPT", "ChatGPT", "Claude", "LLM", "React", "Vue", "Angular", "TypeScript",
    "JavaScript", "Python", "Java", "Go", "Rust", "AWS", "Azure", "GCP", "Kubernetes", "Docker",
    "GitHub", "GitLab", "Copilot",
];

pub const IT_TAGS: &[&str] = &[
    "AI", "개발도구", "클라우드", "보안", "프론트엔드", "백엔드", "DevOps", "데이터", "모바일", "웹",
    "API", "SaaS",
];

pub fn extract_technologies(text: &str, limit: usize) -> Vec<String> {
    present_in_order(text, TECHNOLOGIES, limit)
}

/// Corpus tags followed by `extra` ones, capped at `limit`. Extras always keep
/// their slots; corpus tags fill what is left, duplicates of extras dropped.
pub fn extract_tags<S: AsRef<str>>(text: &str, extra: &[S], limit: usize) -> Vec<String> {
    let mut fixed: Vec<String> = Vec::new();
    for t in extra {
        let t = t.as_ref();
        if !fixed.iter().any(|x| x == t) {
            fixed.push(t.to_string());
        }
    }
    fixed.truncate(limit);

    let mut tags: Vec<String> = present_in_order(text, IT_TAGS, usize::MAX)
        .into_iter()
        .filter(|t| !fixed.contains(t))
        .take(limit - fixed.len())
        .collect();
    tags.extend(fixed);
    tags
}

pub fn impact_description(level: ImpactLevel, count: usize) -> String {
    match level {
        ImpactLevel::Critical => {
            format!("{count}개 언론사에서 보도된 중대한 이슈로, 즉각적인 대응이 필요합니다.")
        }
        ImpactLevel::Significant => format!(
            "{count}개 주요 뉴스에서 다루어진 중요한 변화로, 업계 전반에 영향을 미칠 것으로 예상됩니다."
        ),
        ImpactLevel::Moderate => {
            format!("{count}개 기사에서 보도되었으며, 중장기적으로 영향을 미칠 수 있습니다.")
        }
        ImpactLevel::Minor => {
            format!("{count}개 뉴스에서 언급되었으나, 제한적인 영향으로 예상됩니다.")
        }
    }
}

pub fn action_items(change_type: ItChangeType) -> Vec<String> {
    let items: &[&str] = match change_type {
        ItChangeType::ProductRelease => &[
            "신제품 기능 및 스펙 상세 검토",
            "기존 솔루션과 비교 분석",
            "도입 시 ROI 및 비용 분석",
        ],
        ItChangeType::TechAdoption => &[
            "새로운 기술 학습 계획 수립",
            "파일럿 프로젝트 진행",
            "팀 내 지식 공유 세션 진행",
        ],
        ItChangeType::TechDeprecation => &[
            "대안 기술 조사 및 마이그레이션 계획 수립",
            "기존 코드베이스 영향 범위 파악",
            "마이그레이션 일정 및 리소스 배정",
        ],
        ItChangeType::Security => &[
            "시스템 보안 점검 즉시 실시",
            "보안 패치 적용 및 취약점 스캔",
            "보안 정책 재검토 및 팀 교육",
        ],
        _ => &["추가 정보 수집 및 모니터링"],
    };
    items.iter().map(|s| s.to_string()).collect()
}
