//! Headline composition.
//!
//! Economy: `📌 <label> <상승세|하락세|변동성><detail> [<sources> 등 N건]`
//! IT:      `📌 [<label>]<detail> [<sources> 등 N건]`
//!
//! `detail` is an optional fragment pulled from the relevant headlines by the
//! topic's [`TitleDetail`] rule; it is empty when nothing matches.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::insight::Direction;

pub const TITLE_MARKER: &str = "📌";

/// Slot in a detail template replaced by the matched text.
pub const MATCH_SLOT: &str = "{match}";

/// Config form of a detail rule.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TitleDetail {
    #[default]
    None,
    /// First regex match in the headlines.
    Pattern { pattern: String, template: String },
    /// First keyword (in list order) present in the headlines.
    Keyword {
        keywords: Vec<String>,
        template: String,
    },
}

#[derive(Debug, Clone)]
pub enum CompiledDetail {
    None,
    Pattern(Regex, String),
    Keyword(Vec<String>, String),
}

impl TitleDetail {
    pub fn compile(&self) -> Result<CompiledDetail> {
        Ok(match self {
            TitleDetail::None => CompiledDetail::None,
            TitleDetail::Pattern { pattern, template } => {
                let re = Regex::new(pattern)
                    .with_context(|| format!("invalid title detail pattern {pattern:?}"))?;
                CompiledDetail::Pattern(re, template.clone())
            }
            TitleDetail::Keyword { keywords, template } => {
                CompiledDetail::Keyword(keywords.clone(), template.clone())
            }
        })
    }
}

impl CompiledDetail {
    pub fn detect(&self, headlines: &str) -> String {
        let (found, template) = match self {
            CompiledDetail::None => return String::new(),
            CompiledDetail::Pattern(re, template) => {
                (re.find(headlines).map(|m| m.as_str()), template)
            }
            CompiledDetail::Keyword(keywords, template) => (
                keywords
                    .iter()
                    .map(String::as_str)
                    .find(|k| headlines.contains(k)),
                template,
            ),
        };
        found
            .map(|m| template.replace(MATCH_SLOT, m))
            .unwrap_or_default()
    }
}

pub fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "상승세",
        Direction::Down => "하락세",
        Direction::Neutral => "변동성",
    }
}

pub fn economy_title(label: &str, direction: Direction, detail: &str, suffix: &str) -> String {
    format!(
        "{TITLE_MARKER} {label} {}{detail}{suffix}",
        direction_label(direction)
    )
}

pub fn it_title(label: &str, detail: &str, suffix: &str) -> String {
    format!("{TITLE_MARKER} [{label}]{detail}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_detail_takes_first_match() {
        let d = TitleDetail::Pattern {
            pattern: r"[0-9]{1,},?[0-9]{0,3}원".into(),
            template: ", {match} 돌파".into(),
        }
        .compile()
        .unwrap();
        assert_eq!(d.detect("환율 1,400원 넘어 1,410원"), ", 1,400원 돌파");
        assert_eq!(d.detect("환율 급등"), "");
    }

    #[test]
    fn keyword_detail_uses_list_order() {
        let d = TitleDetail::Keyword {
            keywords: vec!["동결".into(), "인상".into(), "인하".into()],
            template: " {match}".into(),
        }
        .compile()
        .unwrap();
        assert_eq!(d.detect("금리 인상 대신 동결"), " 동결");
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let d = TitleDetail::Pattern {
            pattern: "(".into(),
            template: "{match}".into(),
        };
        assert!(d.compile().is_err());
    }

    #[test]
    fn title_shapes() {
        assert_eq!(
            economy_title("환율", Direction::Up, ", 1,400원 돌파", " [연합 등 6건]"),
            "📌 환율 상승세, 1,400원 돌파 [연합 등 6건]"
        );
        assert_eq!(it_title("보안", "", " [3건]"), "📌 [보안] [3건]");
    }
}
