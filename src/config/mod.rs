// src/config/mod.rs
//! Engine configuration: analyzer parameters plus optional rule-table overrides.
//!
//! TOML shape:
//! ```toml
//! [params]
//! min_batch_size = 5
//! dominance_ratio = 1.5
//!
//! [[it_rules]]
//! id = "security"
//! label = "보안"
//! filter_keywords = ["보안", "해킹"]
//! output = { domain = "it", change_type = "security" }
//! ```
//! JSON uses the same field names.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::params::AnalyzerParams;
use crate::analyze::rules::{compile_rules, TopicRule};
use crate::insight::Domain;

pub const ENV_PATH: &str = "INSIGHT_ENGINE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub params: AnalyzerParams,
    /// Replaces the built-in economy table when present.
    pub economy_rules: Option<Vec<TopicRule>>,
    /// Replaces the built-in IT table when present.
    pub it_rules: Option<Vec<TopicRule>>,
}

impl EngineConfig {
    pub fn rules_for(&self, domain: Domain) -> Option<&[TopicRule]> {
        match domain {
            Domain::Economy => self.economy_rules.as_deref(),
            Domain::It => self.it_rules.as_deref(),
        }
    }

    /// Sanitize params and check that rule overrides compile.
    fn validated(mut self) -> Result<Self> {
        self.params = self.params.sanitized();
        for domain in Domain::ALL {
            if let Some(rules) = self.rules_for(domain) {
                compile_rules(domain, rules.to_vec())
                    .with_context(|| format!("invalid {domain} rules"))?;
            }
        }
        Ok(self)
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading engine config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing engine config {}", path.display()))?
        .validated()
}

/// Load config using env var + fallbacks:
/// 1) $INSIGHT_ENGINE_CONFIG
/// 2) config/engine.toml
/// 3) config/engine.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<EngineConfig> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        }
        return Err(anyhow!("{ENV_PATH} points to non-existent path {}", pb.display()));
    }
    let toml_p = PathBuf::from("config/engine.toml");
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/engine.json");
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(EngineConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<EngineConfig> {
    match hint_ext {
        "toml" => return toml::from_str(s).context("toml"),
        "json" => return serde_json::from_str(s).context("json"),
        _ => {}
    }
    // No usable extension: JSON documents start with '{'.
    if s.trim_start().starts_with('{') {
        serde_json::from_str(s).context("json")
    } else {
        toml::from_str(s).context("toml")
    }
}
