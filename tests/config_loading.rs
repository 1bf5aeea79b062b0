// tests/config_loading.rs
use news_insight_engine::config::{load_config_default, load_config_from, ENV_PATH};
use news_insight_engine::{Article, Domain, DomainAnalyzer, InsightAnalyzer};
use serial_test::serial;
use std::{env, fs};

const OIL_RULES: &str = r#"
[params]
min_batch_size = 2

[[economy_rules]]
id = "oil"
label = "유가"
filter_keywords = ["유가", "원유"]
min_relevant_articles = 2
cause_keywords = ["OPEC", "감산"]
cause_fallback = "공급 변화가 나타나고 있습니다"
tags = ["유가", "원자재"]
output = { domain = "economy", issue_type = "commodity" }
detail = { kind = "pattern", pattern = '[0-9]+달러', template = ", {match}" }
"#;

#[test]
fn toml_rule_override_drives_the_analyzer() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("engine.toml");
    fs::write(&p, OIL_RULES).unwrap();

    let cfg = load_config_from(&p).unwrap();
    assert_eq!(cfg.params.min_batch_size, 2);
    let analyzer = DomainAnalyzer::from_config(Domain::Economy, &cfg).unwrap();
    assert_eq!(analyzer.topics().len(), 1);

    let batch = vec![
        Article::new("OPEC 감산에 유가 상승, 90달러", "a").with_source("로이터"),
        Article::new("원유 선물 급등", "b").with_source("로이터"),
    ];
    let out = analyzer.analyze(&batch);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, "📌 유가 상승세, 90달러 [로이터 등 2건]");
    let data = out[0].economy().unwrap();
    assert_eq!(data.causes.len(), 2);
    assert_eq!(out[0].tags, vec!["유가", "원자재"]);

    // IT keeps the built-in table
    let it = DomainAnalyzer::from_config(Domain::It, &cfg).unwrap();
    assert_eq!(it.topics().len(), 3);
}

#[test]
fn json_config_and_bad_regex() {
    let tmp = tempfile::tempdir().unwrap();
    let ok = tmp.path().join("engine.json");
    fs::write(&ok, r#"{"params":{"dominance_ratio":2.0}}"#).unwrap();
    let cfg = load_config_from(&ok).unwrap();
    assert!((cfg.params.dominance_ratio - 2.0).abs() < f64::EPSILON);

    let bad = tmp.path().join("bad.toml");
    fs::write(
        &bad,
        r#"
[[it_rules]]
id = "x"
label = "x"
filter_keywords = ["x"]
output = { domain = "it", change_type = "other" }
detail = { kind = "pattern", pattern = "(", template = "{match}" }
"#,
    )
    .unwrap();
    assert!(load_config_from(&bad).is_err());
}

#[serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so a real config/ in the repo does not interfere
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_PATH);

    // No files → built-in defaults
    let cfg = load_config_default().unwrap();
    assert_eq!(cfg.params.min_batch_size, 5);
    assert!(cfg.economy_rules.is_none());

    // config/engine.toml is picked up
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/engine.toml"),
        "[params]\nmin_batch_size = 8\n",
    )
    .unwrap();
    assert_eq!(load_config_default().unwrap().params.min_batch_size, 8);

    // Env wins
    let p_json = tmp.path().join("custom.json");
    fs::write(&p_json, r#"{"params":{"min_batch_size":9}}"#).unwrap();
    env::set_var(ENV_PATH, p_json.display().to_string());
    assert_eq!(load_config_default().unwrap().params.min_batch_size, 9);

    // Env pointing nowhere is an error
    env::set_var(ENV_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(load_config_default().is_err());
    env::remove_var(ENV_PATH);

    env::set_current_dir(&old).unwrap();
}
