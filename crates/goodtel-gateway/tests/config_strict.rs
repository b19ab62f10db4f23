#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;

use goodtel_gateway::config::{self, GatewayConfig};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
estimator:
  per_series_byte: 4096 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.estimator.per_series_bytes, 3072);
    assert_eq!(cfg.estimator.unbounded_series, 1_000_000);
    assert!(!cfg.llm.enabled);
}

#[test]
fn repo_sample_config_is_valid() {
    let cfg = config::load_from_file("../../goodtel.yaml").expect("sample config must load");
    assert_eq!(cfg.estimator.extra_patterns.len(), 1);
    assert_eq!(cfg.estimator.extra_patterns[0].tag, "pod_uid");
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").unwrap_err();
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn estimator_thresholds_are_validated() {
    let bad = r#"
version: 1
estimator:
  level_medium_at: 5000
  level_high_at: 1000
"#;
    let err = config::load_from_str(bad).unwrap_err();
    assert!(err.to_string().contains("strictly increasing"));
}

#[test]
fn llm_section_is_validated() {
    let bad = r#"
version: 1
llm:
  enabled: true
  base_url: "localhost:11434"
"#;
    let err = config::load_from_str(bad).unwrap_err();
    assert!(err.to_string().contains("llm.base_url"));
}

#[test]
fn env_overrides_apply_on_top_of_file() {
    let mut cfg = GatewayConfig::default();
    let env: HashMap<&str, &str> = [
        ("WEB_PORT", "9090"),
        ("LLM_BACKEND_URL", "http://ollama:11434/"),
        ("OLLAMA_MODEL", "mistral"),
    ]
    .into_iter()
    .collect();

    config::apply_env_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string()));

    assert_eq!(cfg.server.listen, "0.0.0.0:9090");
    assert_eq!(cfg.llm.base_url, "http://ollama:11434");
    assert_eq!(cfg.llm.model, "mistral");
    cfg.validate().unwrap();
}

#[test]
fn empty_env_values_are_ignored() {
    let mut cfg = GatewayConfig::default();
    config::apply_env_overrides(&mut cfg, |_| Some("  ".to_string()));
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.llm.model, "llama2");
}
