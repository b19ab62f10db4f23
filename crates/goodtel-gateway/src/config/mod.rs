//! Gateway config loader (strict parsing).
//!
//! Precedence: built-in defaults < YAML file < environment overrides
//! (`WEB_PORT`, `LLM_BACKEND_URL`, `OLLAMA_MODEL`).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use goodtel_core::error::{GoodTelError, Result};

pub use schema::{GatewayConfig, LlmSection, ServerSection};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "GOODTEL_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "goodtel.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GoodTelError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| GoodTelError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the file named by `GOODTEL_CONFIG` (or `goodtel.yaml`), fall back to
/// defaults when it does not exist, then apply process env overrides.
pub fn load() -> Result<GatewayConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

    let mut cfg = match fs::read_to_string(&path) {
        Ok(s) => load_from_str(&s)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(%path, "config file not found, using defaults");
            GatewayConfig::default()
        }
        Err(e) => return Err(GoodTelError::Internal(format!("read config failed: {e}"))),
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
    cfg.validate()?;
    Ok(cfg)
}

/// Apply env overrides through `lookup` (injectable for tests).
pub fn apply_env_overrides<F>(cfg: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

    if let Some(port) = non_empty("WEB_PORT") {
        let host = cfg
            .server
            .listen
            .rsplit_once(':')
            .map(|(h, _)| h.to_string())
            .unwrap_or_else(|| "0.0.0.0".into());
        cfg.server.listen = format!("{host}:{port}");
    }
    if let Some(url) = non_empty("LLM_BACKEND_URL") {
        cfg.llm.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(model) = non_empty("OLLAMA_MODEL") {
        cfg.llm.model = model;
    }
}
