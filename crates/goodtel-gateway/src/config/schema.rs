use serde::Deserialize;
use goodtel_core::cardinality::EstimatorConfig;
use goodtel_core::error::{GoodTelError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub estimator: EstimatorConfig,

    #[serde(default)]
    pub llm: LlmSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            estimator: EstimatorConfig::default(),
            llm: LlmSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GoodTelError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.estimator.validate()?;
        self.llm.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Upper bound on a submitted metrics blob.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1024..=16 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(GoodTelError::BadRequest(
                "server.max_body_bytes must be between 1024 and 16777216".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_max_body_bytes() -> usize {
    256 * 1024
}

/// Optional language-model reviewer (Ollama-compatible).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmSection {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_llm_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_ms: default_llm_timeout_ms(),
        }
    }
}

impl LlmSection {
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(GoodTelError::BadRequest(
                "llm.base_url must start with http:// or https://".into(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(GoodTelError::BadRequest("llm.model must not be empty".into()));
        }
        if !(1000..=600000).contains(&self.timeout_ms) {
            return Err(GoodTelError::BadRequest(
                "llm.timeout_ms must be between 1000 and 600000".into(),
            ));
        }
        Ok(())
    }
}

fn default_llm_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_llm_model() -> String {
    "llama2".into()
}
fn default_llm_timeout_ms() -> u64 {
    120000
}
