//! Optional language-model review of evaluated metrics.
//!
//! The core report is always computed first; a reviewer only adds a verdict
//! and free-text advice on top of it.

pub mod ollama;
pub mod prompt;

use async_trait::async_trait;
use serde::Serialize;

use goodtel_core::error::Result;
use goodtel_core::Evaluation;

pub use ollama::OllamaClient;

/// Structured reviewer output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub verdict: String,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub improved_example: String,
    /// e.g. `Critical (1000000 estimated series)`
    pub cardinality_summary: String,
    pub memory_impact: String,
    pub raw_response: String,
}

/// Backend that turns an evaluation into a `Review`.
#[async_trait]
pub trait MetricReviewer: Send + Sync {
    /// Backend identifier for logs.
    fn backend(&self) -> &str;
    async fn review(&self, evaluation: &Evaluation) -> Result<Review>;
}
