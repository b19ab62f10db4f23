//! Ollama `/api/generate` client (non-streaming).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use goodtel_core::error::{GoodTelError, Result};
use goodtel_core::Evaluation;

use super::prompt::{build_prompt, parse_response};
use super::{MetricReviewer, Review};
use crate::config::LlmSection;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    done: bool,
}

pub struct OllamaClient {
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl OllamaClient {
    pub fn new(cfg: &LlmSection) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| GoodTelError::Internal(format!("http client init failed: {e}")))?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            http,
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl MetricReviewer for OllamaClient {
    fn backend(&self) -> &str {
        "ollama"
    }

    async fn review(&self, evaluation: &Evaluation) -> Result<Review> {
        let prompt = build_prompt(evaluation);
        let url = self.generate_url();
        tracing::debug!(model = %self.model, %url, prompt_chars = prompt.len(), "calling reviewer");

        let start = Instant::now();
        let resp = self
            .http
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt: &prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| GoodTelError::Upstream(format!("ollama request failed: {e}")))?;

        let status = resp.status();
        tracing::debug!(
            %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "reviewer responded"
        );
        if !status.is_success() {
            return Err(GoodTelError::Upstream(format!("ollama returned status {status}")));
        }

        let body: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GoodTelError::Upstream(format!("ollama response decode failed: {e}")))?;
        if !body.done {
            tracing::warn!("reviewer response marked incomplete");
        }

        let review = parse_response(&body.response, &evaluation.report);
        tracing::info!(
            model = %self.model,
            verdict = %review.verdict,
            issues = review.issues.len(),
            recommendations = review.recommendations.len(),
            "review complete"
        );
        Ok(review)
    }
}
