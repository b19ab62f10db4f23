//! Shared application state for the goodtel gateway.
//!
//! Everything here is built once at startup and read-only afterwards,
//! except the atomic request metrics.

use std::sync::Arc;

use goodtel_core::cardinality::Estimator;
use goodtel_core::error::Result;

use crate::config::GatewayConfig;
use crate::llm::{MetricReviewer, OllamaClient};
use crate::obs::GatewayMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    estimator: Estimator,
    reviewer: Option<Arc<dyn MetricReviewer>>,
    metrics: GatewayMetrics,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let reviewer: Option<Arc<dyn MetricReviewer>> = if cfg.llm.enabled {
            tracing::info!(
                base_url = %cfg.llm.base_url,
                model = %cfg.llm.model,
                "reviewer enabled"
            );
            Some(Arc::new(OllamaClient::new(&cfg.llm)?))
        } else {
            tracing::info!("reviewer disabled; serving core estimates only");
            None
        };
        Self::with_reviewer(cfg, reviewer)
    }

    /// Build state with an explicit reviewer (or none), ignoring `cfg.llm.enabled`.
    pub fn with_reviewer(
        cfg: GatewayConfig,
        reviewer: Option<Arc<dyn MetricReviewer>>,
    ) -> Result<Self> {
        let estimator = Estimator::new(cfg.estimator.clone())?;
        tracing::debug!(
            rules = estimator.patterns().len(),
            per_series_bytes = estimator.config().per_series_bytes,
            "estimator ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                estimator,
                reviewer,
                metrics: GatewayMetrics::default(),
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn estimator(&self) -> &Estimator {
        &self.inner.estimator
    }

    pub fn reviewer(&self) -> Option<Arc<dyn MetricReviewer>> {
        self.inner.reviewer.clone()
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }
}
