//! Independence-model cardinality estimator.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::cardinality::classifier::{ExtraPattern, PatternTable};
use crate::cardinality::report::{CardinalityLevel, LabelRisk, RiskReport, RiskTier};
use crate::cardinality::units::human_bytes;
use crate::error::{GoodTelError, Result};
use crate::exposition::LabelIndex;

/// Estimator thresholds and constants. Read-only after startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Resident memory charged per series.
    #[serde(default = "default_per_series_bytes")]
    pub per_series_bytes: u64,

    /// Series count reported when any label is flagged unbounded.
    #[serde(default = "default_unbounded_series")]
    pub unbounded_series: u64,

    /// Distinct values above which a label is `LowMedium`.
    #[serde(default = "default_label_low_medium_above")]
    pub label_low_medium_above: usize,

    /// Distinct values above which a label is `Medium` (and warned about).
    #[serde(default = "default_label_medium_above")]
    pub label_medium_above: usize,

    /// Series counts at which the level becomes Medium / High / Very High.
    #[serde(default = "default_level_medium_at")]
    pub level_medium_at: u64,
    #[serde(default = "default_level_high_at")]
    pub level_high_at: u64,
    #[serde(default = "default_level_very_high_at")]
    pub level_very_high_at: u64,

    /// Operator rules appended after the built-in label patterns.
    #[serde(default)]
    pub extra_patterns: Vec<ExtraPattern>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            per_series_bytes: default_per_series_bytes(),
            unbounded_series: default_unbounded_series(),
            label_low_medium_above: default_label_low_medium_above(),
            label_medium_above: default_label_medium_above(),
            level_medium_at: default_level_medium_at(),
            level_high_at: default_level_high_at(),
            level_very_high_at: default_level_very_high_at(),
            extra_patterns: Vec::new(),
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.per_series_bytes == 0 {
            return Err(GoodTelError::BadRequest(
                "estimator.per_series_bytes must be greater than 0".into(),
            ));
        }
        if self.unbounded_series == 0 {
            return Err(GoodTelError::BadRequest(
                "estimator.unbounded_series must be greater than 0".into(),
            ));
        }
        if self.label_low_medium_above >= self.label_medium_above {
            return Err(GoodTelError::BadRequest(
                "estimator.label_low_medium_above must be less than label_medium_above".into(),
            ));
        }
        // A single series (no labels, or only one-valued labels) is always Low.
        if self.level_medium_at < 2 {
            return Err(GoodTelError::BadRequest(
                "estimator.level_medium_at must be at least 2".into(),
            ));
        }
        if !(self.level_medium_at < self.level_high_at
            && self.level_high_at < self.level_very_high_at)
        {
            return Err(GoodTelError::BadRequest(
                "estimator level breakpoints must be strictly increasing".into(),
            ));
        }
        Ok(())
    }

    pub fn label_tier(&self, distinct: usize) -> RiskTier {
        if distinct > self.label_medium_above {
            RiskTier::Medium
        } else if distinct > self.label_low_medium_above {
            RiskTier::LowMedium
        } else {
            RiskTier::Low
        }
    }

    pub fn level_for(&self, series: u64) -> CardinalityLevel {
        if series < self.level_medium_at {
            CardinalityLevel::Low
        } else if series < self.level_high_at {
            CardinalityLevel::Medium
        } else if series < self.level_very_high_at {
            CardinalityLevel::High
        } else {
            CardinalityLevel::VeryHigh
        }
    }
}

fn default_per_series_bytes() -> u64 {
    3 * 1024
}
fn default_unbounded_series() -> u64 {
    1_000_000
}
fn default_label_low_medium_above() -> usize {
    20
}
fn default_label_medium_above() -> usize {
    100
}
fn default_level_medium_at() -> u64 {
    100
}
fn default_level_high_at() -> u64 {
    1_000
}
fn default_level_very_high_at() -> u64 {
    10_000
}

/// Turns a `LabelIndex` into a `RiskReport`.
/// Construct once at startup, then share via Arc.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
    patterns: PatternTable,
}

impl Estimator {
    /// Validate `config` and compile its pattern table.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        let patterns = PatternTable::with_extra(&config.extra_patterns)?;
        Ok(Self { config, patterns })
    }

    /// Use an injected table instead of the one described by `config`.
    pub fn with_patterns(config: EstimatorConfig, patterns: PatternTable) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Never fails. An empty index yields a one-series `Low` report.
    pub fn estimate(&self, index: &LabelIndex) -> RiskReport {
        let mut per_label = BTreeMap::new();
        let mut findings = Vec::new();
        let mut warnings = Vec::new();
        let mut unbounded = false;
        let mut modeled: u64 = 1;

        for (name, distinct) in index.counts() {
            if let Some(idiom) = self.patterns.classify(name) {
                unbounded = true;
                findings.push(format!(
                    "remove label `{name}`: looks like a {idiom}, which is unbounded"
                ));
                per_label.insert(
                    name.to_string(),
                    LabelRisk {
                        name: name.to_string(),
                        distinct_value_count: distinct,
                        risk_tier: RiskTier::High,
                        flagged_unbounded: true,
                        idiom: Some(idiom.clone()),
                        recommended_action: idiom.advice(),
                    },
                );
                continue;
            }

            modeled = modeled.saturating_mul(distinct as u64);

            let risk_tier = self.config.label_tier(distinct);
            let recommended_action = match risk_tier {
                RiskTier::Medium => {
                    warnings.push(format!(
                        "label `{name}` has {distinct} distinct values; bound or bucket it"
                    ));
                    "bound the value set or bucket values into ranges"
                }
                RiskTier::LowMedium => "watch growth of the value set",
                _ => "none",
            };

            per_label.insert(
                name.to_string(),
                LabelRisk {
                    name: name.to_string(),
                    distinct_value_count: distinct,
                    risk_tier,
                    flagged_unbounded: false,
                    idiom: None,
                    recommended_action: recommended_action.to_string(),
                },
            );
        }

        let (estimated_series, cardinality_level) = if unbounded {
            warnings.push(format!(
                "unbounded label detected: series grow without limit ({} is a placeholder, not a measurement)",
                self.config.unbounded_series
            ));
            (self.config.unbounded_series, CardinalityLevel::Critical)
        } else {
            let level = self.config.level_for(modeled);
            if level != CardinalityLevel::Low {
                warnings.push(format!("{level} cardinality: estimated {modeled} series"));
            }
            (modeled, level)
        };

        let memory_estimate_bytes = estimated_series.saturating_mul(self.config.per_series_bytes);

        RiskReport {
            estimated_series,
            modeled_series: modeled,
            memory_estimate_bytes,
            memory_estimate_human: human_bytes(memory_estimate_bytes),
            cardinality_level,
            unbounded,
            per_label,
            findings,
            warnings,
        }
    }
}
