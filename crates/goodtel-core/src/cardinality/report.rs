//! Risk report types returned by the estimator.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::cardinality::Idiom;

/// Overall cardinality verdict for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CardinalityLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Critical,
}

impl CardinalityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CardinalityLevel::Low => "Low",
            CardinalityLevel::Medium => "Medium",
            CardinalityLevel::High => "High",
            CardinalityLevel::VeryHigh => "Very High",
            CardinalityLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for CardinalityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskTier {
    Low,
    LowMedium,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRisk {
    pub name: String,
    pub distinct_value_count: usize,
    pub risk_tier: RiskTier,
    pub flagged_unbounded: bool,
    /// Matched idiom, set only when `flagged_unbounded`.
    pub idiom: Option<Idiom>,
    pub recommended_action: String,
}

/// Structured cost estimate for one batch of samples.
///
/// When `unbounded` is set, `estimated_series` is a sentinel and should be
/// read as an order of magnitude only; `modeled_series` still carries the
/// product over the labels that were not flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub estimated_series: u64,
    pub modeled_series: u64,
    pub memory_estimate_bytes: u64,
    pub memory_estimate_human: String,
    pub cardinality_level: CardinalityLevel,
    pub unbounded: bool,
    pub per_label: BTreeMap<String, LabelRisk>,
    pub findings: Vec<String>,
    pub warnings: Vec<String>,
}

impl RiskReport {
    /// Labels flagged as unbounded, in label-name order.
    pub fn flagged_labels(&self) -> impl Iterator<Item = &LabelRisk> {
        self.per_label.values().filter(|r| r.flagged_unbounded)
    }
}
