//! Curated example metrics shown on `/v1/examples`.
//!
//! The written verdicts are hand-authored; the attached `report` is computed
//! live by the core estimator so the two can be compared.

use serde::Serialize;

use goodtel_core::cardinality::{Estimator, RiskReport};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub metrics: &'static str,
    pub verdict: &'static str,
    pub issues: &'static [&'static str],
    pub recommendations: &'static [&'static str],
    pub cardinality_estimate: &'static str,
    pub memory_estimate: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ShowcaseEntry {
    #[serde(flatten)]
    pub example: &'static Example,
    pub report: Option<RiskReport>,
}

pub static EXAMPLES: [Example; 4] = [
    Example {
        metrics: r#"http_requests_total{method="GET", handler="/api/users", status="200"} 1027"#,
        verdict: "Good",
        issues: &[],
        recommendations: &[
            "Well-structured counter with the _total suffix",
            "Labels are bounded and meaningful",
        ],
        cardinality_estimate: "Low (3 methods x ~10 handlers x 5 status codes = ~150 series)",
        memory_estimate: "~3KB per series = ~450KB total",
    },
    Example {
        metrics: r#"api_response_time{user_id="12345", endpoint="/profile"} 0.234"#,
        verdict: "Needs Improvement",
        issues: &[
            "user_id is an unbounded label",
            "Duration lacks the _seconds suffix",
            "Latency should be a histogram, not a gauge",
        ],
        recommendations: &[
            "Drop user_id and log it instead",
            "Rename to api_response_duration_seconds",
            "Use a histogram to get percentiles",
        ],
        cardinality_estimate: "Critical: one series per user and endpoint",
        memory_estimate: "Easily 10GB+ with 100k users",
    },
    Example {
        metrics: "cache_hit_ratio 0.87",
        verdict: "Needs Improvement",
        issues: &[
            "Ratios should be computed in queries, not stored",
            "No label identifies which cache",
        ],
        recommendations: &[
            "Expose cache_hits_total and cache_misses_total",
            "Add a cache_name label",
            "Compute cache_hits_total / (cache_hits_total + cache_misses_total) at query time",
        ],
        cardinality_estimate: "N/A (antipattern)",
        memory_estimate: "N/A",
    },
    Example {
        metrics: r#"volume_attachment{vol="vol-abc123", inode="1048576", timestamp="1729783200", cluster="prod-east"} 1"#,
        verdict: "Poor",
        issues: &[
            "vol creates one series per volume (2566+ values)",
            "inode is extremely high-cardinality (529+ values)",
            "timestamp as a label creates unbounded series",
            "Several unbounded labels multiply together",
        ],
        recommendations: &[
            "Aggregate at pool or cluster level instead of vol",
            "Track per-inode detail in logs",
            "Never use a timestamp label; samples are already timestamped",
            "Keep only cluster/pool labels",
        ],
        cardinality_estimate: "Catastrophic: 2566 vol x 529 inode x 1606 timestamp = 2.18 billion series",
        memory_estimate: "6.5+ TB",
    },
];

/// All examples with a live estimate attached.
pub fn entries(estimator: &Estimator) -> Vec<ShowcaseEntry> {
    EXAMPLES
        .iter()
        .map(|example| ShowcaseEntry {
            example,
            report: goodtel_core::evaluate(example.metrics, estimator)
                .map(|ev| ev.report)
                .map_err(|e| tracing::warn!(error = %e, "showcase example failed to evaluate"))
                .ok(),
        })
        .collect()
}
