//! Request-level entry point: text blob -> samples -> index -> report.

use serde::Serialize;

use crate::cardinality::{Estimator, RiskReport};
use crate::error::{GoodTelError, Result};
use crate::exposition::{decode_line, LabelIndex, Sample};

/// Successful evaluation of one text blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub samples: Vec<Sample>,
    pub report: RiskReport,
}

/// Decode every sample line in `input` and estimate its cardinality.
///
/// Blank lines and `#` comments are skipped. Line numbers in errors refer to
/// physical lines of `input` (1-based). The first bad line aborts the call.
pub fn evaluate(input: &str, estimator: &Estimator) -> Result<Evaluation> {
    let mut samples = Vec::new();

    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        samples.push(decode_line(i + 1, line)?);
    }

    if samples.is_empty() {
        return Err(GoodTelError::InputEmpty);
    }

    let index = LabelIndex::extract(&samples);
    let report = estimator.estimate(&index);

    tracing::debug!(
        samples = samples.len(),
        labels = index.len(),
        series = report.estimated_series,
        level = %report.cardinality_level,
        "evaluated exposition input"
    );

    Ok(Evaluation { samples, report })
}
