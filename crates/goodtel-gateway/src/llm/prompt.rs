//! Prompt construction and response parsing for the reviewer.
//!
//! The model is asked to answer in a fixed sectioned format:
//!
//! ```text
//! VERDICT: <Good|Needs Improvement|Poor>
//! ISSUES:
//! - ...
//! RECOMMENDATIONS:
//! - ...
//! IMPROVED EXAMPLE:
//! <metric lines>
//! ```

use std::fmt::Write;

use goodtel_core::cardinality::RiskReport;
use goodtel_core::Evaluation;

use super::Review;

const PREAMBLE: &str = "\
You review Prometheus metrics against the official naming and labeling practices.

Metric names:
- snake_case, describing what is measured
- base units with a unit suffix: _seconds, _bytes, _ratio, _percent
- counters end in _total; no type words such as gauge_ or counter_ in the name

Labels:
- every distinct label combination is a new time series
- bounded labels are safe, alone or combined: method, status, code, endpoint,
  handler, route, templated path, region, zone, cluster, instance, job
- unbounded labels must never be used: user ids, emails, usernames, IP
  addresses, timestamps, UUIDs, trace/span/session/request ids, raw URL paths,
  inodes, file and volume ids; that data belongs in logs or traces

Antipatterns:
- storing ratios that should be computed at query time
- milliseconds instead of seconds
- combining several unbounded labels
- camelCase or UPPERCASE names";

const INSTRUCTIONS: &str = "\
Do not flag: missing # HELP/# TYPE lines, missing instance/job labels (added at
scrape time), a missing sample value, or single-sample cardinality estimates.
Bounded labels such as method, status and endpoint are correct; keep them.

When writing the improved example keep what already works, keep the _total
suffix on counters, and only change what is broken.

Answer in exactly this format:

VERDICT: [Good/Needs Improvement/Poor]
ISSUES:
- [one issue per line]
RECOMMENDATIONS:
- [one recommendation per line]
IMPROVED EXAMPLE:
[corrected metric lines]";

/// Verdict used when the model omits the `VERDICT:` line.
pub const FALLBACK_VERDICT: &str = "Analysis Completed";
/// Issue used when the model lists none.
pub const FALLBACK_ISSUE: &str = "See full response for details";

pub fn build_prompt(evaluation: &Evaluation) -> String {
    let mut out = String::with_capacity(PREAMBLE.len() + INSTRUCTIONS.len() + 512);
    out.push_str(PREAMBLE);
    out.push_str("\n\nMETRICS TO EVALUATE:\n");
    for s in &evaluation.samples {
        let _ = writeln!(out, "{}", s.raw);
    }

    let r = &evaluation.report;
    out.push_str("\nCARDINALITY ANALYSIS:\n");
    let _ = writeln!(out, "Estimated Series: {}", r.estimated_series);
    let _ = writeln!(out, "Memory Estimate: {}", r.memory_estimate_human);
    let _ = writeln!(out, "Cardinality Level: {}", r.cardinality_level);
    if !r.findings.is_empty() || !r.warnings.is_empty() {
        out.push_str("HIGH CARDINALITY RISKS:\n");
        for line in r.findings.iter().chain(r.warnings.iter()) {
            let _ = writeln!(out, "- {line}");
        }
    }

    out.push('\n');
    out.push_str(INSTRUCTIONS);
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Issues,
    Recommendations,
    Example,
}

/// Parse a sectioned model answer, attaching the core's numbers.
pub fn parse_response(response: &str, report: &RiskReport) -> Review {
    let mut review = Review {
        raw_response: response.to_string(),
        ..Review::default()
    };
    let mut section = Section::None;

    for line in response.lines().map(str::trim) {
        if let Some(v) = line.strip_prefix("VERDICT:") {
            review.verdict = v.trim().to_string();
            continue;
        }
        if line.starts_with("ISSUES:") {
            section = Section::Issues;
            continue;
        }
        if line.starts_with("RECOMMENDATIONS:") {
            section = Section::Recommendations;
            continue;
        }
        if line.starts_with("IMPROVED EXAMPLE:") {
            section = Section::Example;
            continue;
        }

        let bullet = line.strip_prefix("- ").or_else(|| line.strip_prefix("* "));
        match (bullet, section) {
            (Some(item), Section::Issues) => review.issues.push(item.to_string()),
            (Some(item), Section::Recommendations) => review.recommendations.push(item.to_string()),
            (Some(_), _) => {}
            (None, Section::Example) if !line.is_empty() => {
                if !review.improved_example.is_empty() {
                    review.improved_example.push('\n');
                }
                review.improved_example.push_str(line);
            }
            (None, _) => {}
        }
    }

    review.cardinality_summary = format!(
        "{} ({} estimated series)",
        report.cardinality_level, report.estimated_series
    );
    review.memory_impact = report.memory_estimate_human.clone();

    if review.verdict.is_empty() {
        review.verdict = FALLBACK_VERDICT.to_string();
    }
    if review.issues.is_empty() {
        review.issues.push(FALLBACK_ISSUE.to_string());
    }
    review
}
