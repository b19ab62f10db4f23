//! End-to-end evaluation of text blobs.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use goodtel_core::cardinality::{CardinalityLevel, Estimator, EstimatorConfig};
use goodtel_core::{evaluate, GoodTelError};

fn estimator() -> Estimator {
    Estimator::new(EstimatorConfig::default()).unwrap()
}

#[test]
fn label_free_sample() {
    let ev = evaluate("up 1", &estimator()).unwrap();
    assert_eq!(ev.samples.len(), 1);
    assert!(ev.samples[0].labels.is_empty());
    assert_eq!(ev.report.estimated_series, 1);
    assert_eq!(ev.report.cardinality_level, CardinalityLevel::Low);

    let ev = evaluate("up 5", &estimator()).unwrap();
    assert_eq!(ev.samples[0].value, "5");
    assert_eq!(ev.report.estimated_series, 1);
}

#[test]
fn empty_input() {
    assert_eq!(evaluate("", &estimator()).unwrap_err(), GoodTelError::InputEmpty);

    let only_comments = "# HELP up whether the target is up\n# TYPE up gauge\n\n   \n";
    let err = evaluate(only_comments, &estimator()).unwrap_err();
    assert_eq!(err.client_code().as_str(), "INPUT_EMPTY");
}

#[test]
fn bad_label_reports_line_one() {
    let err = evaluate("bad{label=nofoo} 1", &estimator()).unwrap_err();
    assert_eq!(err.client_code().as_str(), "INVALID_LABEL_SYNTAX");
    assert_eq!(err.line(), Some(1));
}

#[test]
fn line_numbers_count_skipped_lines() {
    let input = "\n# TYPE up gauge\nup 1\n\nup{job=\"api\"} oops\n";
    let err = evaluate(input, &estimator()).unwrap_err();
    assert_eq!(err.client_code().as_str(), "INVALID_FORMAT");
    assert_eq!(err.line(), Some(5));
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let input = r#"
# HELP http_requests_total Total HTTP requests.
# TYPE http_requests_total counter
http_requests_total{method="GET",region="us"} 10
http_requests_total{method="GET",region="eu"} 4

http_requests_total{method="GET",region="ap"} 7
"#;
    let ev = evaluate(input, &estimator()).unwrap();
    assert_eq!(ev.samples.len(), 3);
    assert_eq!(ev.report.per_label["region"].distinct_value_count, 3);
    assert_eq!(ev.report.per_label["method"].distinct_value_count, 1);
    assert_eq!(ev.report.estimated_series, 3);
}

#[test]
fn quoted_comma_is_one_label() {
    let ev = evaluate(r#"req_total{path="/a,b"} 1"#, &estimator()).unwrap();
    assert_eq!(ev.samples[0].labels.len(), 1);
    assert_eq!(ev.samples[0].labels["path"], "/a,b");
}

#[test]
fn showcase_volume_metric_is_critical() {
    let input = r#"volume_attachment{vol="vol-abc123", inode="1048576", timestamp="1729783200", cluster="prod-east"} 1"#;
    let ev = evaluate(input, &estimator()).unwrap();

    assert_eq!(ev.report.cardinality_level, CardinalityLevel::Critical);
    let flagged: Vec<&str> = ev.report.flagged_labels().map(|r| r.name.as_str()).collect();
    assert_eq!(flagged, vec!["inode", "timestamp", "vol"]);
    assert_eq!(ev.report.findings.len(), 3);
    assert!(!ev.report.per_label["cluster"].flagged_unbounded);
}

#[test]
fn evaluation_serializes_samples_and_report() {
    let ev = evaluate(r#"x{method="GET"} 2"#, &estimator()).unwrap();
    let json = serde_json::to_value(&ev).unwrap();
    assert_eq!(json["samples"][0]["name"], "x");
    assert_eq!(json["samples"][0]["labels"]["method"], "GET");
    assert_eq!(json["samples"][0]["raw"], r#"x{method="GET"} 2"#);
    assert_eq!(json["report"]["estimatedSeries"], 1);
}
