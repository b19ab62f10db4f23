//! Reviewer prompt and response handling.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use goodtel_core::cardinality::{Estimator, EstimatorConfig};
use goodtel_core::evaluate;
use goodtel_gateway::llm::prompt::{build_prompt, parse_response, FALLBACK_ISSUE, FALLBACK_VERDICT};

fn estimator() -> Estimator {
    Estimator::new(EstimatorConfig::default()).unwrap()
}

#[test]
fn prompt_contains_samples_and_analysis() {
    let ev = evaluate(
        "# TYPE x gauge\nx{session_id=\"abc\",region=\"eu\"} 1",
        &estimator(),
    )
    .unwrap();
    let prompt = build_prompt(&ev);

    assert!(prompt.contains("METRICS TO EVALUATE:\nx{session_id=\"abc\",region=\"eu\"} 1\n"));
    assert!(!prompt.contains("# TYPE x gauge"));
    assert!(prompt.contains("Estimated Series: 1000000"));
    assert!(prompt.contains("Cardinality Level: Critical"));
    assert!(prompt.contains("HIGH CARDINALITY RISKS:\n- remove label `session_id`"));
    assert!(prompt.ends_with("[corrected metric lines]"));
}

#[test]
fn prompt_omits_risk_block_when_clean() {
    let ev = evaluate("up 1", &estimator()).unwrap();
    let prompt = build_prompt(&ev);
    assert!(prompt.contains("Memory Estimate: 3.0 KB"));
    assert!(!prompt.contains("HIGH CARDINALITY RISKS"));
}

#[test]
fn parse_sectioned_response() {
    let ev = evaluate("apiLatencyMs{user_id=\"7\"} 12", &estimator()).unwrap();
    let response = "\
Here is my review.
VERDICT: Needs Improvement
ISSUES:
- camelCase metric name
* milliseconds instead of seconds
RECOMMENDATIONS:
- rename to api_latency_seconds
IMPROVED EXAMPLE:
api_latency_seconds 0.012
- this bullet is ignored

api_latency_seconds_count 1
";
    let review = parse_response(response, &ev.report);

    assert_eq!(review.verdict, "Needs Improvement");
    assert_eq!(review.issues, vec!["camelCase metric name", "milliseconds instead of seconds"]);
    assert_eq!(review.recommendations, vec!["rename to api_latency_seconds"]);
    assert_eq!(review.improved_example, "api_latency_seconds 0.012\napi_latency_seconds_count 1");
    assert_eq!(review.cardinality_summary, "Critical (1000000 estimated series)");
    assert_eq!(review.memory_impact, "2.9 GB");
    assert_eq!(review.raw_response, response);
}

#[test]
fn parse_unstructured_response_uses_fallbacks() {
    let ev = evaluate("up 1", &estimator()).unwrap();
    let review = parse_response("Looks fine to me.", &ev.report);

    assert_eq!(review.verdict, FALLBACK_VERDICT);
    assert_eq!(review.issues, vec![FALLBACK_ISSUE]);
    assert!(review.recommendations.is_empty());
    assert_eq!(review.cardinality_summary, "Low (1 estimated series)");
}
