//! HTTP API tests against a gateway bound to an ephemeral port.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use goodtel_core::error::{GoodTelError, Result};
use goodtel_core::Evaluation;
use goodtel_gateway::app_state::AppState;
use goodtel_gateway::config::GatewayConfig;
use goodtel_gateway::llm::prompt::parse_response;
use goodtel_gateway::llm::{MetricReviewer, Review};
use goodtel_gateway::router;

struct CannedReviewer(&'static str);

#[async_trait]
impl MetricReviewer for CannedReviewer {
    fn backend(&self) -> &str {
        "canned"
    }

    async fn review(&self, evaluation: &Evaluation) -> Result<Review> {
        Ok(parse_response(self.0, &evaluation.report))
    }
}

struct FailingReviewer;

#[async_trait]
impl MetricReviewer for FailingReviewer {
    fn backend(&self) -> &str {
        "failing"
    }

    async fn review(&self, _evaluation: &Evaluation) -> Result<Review> {
        Err(GoodTelError::Upstream("backend unreachable".into()))
    }
}

async fn spawn(reviewer: Option<Arc<dyn MetricReviewer>>) -> String {
    let state = AppState::with_reviewer(GatewayConfig::default(), reviewer).unwrap();
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post_metrics(base: &str, metrics: &str) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/v1/evaluate"))
        .json(&json!({ "metrics": metrics }))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn evaluate_returns_samples_and_report() {
    let base = spawn(None).await;
    let (status, body) = post_metrics(
        &base,
        "http_requests_total{method=\"GET\",region=\"us\"} 1\nhttp_requests_total{method=\"GET\",region=\"eu\"} 2",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["samples"].as_array().unwrap().len(), 2);
    assert_eq!(body["report"]["estimatedSeries"], 2);
    assert_eq!(body["report"]["cardinalityLevel"], "Low");
    assert_eq!(body["report"]["memoryEstimateHuman"], "6.0 KB");
    assert!(body["review"].is_null());
}

#[tokio::test]
async fn evaluate_rejects_bad_label_with_line() {
    let base = spawn(None).await;
    let (status, body) = post_metrics(&base, "up 1\nbad{label=nofoo} 1").await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], "INVALID_LABEL_SYNTAX");
    assert_eq!(body["line"], 2);
    assert!(body["message"].as_str().unwrap().contains("bad{label=nofoo}"));
}

#[tokio::test]
async fn evaluate_rejects_empty_input() {
    let base = spawn(None).await;
    let (status, body) = post_metrics(&base, "   \n# only a comment\n").await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], "INPUT_EMPTY");
    assert!(body.get("line").is_none());
}

#[tokio::test]
async fn evaluate_rejects_malformed_json() {
    let base = spawn(None).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/v1/evaluate"))
        .header("content-type", "application/json")
        .body(r#"{"metric": "up 1"}"#)
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn review_is_attached_when_reviewer_configured() {
    let canned = "VERDICT: Poor\nISSUES:\n- user_id is unbounded\nRECOMMENDATIONS:\n- drop user_id\nIMPROVED EXAMPLE:\napi_requests_total{endpoint=\"/profile\"} 1";
    let base = spawn(Some(Arc::new(CannedReviewer(canned)))).await;
    let (status, body) = post_metrics(
        &base,
        r#"api_requests_total{user_id="1",endpoint="/profile"} 1"#,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["report"]["cardinalityLevel"], "Critical");
    assert_eq!(body["review"]["verdict"], "Poor");
    assert_eq!(body["review"]["issues"][0], "user_id is unbounded");
    assert_eq!(body["review"]["cardinalitySummary"], "Critical (1000000 estimated series)");
}

#[tokio::test]
async fn reviewer_failure_is_bad_gateway() {
    let base = spawn(Some(Arc::new(FailingReviewer))).await;
    let (status, body) = post_metrics(&base, "up 1").await;

    assert_eq!(status, 502);
    assert_eq!(body["code"], "UPSTREAM");
}

#[tokio::test]
async fn examples_carry_live_reports() {
    let base = spawn(None).await;
    let body: Value = reqwest::get(format!("{base}/v1/examples"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let examples = body.as_array().unwrap();
    assert_eq!(examples.len(), 4);
    assert_eq!(examples[0]["verdict"], "Good");
    assert_eq!(examples[0]["report"]["cardinalityLevel"], "Low");
    assert_eq!(examples[1]["report"]["cardinalityLevel"], "Critical");
    assert_eq!(examples[3]["report"]["perLabel"]["inode"]["flaggedUnbounded"], true);
}

#[tokio::test]
async fn metrics_endpoint_counts_outcomes() {
    let base = spawn(None).await;
    post_metrics(&base, "up 1").await;
    post_metrics(&base, "bad{label=nofoo} 1").await;

    let resp = reqwest::get(format!("{base}/metrics")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let text = resp.text().await.unwrap();

    assert!(text.contains(r#"goodtel_evaluations_total{outcome="ok"} 1"#));
    assert!(text.contains(r#"goodtel_evaluations_total{outcome="rejected"} 1"#));
    assert!(text.contains(r#"goodtel_decode_errors_total{code="INVALID_LABEL_SYNTAX"} 1"#));
    assert!(text.contains(r#"goodtel_cardinality_level_total{level="Low"} 1"#));

    let health = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(health.text().await.unwrap(), "ok");
}
