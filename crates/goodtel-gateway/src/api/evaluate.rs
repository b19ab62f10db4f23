use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use goodtel_core::error::GoodTelError;
use goodtel_core::Evaluation;

use super::ApiError;
use crate::app_state::AppState;
use crate::llm::Review;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateRequest {
    pub metrics: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub review: Option<Review>,
}

pub async fn evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let metrics = state.metrics();

    let Json(req) = payload.map_err(|rej| {
        metrics.evaluations.inc(&[("outcome", "rejected")]);
        metrics.decode_errors.inc(&[("code", "BAD_REQUEST")]);
        ApiError::new(rej.status(), GoodTelError::BadRequest(rej.body_text()))
    })?;

    let start = Instant::now();
    let result = goodtel_core::evaluate(&req.metrics, state.estimator());
    metrics.evaluate_duration.observe(&[], start.elapsed());

    let evaluation = result.map_err(|e| {
        tracing::info!(
            code = e.client_code().as_str(),
            line = ?e.line(),
            error = %e,
            "evaluation rejected"
        );
        metrics.evaluations.inc(&[("outcome", "rejected")]);
        metrics.decode_errors.inc(&[("code", e.client_code().as_str())]);
        ApiError::from(e)
    })?;

    let report = &evaluation.report;
    metrics
        .cardinality_levels
        .inc(&[("level", report.cardinality_level.as_str())]);
    for risk in report.flagged_labels() {
        let idiom = risk.idiom.as_ref().map_or("unknown", |i| i.tag());
        metrics.flagged_labels.inc(&[("idiom", idiom)]);
    }
    tracing::info!(
        samples = evaluation.samples.len(),
        series = report.estimated_series,
        level = %report.cardinality_level,
        "evaluation complete"
    );

    let review = match state.reviewer() {
        None => None,
        Some(reviewer) => {
            let start = Instant::now();
            let res = reviewer.review(&evaluation).await;
            metrics
                .review_duration
                .observe(&[("backend", reviewer.backend())], start.elapsed());

            match res {
                Ok(review) => Some(review),
                Err(e) => {
                    tracing::warn!(backend = reviewer.backend(), error = %e, "review failed");
                    metrics.evaluations.inc(&[("outcome", "upstream_error")]);
                    return Err(ApiError::from(e));
                }
            }
        }
    };

    metrics.evaluations.inc(&[("outcome", "ok")]);
    Ok(Json(EvaluateResponse { evaluation, review }))
}
