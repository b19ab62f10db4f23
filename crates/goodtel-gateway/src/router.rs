//! Axum router wiring.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let max_body = state.cfg().server.max_body_bytes;

    Router::new()
        .route("/v1/evaluate", post(api::evaluate::evaluate))
        .route("/v1/examples", get(api::examples::examples))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
