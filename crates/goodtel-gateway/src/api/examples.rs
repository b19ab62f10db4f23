use axum::extract::State;
use axum::Json;

use crate::app_state::AppState;
use crate::showcase::{self, ShowcaseEntry};

pub async fn examples(State(state): State<AppState>) -> Json<Vec<ShowcaseEntry>> {
    Json(showcase::entries(state.estimator()))
}
