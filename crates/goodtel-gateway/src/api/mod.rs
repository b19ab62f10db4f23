//! JSON API handlers.
//!
//! - `POST /v1/evaluate` : decode + estimate (+ optional review)
//! - `GET  /v1/examples` : showcase examples with live estimates

pub mod evaluate;
pub mod examples;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use goodtel_core::error::GoodTelError;

/// Error body: `{"code", "message", "line"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

pub struct ApiError {
    status: StatusCode,
    err: GoodTelError,
}

impl ApiError {
    pub fn new(status: StatusCode, err: GoodTelError) -> Self {
        Self { status, err }
    }
}

impl From<GoodTelError> for ApiError {
    fn from(err: GoodTelError) -> Self {
        use goodtel_core::error::ClientCode;

        let status = match err.client_code() {
            ClientCode::InputEmpty
            | ClientCode::InvalidFormat
            | ClientCode::InvalidLabelSyntax
            | ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::Upstream => StatusCode::BAD_GATEWAY,
            ClientCode::UnsupportedVersion | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self { status, err }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.err.client_code().as_str(),
            message: self.err.to_string(),
            line: self.err.line(),
        };
        (self.status, Json(body)).into_response()
    }
}
