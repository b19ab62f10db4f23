//! Shared error type across goodtel crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// No usable sample lines in the submitted text.
    InputEmpty,
    /// A line matches neither sample form.
    InvalidFormat,
    /// A `key="value"` segment is malformed.
    InvalidLabelSyntax,
    /// Invalid request or configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// The reviewer backend failed.
    Upstream,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InputEmpty => "INPUT_EMPTY",
            ClientCode::InvalidFormat => "INVALID_FORMAT",
            ClientCode::InvalidLabelSyntax => "INVALID_LABEL_SYNTAX",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Upstream => "UPSTREAM",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GoodTelError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoodTelError {
    #[error("no valid metrics found")]
    InputEmpty,
    #[error("line {line}: invalid metric format: {text}")]
    InvalidFormat { line: usize, text: String },
    #[error("line {line}: invalid label syntax ({reason}): {text}")]
    InvalidLabelSyntax {
        line: usize,
        text: String,
        reason: &'static str,
    },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("upstream: {0}")]
    Upstream(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GoodTelError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GoodTelError::InputEmpty => ClientCode::InputEmpty,
            GoodTelError::InvalidFormat { .. } => ClientCode::InvalidFormat,
            GoodTelError::InvalidLabelSyntax { .. } => ClientCode::InvalidLabelSyntax,
            GoodTelError::BadRequest(_) => ClientCode::BadRequest,
            GoodTelError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            GoodTelError::Upstream(_) => ClientCode::Upstream,
            GoodTelError::Internal(_) => ClientCode::Internal,
        }
    }

    /// 1-based input line for decode errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            GoodTelError::InvalidFormat { line, .. }
            | GoodTelError::InvalidLabelSyntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}
