//! Unified error types for citydevs.
//!
//! [`CitydevsError`] covers startup and CLI failures; [`AppError`] is the
//! request-scoped taxonomy with a fixed HTTP status mapping. Both use
//! `thiserror` for `Display` and `Error` derives.
//!
//! The status codes for the access-control errors are deliberately
//! asymmetric: a missing identity answers 403 while an identity with
//! insufficient privilege answers 401. That inversion is long-standing
//! observable behavior and clients depend on it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::validate::FieldError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CitydevsError {
    #[error("Invalid address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Cookie secret must be at least {min} bytes, got {got}")]
    WeakCookieSecret { min: usize, got: usize },

    #[error("Both GITHUB_CLIENT_ID and GITHUB_CLIENT_SECRET must be set to enable login")]
    PartialOauthConfig,
}

/// Request-scoped errors. Each variant terminates the pipeline with its
/// status; no later stage runs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid input")]
    Invalid(Vec<FieldError>),

    #[error("Authentication required")]
    MissingCredentials,

    #[error("Forbidden")]
    Forbidden,

    #[error("CSRF token missing or invalid")]
    CsrfRejected,

    #[error("Not found")]
    NotFound,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Auth provider error: {0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Invalid(_) => StatusCode::BAD_REQUEST,
            // 403 for "no identity", 401 for "identity present but not enough".
            Self::MissingCredentials | Self::CsrfRejected => StatusCode::FORBIDDEN,
            Self::Forbidden => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Database(_) | Self::Template(_) | Self::Upstream(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        match self {
            Self::Invalid(errors) => (
                status,
                Json(serde_json::json!({ "errors": errors })),
            )
                .into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}
