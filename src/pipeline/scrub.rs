//! Production-mode suppression of internal error detail.
//!
//! In development the 5xx bodies carry diagnostic text (database errors,
//! template errors, upstream failures). In production the same code path
//! runs but this layer replaces the body with a generic message — the
//! dev/prod difference is a configuration switch, not a branch in the
//! handlers.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::server::AppState;

pub const GENERIC_MESSAGE: &str = "Internal Server Error";

pub async fn scrub_errors(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let res = next.run(req).await;
    if state.config.production && res.status().is_server_error() {
        return (res.status(), GENERIC_MESSAGE).into_response();
    }
    res
}
