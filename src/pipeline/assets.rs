//! Cache-control injection and font CORS headers.
//!
//! A fixed allow-list of asset paths (fonts plus the two page background
//! images) gets a long-lived public cache directive, but only when the
//! response does not already carry one — check-then-set, never overwrite.
//! Font responses additionally get `Access-Control-Allow-Origin: *`
//! because some browsers enforce same-origin for font loads.

use axum::extract::{Request, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::config::LONG_CACHE_VALUE;
use crate::server::AppState;

/// The pure header decision: `None` means "leave the response alone".
#[must_use]
pub fn compute_cache_header(
    allow_list: &[String],
    path: &str,
    existing: Option<&HeaderValue>,
) -> Option<HeaderValue> {
    if existing.is_some() {
        return None;
    }
    let covered = allow_list.iter().any(|entry| {
        if entry.ends_with('/') {
            path.starts_with(entry.as_str())
        } else {
            path == entry
        }
    });
    covered.then(|| HeaderValue::from_static(LONG_CACHE_VALUE))
}

pub async fn cache_and_cors(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let mut res = next.run(req).await;

    if let Some(value) = compute_cache_header(
        &state.config.long_cache_paths,
        &path,
        res.headers().get(CACHE_CONTROL),
    ) {
        res.headers_mut().insert(CACHE_CONTROL, value);
    }

    if path.starts_with(state.config.fonts_prefix.as_str()) {
        res.headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }

    res
}
