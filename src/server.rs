//! Axum router assembly, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding config, the
//! Mongo handle, the template environment, the outbound HTTP client, and
//! the cookie-signing key), [`build_router`] for composing the request
//! pipeline in its fixed stage order, [`build_http_client`] for the
//! connection-pooled hyper client used by the OAuth exchange, and
//! [`shutdown_signal`] for SIGTERM / Ctrl+C handling.

use std::sync::Arc;

use axum::extract::FromRef;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::cookie::Key;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::controllers;
use crate::error::AppError;
use crate::pipeline;
use crate::views::Views;

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HttpClient = Client<HttpsConnector, http_body_util::Full<bytes::Bytes>>;

/// Cheap to clone: every field is an `Arc`, a handle, or key material.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: mongodb::Database,
    pub views: Views,
    pub http_client: HttpClient,
    pub signing_key: Key,
}

// Lets SignedCookieJar pull its key straight out of the shared state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.signing_key.clone()
    }
}

#[must_use]
pub fn build_http_client() -> HttpClient {
    // When multiple rustls crypto providers are compiled in, rustls cannot
    // auto-detect which one to use. Explicitly install `ring`.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .build(https)
}

/// Compose the request pipeline. Stage order is load-bearing:
/// trace -> timeout -> body limit -> compression -> asset headers ->
/// method override -> static files -> dynamic app (sessions, identity,
/// CSRF on `/api` only, dispatch). See [`pipeline`] for the stages.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    // CSRF wraps every API route *and* the API fallback, so an unmatched
    // `/api/...` path without a token still answers 403, not 404.
    let api = controllers::assemble(controllers::api::routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            pipeline::csrf::require_token,
        ));

    let dynamic = controllers::assemble(controllers::pages())
        .route("/favicon.ico", get(favicon))
        .nest("/api", api)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            pipeline::scrub::scrub_errors,
        ))
        .with_state(state.clone());

    // Files win over dynamic routes, as they always have; misses and
    // non-GET verbs fall through to the application.
    let static_files = ServeDir::new(&config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(dynamic);

    Router::new()
        .fallback_service(static_files)
        .layer(middleware::from_fn(pipeline::method_override::rewrite))
        .layer(middleware::from_fn_with_state(
            state,
            pipeline::assets::cache_and_cors,
        ))
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> AppError {
    AppError::NotFound
}

// Only reached when no favicon exists on disk; answer without touching
// controllers or the database.
async fn favicon() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
