//! Shared fixtures: a real bound listener driven with reqwest, plus
//! helpers for forging signed session cookies the way the server would.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use citydevs::config::{AppConfig, OauthProvider};
use citydevs::pipeline::session::SESSION_COOKIE;
use citydevs::server::{self, AppState};
use citydevs::views::Views;

pub const TEST_SECRET: &str = "an adequately long secret for tests!!!!";

pub fn test_config(static_dir: PathBuf) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        base_url: "http://localhost:3000".into(),
        cdn: None,
        // Unroutable fast-failing target: controllers that touch the
        // database answer 500 quickly instead of hanging the test.
        mongo_url:
            "mongodb://127.0.0.1:9/?serverSelectionTimeoutMS=200&connectTimeoutMS=200".into(),
        database: "citydevs_test".into(),
        cookie_secret: TEST_SECRET.into(),
        static_dir,
        views_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/views")),
        request_timeout: Duration::from_secs(5),
        max_body_bytes: 262_144,
        production: false,
        oauth: None,
        long_cache_paths: AppConfig::default_long_cache_paths(),
        fonts_prefix: "/fonts/".into(),
    }
}

pub async fn build_state(config: AppConfig) -> AppState {
    let config = Arc::new(config);
    let client = mongodb::Client::with_uri_str(&config.mongo_url)
        .await
        .expect("mongo client");
    AppState {
        signing_key: config.signing_key(),
        db: client.database(&config.database),
        views: Views::new(&config).expect("views"),
        http_client: server::build_http_client(),
        config,
    }
}

pub async fn spawn(state: AppState) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let router = server::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

/// Produce the on-wire `Cookie` header value for a signed session, using
/// the same key derivation the server uses.
pub fn signed_session_cookie(config: &AppConfig, session_json: &str) -> String {
    let key = config.signing_key();
    let mut jar = cookie::CookieJar::new();
    jar.signed_mut(&key)
        .add(cookie::Cookie::new(SESSION_COOKIE, session_json.to_string()));
    let signed = jar.get(SESSION_COOKIE).expect("signed cookie");
    format!("{SESSION_COOKIE}={}", signed.value())
}

pub fn session_json(login: &str, admin: bool, csrf: Option<&str>) -> String {
    let user = serde_json::json!({
        "user_id": "65f000000000000000000001",
        "login": login,
        "name": null,
        "admin": admin,
    });
    let mut session = serde_json::json!({ "user": user });
    if let Some(token) = csrf {
        session["csrf_token"] = serde_json::json!(token);
    }
    session.to_string()
}

#[allow(dead_code)]
pub fn oauth_pointing_at(token_url: &str) -> OauthProvider {
    let mut oauth = OauthProvider::github("id".into(), "secret".into());
    oauth.token_url = url::Url::parse(token_url).unwrap();
    oauth
}
