//! GitHub OAuth login, logout, and the session-info route.
//!
//! `/auth` redirects to the provider; `/auth/callback` exchanges the code
//! for a token, fetches the provider profile, upserts the user record,
//! and writes the identity plus a fresh CSRF token into the session. The
//! admin flag always comes from the stored record — the provider only
//! proves who the caller is, never what they may do. When no client id
//! is configured the routes answer 404, matching a deploy without login.

use axum::extract::{Query, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use axum::response::Redirect;
use axum::Json;
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use mongodb::bson::doc;
use serde::Deserialize;

use crate::config::OauthProvider;
use crate::controllers::RouteDef;
use crate::error::AppError;
use crate::models::User;
use crate::pipeline::identity::{CurrentUser, Identity};
use crate::pipeline::session::{self, Session};
use crate::server::{AppState, HttpClient};

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::get("/auth", login),
        RouteDef::get("/auth/callback", callback),
        RouteDef::get("/me", me),
        RouteDef::get("/logout", logout),
    ]
}

async fn login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let oauth = state.config.oauth.as_ref().ok_or(AppError::NotFound)?;

    let mut url = oauth.authorize_url.clone();
    url.query_pairs_mut()
        .append_pair("client_id", &oauth.client_id)
        .append_pair("scope", "user:email");
    Ok(Redirect::to(url.as_str()))
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: String,
}

async fn callback(
    State(state): State<AppState>,
    signed: SignedCookieJar,
    plain: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(SignedCookieJar, CookieJar, Redirect), AppError> {
    let oauth = state.config.oauth.as_ref().ok_or(AppError::NotFound)?;

    let token = exchange_code(&state.http_client, oauth, &query.code).await?;
    let profile = fetch_profile(&state.http_client, oauth, &token).await?;

    let users = state.db.collection::<User>("users");
    let user = match users.find_one(doc! { "login": &profile.login }).await? {
        Some(existing) => existing,
        None => {
            let mut user = User {
                id: None,
                login: profile.login,
                name: profile.name,
                url: None,
                admin: false,
            };
            let inserted = users.insert_one(&user).await?;
            user.id = inserted.inserted_id.as_object_id();
            user
        }
    };

    let mut session = Session::load(&signed)?;
    session.user = Some(Identity {
        user_id: user.id.map(|oid| oid.to_hex()).unwrap_or_default(),
        login: user.login,
        name: user.name,
        admin: user.admin,
    });
    let csrf = session.rotate_csrf();

    let signed = session.store(signed)?;
    let plain = plain.add(session::xsrf_cookie(csrf));

    tracing::info!(login = %session.user.as_ref().map_or("", |u| u.login.as_str()), "login");
    Ok((signed, plain, Redirect::to("/")))
}

async fn me(user: CurrentUser) -> Result<Json<Identity>, AppError> {
    Ok(Json(user.require()?))
}

async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (Session::clear(jar), Redirect::to("/"))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderProfile {
    login: String,
    #[serde(default)]
    name: Option<String>,
}

async fn exchange_code(
    client: &HttpClient,
    oauth: &OauthProvider,
    code: &str,
) -> Result<String, AppError> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", &oauth.client_id)
        .append_pair("client_secret", &oauth.client_secret)
        .append_pair("code", code)
        .finish();

    let req = http::Request::post(oauth.token_url.as_str())
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(ACCEPT, "application/json")
        .body(Full::new(Bytes::from(body)))
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let res = client
        .request(req)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;
    if !res.status().is_success() {
        return Err(AppError::Upstream(format!(
            "token endpoint answered {}",
            res.status()
        )));
    }

    let bytes = res
        .into_body()
        .collect()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?
        .to_bytes();
    let token: TokenResponse = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Upstream(format!("bad token response: {e}")))?;
    Ok(token.access_token)
}

async fn fetch_profile(
    client: &HttpClient,
    oauth: &OauthProvider,
    token: &str,
) -> Result<ProviderProfile, AppError> {
    let req = http::Request::get(oauth.user_api_url.as_str())
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(ACCEPT, "application/json")
        // GitHub rejects requests without a User-Agent.
        .header(USER_AGENT, concat!("citydevs/", env!("CARGO_PKG_VERSION")))
        .body(Full::new(Bytes::new()))
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let res = client
        .request(req)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;
    if !res.status().is_success() {
        return Err(AppError::Upstream(format!(
            "user endpoint answered {}",
            res.status()
        )));
    }

    let bytes = res
        .into_body()
        .collect()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?
        .to_bytes();
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Upstream(format!("bad profile response: {e}")))
}
