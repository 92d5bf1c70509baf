//! The immutable application configuration.
//!
//! [`AppConfig`] is constructed exactly once in [`cmd::run`](crate::cmd::run)
//! from CLI flags and environment variables, then shared by `Arc` into the
//! router assembler. Nothing mutates it after startup; the cache allow-list
//! and size/time limits are plain read-only data.

use std::path::PathBuf;
use std::time::Duration;

use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use url::Url;

use crate::cli::{AppEnv, RunArgs};
use crate::error::CitydevsError;

/// `public, max-age=290304000` is roughly nine years. Asset paths under the
/// allow-list are content-addressed by their CDN path, so uncaching means
/// renaming the file.
pub const LONG_CACHE_MAX_AGE: u64 = 290_304_000;
pub const LONG_CACHE_VALUE: &str = "public, max-age=290304000";

const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct OauthProvider {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: Url,
    pub token_url: Url,
    pub user_api_url: Url,
}

impl OauthProvider {
    /// GitHub endpoints, the only provider the site authenticates against.
    pub fn github(client_id: String, client_secret: String) -> Self {
        // These literals are valid URLs, parse cannot fail.
        let parse = |s: &str| Url::parse(s).unwrap_or_else(|_| unreachable!());
        Self {
            client_id,
            client_secret,
            authorize_url: parse("https://github.com/login/oauth/authorize"),
            token_url: parse("https://github.com/login/oauth/access_token"),
            user_api_url: parse("https://api.github.com/user"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
    pub cdn: Option<String>,
    pub mongo_url: String,
    pub database: String,
    pub cookie_secret: String,
    pub static_dir: PathBuf,
    pub views_dir: PathBuf,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    pub production: bool,
    pub oauth: Option<OauthProvider>,
    /// Entries ending in `/` match as path prefixes, others as exact paths.
    pub long_cache_paths: Vec<String>,
    pub fonts_prefix: String,
}

impl AppConfig {
    pub fn from_args(args: &RunArgs) -> Result<Self, CitydevsError> {
        if args.cookie_secret.len() < MIN_SECRET_BYTES {
            return Err(CitydevsError::WeakCookieSecret {
                min: MIN_SECRET_BYTES,
                got: args.cookie_secret.len(),
            });
        }

        let oauth = match (&args.github_client_id, &args.github_client_secret) {
            (Some(id), Some(secret)) => Some(OauthProvider::github(id.clone(), secret.clone())),
            (None, None) => None,
            _ => return Err(CitydevsError::PartialOauthConfig),
        };

        Ok(Self {
            host: args.host.clone(),
            port: args.port,
            base_url: args.base_url.trim_end_matches('/').to_string(),
            cdn: args.cdn.clone(),
            mongo_url: args.mongo_url.clone(),
            database: args.database.clone(),
            cookie_secret: args.cookie_secret.clone(),
            static_dir: args.static_dir.clone(),
            views_dir: args.views_dir.clone(),
            request_timeout: Duration::from_millis(args.timeout),
            max_body_bytes: args.max_body,
            production: args.env == AppEnv::Production,
            oauth,
            long_cache_paths: Self::default_long_cache_paths(),
            fonts_prefix: "/fonts/".to_string(),
        })
    }

    /// Font assets plus the two background images referenced from every page.
    #[must_use]
    pub fn default_long_cache_paths() -> Vec<String> {
        vec![
            "/fonts/".to_string(),
            "/images/bg.jpg".to_string(),
            "/images/bg-med.jpg".to_string(),
        ]
    }

    /// Cookie-signing key derived from the configured secret.
    ///
    /// `Key::from` wants exactly 64 bytes of material; stretching the secret
    /// through SHA-512 keeps the derivation deterministic so separately
    /// started processes verify each other's cookies.
    #[must_use]
    pub fn signing_key(&self) -> Key {
        let digest = Sha512::digest(self.cookie_secret.as_bytes());
        Key::from(digest.as_slice())
    }
}
