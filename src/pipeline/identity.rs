//! Authentication materialization as a typed extractor.
//!
//! Handlers that care about who is calling declare a [`CurrentUser`]
//! parameter and receive a resolved `Option<Identity>` — dependency
//! injection at the dispatch seam rather than a middleware mutating a
//! shared context. The identity is read from the signed session cookie
//! once per request and is immutable from then on.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::session::Session;
use crate::server::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

/// The resolved caller: `None` is anonymous.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

impl CurrentUser {
    /// 403 when anonymous. The admin/profile pages have always answered
    /// 403 for "no identity" and 401 for "not enough privilege"; see
    /// [`AppError::status`].
    pub fn require(self) -> Result<Identity, AppError> {
        self.0.ok_or(AppError::MissingCredentials)
    }

    /// 403 when anonymous, 401 when authenticated but not an admin.
    pub fn require_admin(self) -> Result<Identity, AppError> {
        let identity = self.require()?;
        if identity.admin {
            Ok(identity)
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match SignedCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        let session = Session::load(&jar)?;
        Ok(Self(session.user))
    }
}
