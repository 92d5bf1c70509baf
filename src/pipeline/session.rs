//! The signed-cookie session store.
//!
//! Sessions are a small typed struct serialized as JSON into one
//! HMAC-signed cookie, so the server trusts the contents without a
//! server-side store. A missing cookie or a bad signature yields the
//! anonymous session; a valid signature wrapping malformed JSON is a
//! client error. The CSRF token lives here because it must be bound to
//! the session it protects.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::identity::Identity;

pub const SESSION_COOKIE: &str = "citydevs.sess";

/// Readable mirror of the CSRF token for the client-side app. Deliberately
/// not `HttpOnly`: the JS client copies it into the `x-xsrf-token` header.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl Session {
    pub fn load(jar: &SignedCookieJar) -> Result<Self, AppError> {
        match jar.get(SESSION_COOKIE) {
            None => Ok(Self::default()),
            Some(cookie) => serde_json::from_str(cookie.value())
                .map_err(|_| AppError::BadRequest("malformed session cookie".into())),
        }
    }

    /// Replace the CSRF token, returning the new value for mirroring into
    /// the readable [`XSRF_COOKIE`].
    pub fn rotate_csrf(&mut self) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.csrf_token = Some(token.clone());
        token
    }

    /// Serialize into the signed jar. The jar signs on add, so the stored
    /// value is tamper-evident without being encrypted.
    pub fn store(&self, jar: SignedCookieJar) -> Result<SignedCookieJar, AppError> {
        let body = serde_json::to_string(self)
            .map_err(|e| AppError::Internal(format!("session serialization failed: {e}")))?;
        let mut cookie = Cookie::new(SESSION_COOKIE, body);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        Ok(jar.add(cookie))
    }

    #[must_use]
    pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
        let mut cookie = Cookie::from(SESSION_COOKIE);
        cookie.set_path("/");
        jar.remove(cookie)
    }
}

/// The plain (unsigned) XSRF mirror cookie.
#[must_use]
pub fn xsrf_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(XSRF_COOKIE, token);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_replaces_token() {
        let mut session = Session::default();
        let first = session.rotate_csrf();
        let second = session.rotate_csrf();
        assert_ne!(first, second);
        assert_eq!(session.csrf_token.as_deref(), Some(second.as_str()));
    }

    #[test]
    fn json_round_trip() {
        let mut session = Session {
            user: Some(Identity {
                user_id: "65f000000000000000000001".into(),
                login: "grace".into(),
                name: Some("Grace".into()),
                admin: true,
            }),
            csrf_token: None,
        };
        session.rotate_csrf();

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user.unwrap().login, "grace");
        assert_eq!(back.csrf_token, session.csrf_token);
    }

    #[test]
    fn xsrf_cookie_is_readable_by_scripts() {
        let cookie = xsrf_cookie("tok".into());
        assert_ne!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
