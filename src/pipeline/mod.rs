//! Cross-cutting request-processing stages.
//!
//! The stages compose in a fixed order in [`server::build_router`]
//! (outermost first): trace logging, the 5-second deadline, the 0.25 MB
//! body ceiling, response compression, asset cache/CORS headers, method
//! override, static file serving, and only then the dynamic application
//! with sessions, identity, CSRF, and dispatch. Each stage may depend on
//! state established by an earlier one, so the order is load-bearing;
//! a guard that fires terminates the request and nothing downstream runs.
//!
//! - [`assets`] -- long-lived cache directives and font CORS headers.
//! - [`csrf`] -- session-bound token verification for `/api/` only.
//! - [`identity`] -- the typed `Option<Identity>` handlers receive.
//! - [`method_override`] -- `_method` form-field verb rewriting.
//! - [`scrub`] -- production-mode suppression of 5xx detail.
//! - [`session`] -- the signed-cookie session store.
//!
//! [`server::build_router`]: crate::server::build_router

pub mod assets;
pub mod csrf;
pub mod identity;
pub mod method_override;
pub mod scrub;
pub mod session;
