//! The admin and profile pages.
//!
//! A three-state gate: anonymous callers get 403 ("Authentication
//! required"), authenticated non-admins get 401 ("Forbidden") on
//! `/admin`, and `/profile` renders the same view for any authenticated
//! identity. The inverted status codes and the shared view are
//! long-standing observable behavior, preserved as-is.

use axum::extract::State;
use axum::response::Html;
use minijinja::context;

use crate::controllers::RouteDef;
use crate::error::AppError;
use crate::pipeline::identity::CurrentUser;
use crate::server::AppState;

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::get("/admin", admin),
        RouteDef::get("/profile", profile),
    ]
}

async fn admin(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, AppError> {
    let identity = user.require_admin()?;
    state.views.render("admin.html", context! { user => identity })
}

async fn profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, AppError> {
    let identity = user.require()?;
    state.views.render("admin.html", context! { user => identity })
}
