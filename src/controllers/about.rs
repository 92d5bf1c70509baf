//! The about page.

use axum::extract::State;
use axum::response::Html;
use minijinja::context;

use crate::controllers::RouteDef;
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Vec<RouteDef> {
    vec![RouteDef::get("/about", about)]
}

async fn about(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.views.render("about.html", context! {})
}
