//! The companies listing.

use axum::extract::State;
use axum::response::Html;
use futures_util::TryStreamExt;
use minijinja::context;
use mongodb::bson::doc;

use crate::controllers::RouteDef;
use crate::error::AppError;
use crate::models::Company;
use crate::server::AppState;

pub fn routes() -> Vec<RouteDef> {
    vec![RouteDef::get("/companies", index)]
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut cursor = state
        .db
        .collection::<Company>("companies")
        .find(doc! {})
        .sort(doc! { "name": 1 })
        .await?;

    let mut companies = Vec::new();
    while let Some(company) = cursor.try_next().await? {
        companies.push(company);
    }

    state
        .views
        .render("companies.html", context! { companies => companies })
}
