//! The developers listing with programming-language facets.

use axum::extract::State;
use axum::response::Html;
use futures_util::TryStreamExt;
use minijinja::context;
use mongodb::bson::doc;

use crate::controllers::RouteDef;
use crate::error::AppError;
use crate::models::Developer;
use crate::server::AppState;

pub fn routes() -> Vec<RouteDef> {
    vec![RouteDef::get("/developers", index)]
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut cursor = state
        .db
        .collection::<Developer>("developers")
        .find(doc! {})
        .sort(doc! { "login": 1 })
        .await?;

    let mut developers = Vec::new();
    while let Some(developer) = cursor.try_next().await? {
        developers.push(developer);
    }

    // The language facets come from the `programming_languages` template
    // global, not the database.
    state
        .views
        .render("developers.html", context! { developers => developers })
}
