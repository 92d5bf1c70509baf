//! The front page: a listing of local meetups.

use axum::extract::State;
use axum::response::Html;
use futures_util::TryStreamExt;
use minijinja::context;
use mongodb::bson::doc;

use crate::controllers::RouteDef;
use crate::error::AppError;
use crate::models::Meetup;
use crate::server::AppState;

pub fn routes() -> Vec<RouteDef> {
    vec![RouteDef::get("/", index)]
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut cursor = state
        .db
        .collection::<Meetup>("meetups")
        .find(doc! {})
        .sort(doc! { "name": 1 })
        .await?;

    let mut meetups = Vec::new();
    while let Some(meetup) = cursor.try_next().await? {
        meetups.push(meetup);
    }

    state.views.render("index.html", context! { meetups => meetups })
}
