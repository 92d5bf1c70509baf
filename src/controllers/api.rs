//! The JSON API under `/api`.
//!
//! The only way data comes into the site, which is why the CSRF layer
//! wraps this router and nothing else. Creation payloads are validated
//! field by field; deletes require an admin identity on top of the CSRF
//! token.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::controllers::RouteDef;
use crate::error::AppError;
use crate::models::{Company, User};
use crate::pipeline::identity::CurrentUser;
use crate::server::AppState;
use crate::validate;

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::post("/user", create_user),
        RouteDef::get("/user", list_users),
        RouteDef::get("/user/{id}", show_user),
        RouteDef::delete("/user/{id}", delete_user),
        RouteDef::post("/company", create_company),
        RouteDef::get("/company", list_companies),
        RouteDef::get("/company/{id}", show_company),
        RouteDef::delete("/company/{id}", delete_company),
    ]
}

fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest(format!("'{id}' is not a valid id")))
}

// -- Users --

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let mut errors = Vec::new();
    validate::require("login", &payload.login, &mut errors);
    validate::optional_url("url", payload.url.as_deref(), &mut errors);
    validate::finish(errors)?;

    // The admin flag never comes from the payload.
    let mut user = User {
        id: None,
        login: payload.login,
        name: payload.name,
        url: payload.url,
        admin: false,
    };
    let inserted = state.db.collection::<User>("users").insert_one(&user).await?;
    user.id = inserted.inserted_id.as_object_id();

    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let mut cursor = state
        .db
        .collection::<User>("users")
        .find(doc! {})
        .sort(doc! { "login": 1 })
        .await?;

    let mut users = Vec::new();
    while let Some(user) = cursor.try_next().await? {
        users.push(user);
    }
    Ok(Json(users))
}

async fn show_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let oid = parse_id(&id)?;
    let user = state
        .db
        .collection::<User>("users")
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    let oid = parse_id(&id)?;
    let result = state
        .db
        .collection::<User>("users")
        .delete_one(doc! { "_id": oid })
        .await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// -- Companies --

#[derive(Debug, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<NewCompany>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let mut errors = Vec::new();
    validate::require("name", &payload.name, &mut errors);
    validate::require_url("url", &payload.url, &mut errors);
    validate::finish(errors)?;

    let mut company = Company {
        id: None,
        name: payload.name,
        url: payload.url,
        description: payload.description,
    };
    let inserted = state
        .db
        .collection::<Company>("companies")
        .insert_one(&company)
        .await?;
    company.id = inserted.inserted_id.as_object_id();

    Ok((StatusCode::CREATED, Json(company)))
}

async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Company>>, AppError> {
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
    Ok(Json(companies))
}

async fn show_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Company>, AppError> {
    let oid = parse_id(&id)?;
    let company = state
        .db
        .collection::<Company>("companies")
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(company))
}

async fn delete_company(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    let oid = parse_id(&id)?;
    let result = state
        .db
        .collection::<Company>("companies")
        .delete_one(doc! { "_id": oid })
        .await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_parse_or_reject_cleanly() {
        assert!(parse_id("65f000000000000000000001").is_ok());
        assert!(matches!(
            parse_id("not-an-id"),
            Err(AppError::BadRequest(_))
        ));
    }
}
