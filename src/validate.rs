//! Field-level input validation helpers for the JSON API.
//!
//! Handlers accumulate [`FieldError`] values and convert a non-empty list
//! into [`AppError::Invalid`], which renders as a 400 with a JSON error
//! array. Messages include a hint where one helps.

use serde::Serialize;
use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

pub fn require(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: "cannot be empty".into(),
        });
    }
}

pub fn require_url(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    match Url::parse(value) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        Ok(parsed) => errors.push(FieldError {
            field,
            message: format!(
                "unsupported scheme '{}' (expected http or https)",
                parsed.scheme()
            ),
        }),
        Err(_) => errors.push(FieldError {
            field,
            message: format!("'{value}' is not a valid URL"),
        }),
    }
}

pub fn optional_url(field: &'static str, value: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(value) = value {
        require_url(field, value, errors);
    }
}

pub fn finish(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Invalid(errors))
    }
}
