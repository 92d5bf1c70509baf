//! HTTP method override for HTML forms.
//!
//! Browsers only submit GET and POST, so forms express other verbs
//! through a hidden `_method` field (or the `x-http-method-override`
//! header). The rewrite happens before any routing decision; only POST
//! requests are eligible and only PUT, PATCH, and DELETE may be named —
//! overriding into GET or HEAD would turn a mutation into a cacheable
//! read.

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::Response;
use http_body_util::BodyExt;

use crate::error::AppError;

pub const OVERRIDE_HEADER: &str = "x-http-method-override";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn allowed(method: &Method) -> bool {
    matches!(*method, Method::PUT | Method::PATCH | Method::DELETE)
}

/// Pull `_method` out of an urlencoded form body.
#[must_use]
pub fn form_method(body: &[u8]) -> Option<Method> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == "_method")
        .and_then(|(_, value)| value.to_uppercase().parse::<Method>().ok())
        .filter(allowed)
}

#[must_use]
pub fn header_method(value: &str) -> Option<Method> {
    value.to_uppercase().parse::<Method>().ok().filter(allowed)
}

pub async fn rewrite(req: Request, next: Next) -> Result<Response, AppError> {
    if req.method() != Method::POST {
        return Ok(next.run(req).await);
    }

    if let Some(method) = req
        .headers()
        .get(OVERRIDE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(header_method)
    {
        let mut req = req;
        *req.method_mut() = method;
        return Ok(next.run(req).await);
    }

    let is_form = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));
    if !is_form {
        return Ok(next.run(req).await);
    }

    // Buffer the form to sniff `_method`, then hand the handler an
    // equivalent request. The body-size guard upstream bounds this read.
    let (mut parts, body) = req.into_parts();
    let bytes = body
        .collect()
        .await
        .map_err(|_| AppError::PayloadTooLarge)?
        .to_bytes();

    if let Some(method) = form_method(&bytes) {
        parts.method = method;
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_method_field() {
        assert_eq!(
            form_method(b"name=x&_method=delete"),
            Some(Method::DELETE)
        );
        assert_eq!(form_method(b"_method=PUT"), Some(Method::PUT));
    }

    #[test]
    fn ignores_missing_or_unknown_field() {
        assert_eq!(form_method(b"name=x"), None);
        assert_eq!(form_method(b"_method=banana%20split"), None);
    }

    #[test]
    fn never_overrides_into_a_read() {
        assert_eq!(form_method(b"_method=GET"), None);
        assert_eq!(form_method(b"_method=HEAD"), None);
        assert_eq!(header_method("get"), None);
    }

    #[test]
    fn header_parsing_is_case_insensitive() {
        assert_eq!(header_method("delete"), Some(Method::DELETE));
        assert_eq!(header_method("Patch"), Some(Method::PATCH));
    }
}
