//! `GET /sitemap.xml` for crawlers.
//!
//! Lists the public pages only; session-gated and API surfaces stay out.

use std::fmt::Write;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use crate::controllers::RouteDef;
use crate::error::AppError;
use crate::server::AppState;

const PUBLIC_PAGES: &[&str] = &["/", "/about", "/developers", "/companies"];

pub fn routes() -> Vec<RouteDef> {
    vec![RouteDef::get("/sitemap.xml", sitemap)]
}

/// Render the urlset for a site rooted at `base_url`.
#[must_use]
pub fn render(base_url: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for page in PUBLIC_PAGES {
        // Writing to a String is infallible.
        let _ = writeln!(xml, "  <url><loc>{base_url}{page}</loc></url>");
    }
    xml.push_str("</urlset>\n");
    xml
}

async fn sitemap(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = render(&state.config.base_url);
    Ok(([(CONTENT_TYPE, "application/xml")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_public_pages_with_absolute_urls() {
        let xml = render("https://example.org");
        assert!(xml.contains("<loc>https://example.org/</loc>"));
        assert!(xml.contains("<loc>https://example.org/about</loc>"));
        assert!(xml.contains("<loc>https://example.org/developers</loc>"));
        assert!(xml.contains("<loc>https://example.org/companies</loc>"));
    }

    #[test]
    fn gated_pages_stay_out() {
        let xml = render("https://example.org");
        assert!(!xml.contains("/admin"));
        assert!(!xml.contains("/profile"));
        assert!(!xml.contains("/api"));
    }
}
