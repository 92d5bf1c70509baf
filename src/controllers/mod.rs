//! Per-resource route declarations and handlers.
//!
//! Each controller exposes a declarative `routes()` returning
//! [`RouteDef`] values — (method, path, handler) tuples — and the server
//! merges them with [`assemble`]. Registration is data, not side effects:
//! [`route_table`] reproduces the full merged table for `citydevs routes`
//! and for tests, without starting anything.
//!
//! - [`about`] -- the about page.
//! - [`admin`] -- the admin and profile pages (access-control gates).
//! - [`api`] -- the JSON API under `/api` (CSRF-guarded).
//! - [`auth`] -- GitHub OAuth login, logout, and `/me`.
//! - [`company`] -- the companies listing.
//! - [`developer`] -- the developers listing.
//! - [`meetup`] -- the front page meetups listing.
//! - [`sitemap`] -- `/sitemap.xml`.

pub mod about;
pub mod admin;
pub mod api;
pub mod auth;
pub mod company;
pub mod developer;
pub mod meetup;
pub mod sitemap;

use axum::handler::Handler;
use axum::routing::{self, MethodRouter};
use axum::Router;

use crate::server::AppState;

/// One declarative route: method and path for inspection, the handler
/// service for assembly.
pub struct RouteDef {
    pub method: &'static str,
    pub path: &'static str,
    service: MethodRouter<AppState>,
}

impl RouteDef {
    pub fn get<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            method: "GET",
            path,
            service: routing::get(handler),
        }
    }

    pub fn post<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            method: "POST",
            path,
            service: routing::post(handler),
        }
    }

    pub fn delete<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            method: "DELETE",
            path,
            service: routing::delete(handler),
        }
    }
}

/// Everything mounted at the root (the API mounts separately under `/api`
/// so the CSRF layer can wrap it).
#[must_use]
pub fn pages() -> Vec<RouteDef> {
    [
        sitemap::routes(),
        meetup::routes(),
        about::routes(),
        admin::routes(),
        developer::routes(),
        company::routes(),
        auth::routes(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Merge declarative routes into a router. Same-path entries with
/// different methods merge; overlapping methods would be a programmer
/// error axum reports at startup.
#[must_use]
pub fn assemble(defs: Vec<RouteDef>) -> Router<AppState> {
    defs.into_iter()
        .fold(Router::new(), |router, def| router.route(def.path, def.service))
}

/// The full merged table as (method, path) pairs, API prefix applied.
#[must_use]
pub fn route_table() -> Vec<(&'static str, String)> {
    let mut table: Vec<(&'static str, String)> = pages()
        .iter()
        .map(|def| (def.method, def.path.to_string()))
        .collect();
    table.extend(
        api::routes()
            .iter()
            .map(|def| (def.method, format!("/api{}", def.path))),
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_mounted_surface() {
        let table = route_table();
        let has = |method: &str, path: &str| {
            table
                .iter()
                .any(|(m, p)| *m == method && p == path)
        };

        assert!(has("GET", "/"));
        assert!(has("GET", "/about"));
        assert!(has("GET", "/developers"));
        assert!(has("GET", "/companies"));
        assert!(has("GET", "/sitemap.xml"));
        assert!(has("GET", "/admin"));
        assert!(has("GET", "/profile"));
        assert!(has("GET", "/auth"));
        assert!(has("GET", "/auth/callback"));
        assert!(has("GET", "/me"));
        assert!(has("GET", "/logout"));
        assert!(has("POST", "/api/user"));
        assert!(has("GET", "/api/user"));
        assert!(has("GET", "/api/user/{id}"));
        assert!(has("DELETE", "/api/user/{id}"));
        assert!(has("POST", "/api/company"));
        assert!(has("GET", "/api/company"));
        assert!(has("GET", "/api/company/{id}"));
        assert!(has("DELETE", "/api/company/{id}"));
    }

    #[test]
    fn assembly_accepts_the_full_table() {
        // Overlapping method+path pairs would panic here, not at request time.
        let _ = assemble(pages());
        let _ = assemble(api::routes());
    }
}
