//! Citydevs is a server-rendered directory of local developers, companies,
//! and meetups.
//!
//! Every inbound request flows through a fixed-order pipeline of
//! cross-cutting policies (tracing, timeout, body-size limit, compression,
//! asset cache headers, method override, static files) before reaching a
//! resource controller. Controllers register declarative route lists that
//! the server assembles into one router; authentication is resolved into a
//! typed `Option<Identity>` per request rather than smuggled through shared
//! mutable context.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, routes).
//! - [`config`] -- The immutable [`AppConfig`](config::AppConfig) value
//!   built once at startup and shared by reference.
//! - [`controllers`] -- Per-resource route declarations and handlers.
//! - [`db`] -- MongoDB client construction (one client, shared).
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`languages`] -- The programming-language list exposed to views.
//! - [`logging`] -- Structured tracing setup with JSON and pretty output.
//! - [`models`] -- Serde document types for the Mongo collections.
//! - [`pipeline`] -- The cross-cutting request-processing stages.
//! - [`server`] -- Axum router assembly, shared state, graceful shutdown.
//! - [`validate`] -- Field-level input validation helpers for the API.
//! - [`views`] -- HTML templating with auto-escaping always on.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod languages;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod validate;
pub mod views;
