//! Structured logging setup using the `tracing` ecosystem.
//!
//! JSON output for production pipelines, pretty-printed output for a
//! terminal; `--json` / `--pretty` force a format, otherwise a TTY check
//! decides. Per-request logging itself is the pipeline's `TraceLayer`;
//! this module only installs the subscriber.

use std::io::IsTerminal;

use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[must_use]
pub fn resolve_format(pretty: bool, json: bool) -> LogFormat {
    match (pretty, json) {
        (_, true) => LogFormat::Json,
        (true, _) => LogFormat::Pretty,
        _ if std::io::stdout().is_terminal() => LogFormat::Pretty,
        _ => LogFormat::Json,
    }
}

pub fn init(level: &LogLevel, format: LogFormat) {
    let base =
        tracing_subscriber::registry().with(Targets::new().with_default(level.to_tracing_level()));

    match format {
        LogFormat::Json => base.with(fmt::layer().json().with_target(false)).init(),
        LogFormat::Pretty => base.with(fmt::layer().pretty()).init(),
    }
}
