//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, routes), and their associated argument structs.
//! Every flag has an environment variable equivalent for container
//! deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "citydevs",
    version,
    about = "Server-rendered directory of local developers, companies, and meetups",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        citydevs run                         Start on port 3000\n  \
        citydevs run -p 8080 --pretty        Local dev mode\n  \
        citydevs routes                      Print the route table\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Run(Box<RunArgs>),

    /// Print the assembled route table without starting the server
    Routes,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        citydevs run                                  Defaults (port 3000)\n  \
        citydevs run -p 8080 --pretty                 Local dev mode\n  \
        MONGO_URL=mongodb://db/citydevs citydevs run  Point at a real database")]
pub struct RunArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Public base URL of the site (used in the sitemap)
    #[arg(long, env = "BASE_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// CDN base URL prepended to asset paths in views
    #[arg(long, env = "CDN")]
    pub cdn: Option<String>,

    /// Directory served as static assets
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Directory containing HTML templates
    #[arg(long, env = "VIEWS_DIR", default_value = "views")]
    pub views_dir: PathBuf,

    /// Production mode (suppresses error detail in responses)
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub env: AppEnv,

    // -- Persistence --
    /// MongoDB connection string
    #[arg(
        long,
        env = "MONGO_URL",
        default_value = "mongodb://localhost:27017",
        help_heading = "Persistence"
    )]
    pub mongo_url: String,

    /// MongoDB database name
    #[arg(
        long,
        env = "MONGO_DB",
        default_value = "citydevs",
        help_heading = "Persistence"
    )]
    pub database: String,

    // -- Sessions & Authentication --
    /// Secret used to sign session cookies (at least 32 bytes)
    #[arg(long, env = "COOKIE_SECRET", help_heading = "Sessions & Authentication")]
    pub cookie_secret: String,

    /// GitHub OAuth client id (enables /auth routes)
    #[arg(long, env = "GITHUB_CLIENT_ID", help_heading = "Sessions & Authentication")]
    pub github_client_id: Option<String>,

    /// GitHub OAuth client secret
    #[arg(
        long,
        env = "GITHUB_CLIENT_SECRET",
        help_heading = "Sessions & Authentication"
    )]
    pub github_client_secret: Option<String>,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Per-request deadline in milliseconds
    #[arg(
        long,
        env = "REQUEST_TIMEOUT_MS",
        default_value_t = 5000,
        help_heading = "Tuning"
    )]
    pub timeout: u64,

    /// Max request body size in bytes
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = 262_144,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AppEnv {
    Development,
    Production,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
