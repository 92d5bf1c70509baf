//! `citydevs run` — start the web server.
//!
//! Builds the immutable [`AppConfig`], the shared Mongo handle, the
//! template environment, and the outbound HTTP client, then serves the
//! assembled pipeline with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::AppConfig;
use crate::error::CitydevsError;
use crate::server::{self, AppState};
use crate::views::Views;
use crate::{db, logging};

pub async fn execute(args: RunArgs) -> Result<(), CitydevsError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let config = Arc::new(AppConfig::from_args(&args)?);

    let database = db::connect(&config).await?;
    let views = Views::new(&config)?;

    let state = AppState {
        signing_key: config.signing_key(),
        db: database,
        views,
        http_client: server::build_http_client(),
        config: Arc::clone(&config),
    };

    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        static_dir = %config.static_dir.display(),
        database = %config.database,
        production = config.production,
        login_enabled = config.oauth.is_some(),
        "citydevs listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("citydevs stopped");
    Ok(())
}
