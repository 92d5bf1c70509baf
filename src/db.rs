//! MongoDB client construction.
//!
//! One client is built at startup and shared by every request through
//! [`AppState`](crate::server::AppState). The driver connects lazily, so
//! an unreachable database surfaces on the first query rather than here;
//! supervising that is the deployment's job, not the pipeline's.

use crate::config::AppConfig;
use crate::error::CitydevsError;

pub async fn connect(config: &AppConfig) -> Result<mongodb::Database, CitydevsError> {
    let client = mongodb::Client::with_uri_str(&config.mongo_url).await?;
    Ok(client.database(&config.database))
}
