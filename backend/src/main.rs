//! Admin API entry-point: reads configuration, connects the user store and
//! serves the REST endpoints until shutdown.

use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use admin_api::config::AdminConfig;
use admin_api::server::{StartupError, connect_repository, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AdminConfig::from_env(&DefaultEnv::new())?;
    let users = connect_repository(&config).await?;
    let server = create_server(&config.server, users).map_err(StartupError::from)?;
    server.await.map_err(StartupError::from)?;
    info!("server stopped");
    Ok(())
}
