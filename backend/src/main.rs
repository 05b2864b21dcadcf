//! Backend entry-point: loads settings, prepares adapters, and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use running_late::inbound::http::health::HealthState;
use running_late::outbound::persistence::{DbPool, PoolConfig, migrate};
use running_late::outbound::routes_api::GoogleRoutesProvider;
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("load server settings")?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(bind_addr).with_lifecycle(settings.lifecycle_config()?);

    if let Some(database_url) = settings.database_url.clone() {
        let pool_config = PoolConfig::new(database_url.clone()).with_max_size(settings.pool_max_size);
        info!(database = %pool_config.redacted_url(), "running pending migrations");
        let applied = migrate(database_url).await?;
        info!(applied, "migrations complete");
        let pool = DbPool::new(pool_config).await?;
        config = config.with_db_pool(pool);
    }

    if let Some(api_key) = settings.routes_api_key.as_deref() {
        let provider = GoogleRoutesProvider::new(
            settings.routes_endpoint()?,
            api_key,
            settings.route_timeout()?,
        )
        .wrap_err("build routes API client")?;
        config = config.with_route_provider(provider);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    let server = create_server(health_state, config).wrap_err("bind HTTP server")?;
    server.await.wrap_err("HTTP server failed")
}
