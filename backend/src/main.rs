//! Users API entry-point: loads settings, initialises tracing and serves HTTP.

mod server;

use std::net::ToSocketAddrs;

use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_api::settings::ServerSettings;

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

    let settings = ServerSettings::load()?;
    let bind_addr = (settings.host(), settings.port())
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| eyre!("no address for {}:{}", settings.host(), settings.port()))?;

    let config = ServerConfig::new(bind_addr)
        .with_schema(settings.schema_config())
        .with_docs(settings.docs_enabled());

    create_server(config)?.await?;
    Ok(())
}
