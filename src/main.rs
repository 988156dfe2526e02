//! HTTP server for the Working-Time Engine.
//!
//! Configuration comes from the environment (a `.env` file is honored):
//! - `WORKTIME_CONFIG_DIR` - configuration directory (default `./config/default`)
//! - `WORKTIME_BIND_ADDR` - listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG` - log filter (default `info`)

use std::env;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use worktime_engine::api::{AppState, create_router};
use worktime_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer())
        .init();

    let config_dir = env::var("WORKTIME_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind_addr = env::var("WORKTIME_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir).map_err(|err| {
        error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
        err
    })?;

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, "Working-time engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
