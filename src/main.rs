//! Binary entry point: wire the OpenWeather client and file store into the
//! server and serve stdio until EOF.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use weather_mcp::server::weather_server;
use weather_mcp::{Config, FileStore, OpenWeatherClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for protocol frames.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let provider = Arc::new(
        OpenWeatherClient::new(config.api_key.as_str()).with_base_url(config.api_base.as_str()),
    );
    let store = Arc::new(FileStore::new(
        config.history_path(),
        config.favorites_path(),
    ));

    let server = weather_server(provider, store)?;
    server.run_stdio().await?;
    Ok(())
}
