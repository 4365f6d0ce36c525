use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use weather_core::{Config, config::API_KEY_ENV, provider_from_config};
use weather_server::{AppState, create_router};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather web service")]
pub struct Cli {
    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to bind, overriding the config file.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overriding the config file.
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref())?;

        let provider = provider_from_config(&config, std::env::var(API_KEY_ENV).ok())
            .inspect_err(|err| error!("Cannot start application: {err:#}"))?;
        info!("API key configured");

        let host = self.host.unwrap_or(config.server.host);
        let port = self.port.unwrap_or(config.server.port);
        let addr = format!("{host}:{port}");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("Server listening on http://{addr}");

        let app = create_router(AppState::new(provider));
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        info!("Weather server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from(["weather-server", "--port", "9090", "--host", "127.0.0.1"]);
        assert_eq!(cli.port, Some(9090));
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Cli::try_parse_from(["weather-server", "--port", "99999"]).is_err());
    }
}
