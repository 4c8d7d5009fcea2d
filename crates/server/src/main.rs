//! Modrelay server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use modrelay_core::AppConfig;
use modrelay_server::{AppState, build_chain, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Modrelay - a module proxy server
#[derive(Parser, Debug)]
#[command(name = "modrelayd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "MODRELAY_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Modrelay v{}", env!("CARGO_PKG_VERSION"));

    // Config file is optional; env vars can provide or override everything.
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("MODRELAY_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    if config.resolvers.is_empty() {
        tracing::warn!("no resolvers configured, every request will be a miss");
    }

    let chain = build_chain(&config).context("failed to build resolver chain")?;
    let state = AppState::new(config.clone(), chain).context("invalid configuration")?;
    let app = create_router(state);

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
