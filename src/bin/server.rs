//! HTTP server binary for the card enrichment API.

use std::path::PathBuf;
use std::sync::Arc;

use card_enrich::{EnrichConfig, EnrichServer, Enricher};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Enrich scanned contact records with company-site and profile data.
#[derive(Parser)]
#[command(name = "card-enrich-server", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("card_enrich=info,enrich_web=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = if let Some(ref path) = cli.config {
        EnrichConfig::from_file(path)?
    } else {
        EnrichConfig::default()
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    info!("card-enrich v{}", env!("CARGO_PKG_VERSION"));

    let enricher = Arc::new(Enricher::from_config(&config)?);
    let server = EnrichServer::start(enricher, &config.server).await?;

    tokio::select! {
        result = server.wait() => result?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }
    Ok(())
}
