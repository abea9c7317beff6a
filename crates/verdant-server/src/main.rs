//! Verdant Server CLI
//!
//! Starts the HTTP server for eco-friendly shopping chat and recommendations.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use verdant_server::{config::ServerConfig, start_server};

/// Eco-commerce assistant HTTP server
#[derive(Debug, Parser)]
#[command(name = "verdant-server", version)]
struct Args {
    /// Load configuration from a TOML file
    #[arg(short, long, env = "VERDANT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            warn!("No config file specified, using defaults and GEMINI_API_KEY");
            ServerConfig::from_env().context("Failed to build config from environment")?
        }
    };

    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.bind_port = port;
    }

    start_server(config).await?;

    Ok(())
}
