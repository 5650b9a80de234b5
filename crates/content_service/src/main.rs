//! Repository content service.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use content_service::{run_server, AppState, GitHubClient, ServerConfig, Settings};

/// Repository content service - serves hosted repository listings as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on (overrides CONTENT_SERVICE_ADDR)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = Settings::from_env().context("invalid service settings")?;
    if settings.debug {
        warn!("Debug mode: error responses include upstream details");
    }

    let mut config = ServerConfig::from_settings(&settings);
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let client = GitHubClient::with_api_base(&settings.github_access_token, &settings.github_api_url)?;
    info!("Hosting API: {}", client.api_base());

    let state = AppState::new(Arc::new(client), settings.debug);
    run_server(state, config).await
}
