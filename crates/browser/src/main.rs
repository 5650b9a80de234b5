//! Repo Browser - a tabbed browser shell with repository listings.

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use browser::{console, ShellConfig};
use networking::ContentServiceClient;
use ui::{Browser, ShellEvent, ShellEventKind};

/// Repo Browser - a tabbed browser shell with repository listings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to open in the first tab
    url: Option<String>,

    /// Content service base URL (overrides CONTENT_SERVICE_URL)
    #[arg(long)]
    service_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Repo Browser v{}", browser::VERSION);

    let mut config = ShellConfig::from_env()?;
    if let Some(service_url) = args.service_url.as_deref() {
        config = config.with_service_url(service_url)?;
    }
    info!("Content service: {}", config.service_url);

    let client = ContentServiceClient::new(&config.service_url, config.client_config())?;
    let mut browser = Browser::new(config.shell_settings(), Box::new(client));

    browser.subscribe(ShellEventKind::TabOpened, |event| debug!(?event, "Tab opened"));
    browser.subscribe(ShellEventKind::TabClosed, |event| debug!(?event, "Tab closed"));
    browser.subscribe(ShellEventKind::WindowTitleChanged, |event| {
        if let ShellEvent::WindowTitleChanged(title) = event {
            debug!("Window title: {}", title);
        }
    });

    if let Some(url) = args.url.as_deref() {
        info!("Opening: {}", url);
        // A rejected pseudo-URL is shown as a notice in the tab.
        let _ = browser.navigate(url);
    }

    let stdin = io::stdin();
    console::run(&mut browser, stdin.lock(), io::stdout().lock())?;

    info!("Browser shutdown complete");
    Ok(())
}
