use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ticketflow::config::AppConfig;
use ticketflow::server;

/// Automates event ticket-type setup through a headless Chromium session.
#[derive(Debug, Parser)]
#[command(name = "ticketflow", version, about)]
struct Cli {
    /// Listen port (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Run the browser with a visible window.
    #[arg(long)]
    headed: bool,

    /// Chromium executable path (overrides TICKETFLOW_CHROME).
    #[arg(long)]
    chrome: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ticketflow=info,cdp_session=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.headed {
        config.browser.headless = false;
    }
    if let Some(chrome) = cli.chrome {
        config.browser.executable = Some(chrome);
    }

    server::serve(config).await
}
