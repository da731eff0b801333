//! marketpulse
//!
//! Terminal dashboard: polls the backend and re-renders on every update.
//!
//! # Configuration
//!
//! Config file (`--config`, or the default locations) plus environment
//! variables:
//! - `MARKETPULSE_BACKEND_URL`: base URL (default: http://localhost:5000/api)
//! - `MARKETPULSE_POLL_INTERVAL_SECS`: seconds between fetches (default: 60)
//! - `RUST_LOG`: log filter (default: marketpulse=info)

use anyhow::Context;
use clap::Parser;
use marketpulse::config::{generate_default_config, Config};
use marketpulse::{logging, DataState, HttpSnapshotSource, Poller, Screen, SnapshotSource};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Parser)]
#[command(name = "marketpulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal view of the market-state backend")]
struct Cli {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch a single snapshot, render it and exit
    #[arg(long)]
    once: bool,

    /// With --once, print the raw snapshot as JSON instead
    #[arg(long, requires = "once")]
    json: bool,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    logging::init(&config.logging);

    tracing::info!("marketpulse v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.backend.base_url);

    let source = Arc::new(
        HttpSnapshotSource::new(config.backend.clone()).context("building HTTP client")?,
    );

    if cli.once {
        return run_once(source.as_ref(), cli.json).await;
    }

    let poller = Poller::from_config(source, &config.polling);
    let handle = poller.start(|_| {}, |_| {});
    let mut states = handle.subscribe();

    // subscribing marks the current state as seen, so draw it before waiting
    println!("{}", current_screen(&mut states));

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", current_screen(&mut states));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    handle.stop();
    Ok(())
}

fn current_screen(states: &mut watch::Receiver<DataState>) -> Screen {
    let screen = Screen::from_state(&states.borrow_and_update());
    if let Screen::Offline { detail } = &screen {
        tracing::error!("Backend offline: {}", detail);
    }
    screen
}

async fn run_once(source: &HttpSnapshotSource, json: bool) -> anyhow::Result<()> {
    let snapshot = source
        .fetch()
        .await
        .with_context(|| format!("fetching {}", source.state_url()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let screen = Screen::Live(Box::new(marketpulse::Dashboard::from_snapshot(&snapshot)));
        print!("{}", screen);
    }
    Ok(())
}
