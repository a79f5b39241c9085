// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! # verdant-live
//!
//! Mounts a live greenhouse view and prints one JSON snapshot per line.
//!
//! ## Usage
//!
//! ```bash
//! # Run for a minute with a fixed seed
//! verdant-live --seed 42 --duration-secs 60
//!
//! # Run until Ctrl-C with a custom schedule
//! verdant-live --duration-secs 0 --config live.json
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{interval, sleep_until, Instant};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;
use verdant::{LiveConfig, LiveState};
use verdant_live::{load_config, LiveView, Result};

/// Verdant live view
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run time in seconds (0 = until Ctrl-C)
    #[arg(short, long, default_value = "30")]
    duration_secs: u64,

    /// Seconds between printed snapshots
    #[arg(long, default_value = "5")]
    snapshot_secs: u64,

    /// JSON live config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    // Logs go to stderr; stdout carries the snapshots
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Verdant Live v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => LiveConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let anchor = chrono::Local::now().naive_local();
    let state = LiveState::new(config, anchor)?;
    let view = LiveView::mount(state);

    let deadline = (args.duration_secs > 0).then(|| Instant::now() + Duration::from_secs(args.duration_secs));
    let mut ticker = interval(Duration::from_secs(args.snapshot_secs.max(1)));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = view.snapshot().await;
                println!("{}", serde_json::to_string(&snapshot)?);
            }
            _ = until(deadline) => {
                info!(duration_secs = args.duration_secs, "run time elapsed");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    view.unmount().await
}

async fn until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
