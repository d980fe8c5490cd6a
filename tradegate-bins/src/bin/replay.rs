//! Replay a JSON-lines event script through a trade gate
//!
//! Reads `order`, `set_limit` and `tick` events (from a file or stdin) and
//! writes one JSON report per tick to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tradegate_bins::common::{init_logging, load_config, CommonArgs};
use tradegate_bins::replay;
use tradegate_core::TradeGate;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Event script; reads stdin when omitted
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = load_config(&cli.common)?;
    init_logging(&config)?;

    tracing::info!("=== Tradegate: Replay ===");

    let mut gate = TradeGate::from_config(&config);
    let stdout = io::stdout().lock();

    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            replay::run(&mut gate, BufReader::new(file), stdout)?
        }
        None => replay::run(&mut gate, io::stdin().lock(), stdout)?,
    };

    tracing::info!("=== Replay Summary ===");
    tracing::info!("Events processed: {}", summary.events);
    tracing::info!("Ticks evaluated: {}", summary.ticks);
    tracing::info!("Ticks blocked: {}", summary.blocked_ticks);

    Ok(())
}
