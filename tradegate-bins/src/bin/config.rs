//! Print the resolved gate configuration as pretty JSON
//!
//! Resolves `--config` / `--profile` exactly like the other tools, so the
//! output shows what a run would actually use.

use anyhow::Result;
use clap::Parser;
use tradegate_bins::common::{load_config, CommonArgs};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Only validate; print nothing on success
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.common)?;

    if !cli.check {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}
