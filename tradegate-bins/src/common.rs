//! Common utilities for all binaries
//!
//! Shared initialization, CLI parsing, and config resolution.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tradegate_core::config::{ConfigProfile, GateConfig, ProfileName};
use tradegate_core::utils::init_logger;

/// Common CLI arguments for all binaries
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// TOML configuration file (takes precedence over --profile)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Built-in profile: development, staging or production
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Log level override
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// Resolve the configuration: file, then profile, then built-in defaults.
/// CLI logging flags override whatever the source specified.
pub fn load_config(args: &CommonArgs) -> Result<GateConfig> {
    let mut config = match (&args.config, &args.profile) {
        (Some(path), _) => GateConfig::load(path)?,
        (None, Some(profile)) => match ProfileName::from_str(profile) {
            Some(name) => ConfigProfile::from_name(name),
            None => bail!(
                "Unknown profile '{}', expected development, staging or production",
                profile
            ),
        },
        (None, None) => GateConfig::default(),
    };

    if let Some(level) = &args.log_level {
        config.logging.log_level = level.clone();
    }
    if args.json_logs {
        config.logging.json_logs = true;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Initialize tracing/logging
pub fn init_logging(config: &GateConfig) -> Result<()> {
    init_logger(&config.logging)
}
