pub mod profiles;
pub mod types;

pub use profiles::{ConfigProfile, ProfileName};
pub use types::*;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, Environment, File, FileFormat};
use rust_decimal::Decimal;
use std::path::Path;

/// Environment variable prefix for overrides, e.g. `TRADEGATE__TRADE__SLIPPAGE=30`
pub const ENV_PREFIX: &str = "TRADEGATE";

impl GateConfig {
    /// Load configuration from a TOML file with optional environment variable overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();

        let builder = Self::builder_with_defaults()?
            .add_source(File::from(config_path))
            // Override with environment variables (TRADEGATE__)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Self::build(builder)
            .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
    }

    /// Load configuration from an in-memory TOML document
    ///
    /// Only the document and the built-in defaults are used; environment
    /// overrides apply to [`GateConfig::load`] alone.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let builder =
            Self::builder_with_defaults()?.add_source(File::from_str(toml, FileFormat::Toml));

        Self::build(builder)
    }

    /// Load from default location (./config/tradegate.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("config/tradegate.toml")
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = ConfigLoader::builder()
            // Start with default values
            .set_default("clock.week_start", "sun")?
            .set_default("logging.log_level", "info")?
            .set_default("logging.json_logs", false)?;

        Ok(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            .build()
            .context("Failed to build configuration")?;

        // Deserialize into GateConfig struct
        let cfg: GateConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // Validate configuration
        cfg.validate()?;

        Ok(cfg)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.trade.lot_size < Decimal::ZERO {
            anyhow::bail!("lot_size must not be negative (got {})", self.trade.lot_size);
        }

        if self.trade.risk_margin <= Decimal::ZERO || self.trade.risk_margin > Decimal::ONE_HUNDRED {
            anyhow::bail!(
                "risk_margin must be within (0, 100] percent (got {})",
                self.trade.risk_margin
            );
        }

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.logging.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}', must be one of: {:?}",
                self.logging.log_level,
                valid_log_levels
            );
        }

        Ok(())
    }
}
