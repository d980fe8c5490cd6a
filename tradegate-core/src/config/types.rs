use crate::params::TradeParams;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Sizing, tolerances and the limit grid
    #[serde(default)]
    pub trade: TradeParams,

    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Calendar settings for rollover detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// First day of the trading week
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

// Default value functions
fn default_week_start() -> Weekday {
    Weekday::Sun // FX week opens Sunday evening
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            week_start: default_week_start(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            trade: TradeParams::default(),
            clock: ClockConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
