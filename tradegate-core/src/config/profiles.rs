//! Configuration profiles for different environments
//!
//! Provides pre-configured profiles for:
//! - Development: No order-rate limits, verbose logging
//! - Staging: Production-like limits with more headroom
//! - Production: Strict per-period limits, warn-level logging

use super::types::*;
use crate::core::{StatisticPeriod, StatisticType};
use crate::params::TradeParams;
use rust_decimal_macros::dec;

/// Configuration profile name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileName {
    /// Development profile (local testing)
    Development,
    /// Staging profile (pre-production)
    Staging,
    /// Production profile (live trading)
    Production,
}

impl ProfileName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Some(Self::Development),
            "staging" | "stage" => Some(Self::Staging),
            "prod" | "production" => Some(Self::Production),
            _ => None,
        }
    }
}

/// Configuration profile with environment-specific defaults
pub struct ConfigProfile;

impl ConfigProfile {
    /// Create a development configuration
    ///
    /// - No order-rate limits
    /// - Low bar requirement so short histories trade
    /// - Verbose logging (debug level)
    pub fn development() -> GateConfig {
        GateConfig {
            trade: TradeParams {
                lot_size: dec!(0.01),
                risk_margin: dec!(1.0),
                slippage: 50,
                bars_min: 10,
                ..TradeParams::default()
            },
            clock: ClockConfig::default(),
            logging: LoggingConfig {
                log_level: "debug".to_string(),
                json_logs: false,
            },
        }
    }

    /// Create a staging configuration
    ///
    /// - Generous per-period limits
    /// - Standard bar requirement
    /// - Info logging
    pub fn staging() -> GateConfig {
        let trade = TradeParams::new(dec!(0.05), dec!(2.0), 30)
            .with_limit(StatisticType::OrdersOpened, StatisticPeriod::PerHour, 20)
            .with_limit(StatisticType::OrdersOpened, StatisticPeriod::PerDay, 200)
            .with_limit(StatisticType::OrdersErrors, StatisticPeriod::PerHour, 10)
            .with_limit(StatisticType::OrdersErrors, StatisticPeriod::PerDay, 50);

        GateConfig {
            trade,
            clock: ClockConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Create a production configuration
    ///
    /// - Strict per-hour and per-day order limits
    /// - Tight error budget (a few rejects halt trading for the period)
    /// - Warn logging, JSON output for log shipping
    pub fn production() -> GateConfig {
        let trade = TradeParams::new(dec!(0.1), dec!(1.0), 10)
            .with_limit(StatisticType::OrdersOpened, StatisticPeriod::PerHour, 5)
            .with_limit(StatisticType::OrdersOpened, StatisticPeriod::PerDay, 40)
            .with_limit(StatisticType::OrdersOpened, StatisticPeriod::PerWeek, 150)
            .with_limit(StatisticType::OrdersErrors, StatisticPeriod::PerHour, 3)
            .with_limit(StatisticType::OrdersErrors, StatisticPeriod::PerDay, 10)
            .with_bars_min(200);

        GateConfig {
            trade,
            clock: ClockConfig::default(),
            logging: LoggingConfig {
                log_level: "warn".to_string(),
                json_logs: true,
            },
        }
    }

    /// Get configuration by profile name
    pub fn from_name(name: ProfileName) -> GateConfig {
        match name {
            ProfileName::Development => Self::development(),
            ProfileName::Staging => Self::staging(),
            ProfileName::Production => Self::production(),
        }
    }
}
