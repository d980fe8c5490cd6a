//! Trade parameters for one trading context
//!
//! Sizing and tolerance settings plus the per-period limit grid. This is the
//! persisted/config-file shape; collaborators such as the account or the
//! terminal are passed to the driver per tick instead of living here.

use crate::core::{StatisticPeriod, StatisticType};
use crate::limits::LimitTable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trade sizing, tolerances and order-rate limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParams {
    /// Default lot size
    #[serde(default)]
    pub lot_size: Decimal,

    /// Maximum account margin to risk, in percent
    #[serde(default = "default_risk_margin")]
    pub risk_margin: Decimal,

    /// Maximum price slippage in points
    #[serde(default = "default_slippage")]
    pub slippage: u32,

    /// Minimum bars on the chart before trading
    #[serde(default = "default_bars_min")]
    pub bars_min: u16,

    /// Per-(type x period) order limits, 0 = unlimited
    #[serde(default)]
    pub limits: LimitTable,
}

fn default_risk_margin() -> Decimal {
    Decimal::ONE // 1%
}

fn default_slippage() -> u32 {
    50
}

fn default_bars_min() -> u16 {
    100
}

impl Default for TradeParams {
    fn default() -> Self {
        Self {
            lot_size: Decimal::ZERO,
            risk_margin: default_risk_margin(),
            slippage: default_slippage(),
            bars_min: default_bars_min(),
            limits: LimitTable::unlimited(),
        }
    }
}

impl TradeParams {
    pub fn new(lot_size: Decimal, risk_margin: Decimal, slippage: u32) -> Self {
        Self {
            lot_size,
            risk_margin,
            slippage,
            ..Self::default()
        }
    }

    /// Builder: set one limit cell
    pub fn with_limit(mut self, stat_type: StatisticType, period: StatisticPeriod, value: u64) -> Self {
        self.limits.set(stat_type, period, value);
        self
    }

    /// Builder: set one period for every type
    pub fn with_period_limit(mut self, period: StatisticPeriod, value: u64) -> Self {
        self.limits.set_period(period, value);
        self
    }

    /// Builder: set the minimum bar count
    pub fn with_bars_min(mut self, bars_min: u16) -> Self {
        self.bars_min = bars_min;
        self
    }
}
