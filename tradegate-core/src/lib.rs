//! Tradegate Core - Pre-Trade Risk Gating
//!
//! Decides, tick by tick, whether a trading context may open new orders.
//! Order events feed rolling per-period counters; the counters are checked
//! against a configurable limit grid; environment observations and limit
//! breaches are folded into a 32-bit trade-condition mask.
//!
//! ## Architecture
//! - **Fixed grids**: `3 x 6` counter and threshold arrays, no allocation per tick
//! - **Explicit rollover**: period boundaries arrive as a [`RolloverSignal`],
//!   so counters never read the wall clock themselves
//! - **Stable bit layout**: condition masks can be persisted and exchanged
//! - **Single owner**: one [`TradeGate`] per context, mutated through `&mut self`
//!
//! ## Core Modules
//! - `core`: Statistic enumerations and error types
//! - `clock`: Rollover signals and the UTC calendar clock
//! - `stats`: Per-(type x period) order counters
//! - `limits`: Per-period threshold grid
//! - `state`: Trade condition set and bit mask
//! - `params`: Trade parameters (sizing, tolerances, limits)
//! - `gate`: Per-tick gating driver
//! - `config`: TOML/env configuration and profiles
//! - `utils`: Logging setup

pub mod core;

pub mod clock;
pub mod limits;
pub mod params;
pub mod state;
pub mod stats;

pub mod gate;

pub mod config;
pub mod utils;

// Re-export core types
pub use core::{GateError, StatisticPeriod, StatisticType, STAT_PERIOD_COUNT, STAT_TYPE_COUNT};

// Re-export gating primitives
pub use clock::{CalendarClock, RolloverSignal, RolloverSource};
pub use limits::{LimitBreach, LimitTable};
pub use params::TradeParams;
pub use state::{TradeCondition, TradeConditions};
pub use stats::OrderStats;

// Re-export driver and configuration
pub use config::GateConfig;
pub use gate::{Observation, TradeGate};

// Re-export error types
pub use anyhow::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    // Enumerations
    pub use crate::core::{GateError, StatisticPeriod, StatisticType};

    // Gating primitives
    pub use crate::clock::{CalendarClock, RolloverSignal, RolloverSource};
    pub use crate::limits::LimitTable;
    pub use crate::state::{TradeCondition, TradeConditions};
    pub use crate::stats::OrderStats;

    // Driver
    pub use crate::gate::{Observation, TradeGate};
    pub use crate::params::TradeParams;
    pub use crate::config::GateConfig;

    // Error types
    pub use crate::{Error, Result};
}
