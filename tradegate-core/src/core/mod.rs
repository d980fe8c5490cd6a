//! Core types shared by the gating components
//!
//! - `StatisticType` / `StatisticPeriod`: closed enumerations indexing the
//!   `T x P` statistics and limit grids
//! - `GateError`: invalid-parameter errors for raw lookups

pub mod errors;
pub mod types;

pub use errors::GateError;
pub use types::{StatisticPeriod, StatisticType, STAT_PERIOD_COUNT, STAT_TYPE_COUNT};
