//! Per-Period Trading Limits
//!
//! A `T x P` threshold grid shaped like [`OrderStats`]. A cell of `0`
//! disables that check.
//!
//! ```text
//! OrderStats[t][p] ──► LimitTable::is_at_or_above(t, p, value)
//!                          │
//!                 threshold == 0 ──► false (unlimited)
//!                 value >= threshold ──► true (limit reached)
//! ```
//!
//! Only the rolling periods gate trading. `all_time` thresholds can be stored
//! and queried per cell but are skipped by the table-wide checks.

use crate::core::{GateError, StatisticPeriod, StatisticType, STAT_PERIOD_COUNT, STAT_TYPE_COUNT};
use crate::stats::{OrderStats, PeriodRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// A cell whose counter reached its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitBreach {
    pub stat_type: StatisticType,
    pub period: StatisticPeriod,
    pub value: u64,
    pub threshold: u64,
}

impl fmt::Display for LimitBreach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {} (limit: {})",
            self.stat_type, self.period, self.value, self.threshold
        )
    }
}

/// Threshold grid; `0` means no limit
///
/// Serialized as a nested map so config files can name cells directly:
///
/// ```toml
/// [trade.limits.orders_opened]
/// per_hour = 5
/// per_day = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LimitGrid", into = "LimitGrid")]
pub struct LimitTable {
    thresholds: [PeriodRow; STAT_TYPE_COUNT],
}

// Keyed by name so config sources that only hand out string map keys work.
type LimitGrid = BTreeMap<String, BTreeMap<String, u64>>;

impl TryFrom<LimitGrid> for LimitTable {
    type Error = GateError;

    fn try_from(grid: LimitGrid) -> Result<Self, Self::Error> {
        let mut table = LimitTable::unlimited();
        for (type_name, periods) in grid {
            let stat_type: StatisticType = type_name.parse()?;
            for (period_name, value) in periods {
                let period: StatisticPeriod = period_name.parse()?;
                table.set(stat_type, period, value);
            }
        }
        Ok(table)
    }
}

impl From<LimitTable> for LimitGrid {
    fn from(table: LimitTable) -> Self {
        StatisticType::ALL
            .into_iter()
            .map(|t| {
                let periods = StatisticPeriod::ALL
                    .into_iter()
                    .map(|p| (p.as_str().to_string(), table.threshold(t, p)))
                    .collect();
                (t.as_str().to_string(), periods)
            })
            .collect()
    }
}

impl LimitTable {
    /// Table with every check disabled
    pub fn unlimited() -> Self {
        Self::default()
    }

    #[inline]
    pub fn threshold(&self, stat_type: StatisticType, period: StatisticPeriod) -> u64 {
        self.thresholds[stat_type.index()][period.index()]
    }

    /// Threshold by raw indices
    pub fn try_threshold(&self, type_index: usize, period_index: usize) -> Result<u64, GateError> {
        let stat_type = StatisticType::from_index(type_index)?;
        let period = StatisticPeriod::from_index(period_index)?;
        Ok(self.threshold(stat_type, period))
    }

    /// Threshold by raw indices, treating an invalid index as "no limit"
    pub fn threshold_or_unlimited(&self, type_index: usize, period_index: usize) -> u64 {
        self.try_threshold(type_index, period_index)
            .unwrap_or_else(|err| {
                warn!("Limit lookup failed: {}", err);
                0
            })
    }

    // ------------------------------------------------------------------
    // Setters. Each call overwrites the cells it targets.
    // ------------------------------------------------------------------

    /// Set one cell
    pub fn set(&mut self, stat_type: StatisticType, period: StatisticPeriod, value: u64) {
        self.thresholds[stat_type.index()][period.index()] = value;
    }

    /// Set one period for every type
    pub fn set_period(&mut self, period: StatisticPeriod, value: u64) {
        for row in self.thresholds.iter_mut() {
            row[period.index()] = value;
        }
    }

    /// Set every period for one type
    pub fn set_type(&mut self, stat_type: StatisticType, value: u64) {
        self.thresholds[stat_type.index()] = [value; STAT_PERIOD_COUNT];
    }

    /// Set every cell
    pub fn set_all(&mut self, value: u64) {
        self.thresholds = [[value; STAT_PERIOD_COUNT]; STAT_TYPE_COUNT];
    }

    // ------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------

    /// True if `value` reached a non-zero threshold for this cell
    #[inline]
    pub fn is_at_or_above(&self, stat_type: StatisticType, period: StatisticPeriod, value: u64) -> bool {
        let threshold = self.threshold(stat_type, period);
        threshold > 0 && value >= threshold
    }

    /// True if any rolling counter of `stat_type` in `values` reached its
    /// threshold
    pub fn is_type_limit_reached(&self, stat_type: StatisticType, values: &PeriodRow) -> bool {
        StatisticPeriod::ROLLING
            .iter()
            .any(|&p| self.is_at_or_above(stat_type, p, values[p.index()]))
    }

    /// True if any rolling counter in `stats` reached its threshold
    pub fn is_any_limit_reached(&self, stats: &OrderStats) -> bool {
        self.first_limit_reached(stats).is_some()
    }

    /// First rolling cell (type-major, finest period first) at or above its
    /// threshold
    pub fn first_limit_reached(&self, stats: &OrderStats) -> Option<LimitBreach> {
        StatisticType::ALL.into_iter().find_map(|stat_type| {
            StatisticPeriod::ROLLING.into_iter().find_map(|period| {
                let value = stats.value(stat_type, period);
                self.is_at_or_above(stat_type, period, value).then(|| LimitBreach {
                    stat_type,
                    period,
                    value,
                    threshold: self.threshold(stat_type, period),
                })
            })
        })
    }

    /// True if no cell has a limit
    pub fn is_unlimited(&self) -> bool {
        self.thresholds.iter().flatten().all(|&v| v == 0)
    }
}
