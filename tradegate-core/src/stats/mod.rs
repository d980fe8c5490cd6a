//! Rolling-Period Order Statistics
//!
//! A `T x P` grid of counters, one row per [`StatisticType`] and one column
//! per [`StatisticPeriod`]:
//!
//! ```text
//!                 per_hour  per_day  per_week  per_month  per_year  all_time
//! orders_opened       3        12       40        95        310       1204
//! orders_closed       2        11       39        94        309       1200
//! orders_errors       0         1        1         4         17         52
//! ```
//!
//! Every `add` hits the whole row, so each column is the running total since
//! that column's own last reset. A rollover zeroes whole columns; the
//! `all_time` column is never reset.

use crate::clock::{RolloverSignal, RolloverSource};
use crate::core::{GateError, StatisticPeriod, StatisticType, STAT_PERIOD_COUNT, STAT_TYPE_COUNT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One row of the grid, indexed by period
pub type PeriodRow = [u64; STAT_PERIOD_COUNT];

/// Per-(type x period) order counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStats {
    counters: [PeriodRow; STAT_TYPE_COUNT],
}

impl OrderStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `amount` events of `stat_type` in every period at once
    pub fn add(&mut self, stat_type: StatisticType, amount: u64) {
        let row = &mut self.counters[stat_type.index()];
        for cell in row.iter_mut() {
            *cell = cell.saturating_add(amount);
        }
        debug!(
            "Order stats {} += {} (hour={}, all_time={})",
            stat_type,
            amount,
            row[StatisticPeriod::PerHour.index()],
            row[StatisticPeriod::AllTime.index()]
        );
    }

    /// Count a single event
    #[inline]
    pub fn increment(&mut self, stat_type: StatisticType) {
        self.add(stat_type, 1);
    }

    /// Current counter value, without applying pending rollovers
    #[inline]
    pub fn value(&self, stat_type: StatisticType, period: StatisticPeriod) -> u64 {
        self.counters[stat_type.index()][period.index()]
    }

    /// Current counter value after applying whatever the clock reports
    ///
    /// The all-time column needs no rollover, so the clock is not consulted
    /// for it.
    pub fn get<S>(&mut self, stat_type: StatisticType, period: StatisticPeriod, clock: &mut S) -> u64
    where
        S: RolloverSource + ?Sized,
    {
        if period.is_rolling() {
            let signal = clock.started_periods();
            self.rollover(signal);
        }
        self.value(stat_type, period)
    }

    /// Zero every column named in `signal`, finest period first
    ///
    /// Applying the same signal twice leaves the same state as applying it
    /// once.
    pub fn rollover(&mut self, signal: RolloverSignal) {
        for period in signal.iter() {
            self.reset_period(period);
        }
    }

    /// Zero one column across all types
    pub fn reset_period(&mut self, period: StatisticPeriod) {
        if !period.is_rolling() {
            warn!("Refusing to reset {} order stats", period);
            return;
        }
        for row in self.counters.iter_mut() {
            row[period.index()] = 0;
        }
        debug!("Order stats reset for {}", period);
    }

    /// Zero the rolling periods of one type; its all-time total is kept
    pub fn reset_type(&mut self, stat_type: StatisticType) {
        let row = &mut self.counters[stat_type.index()];
        for period in StatisticPeriod::ROLLING {
            row[period.index()] = 0;
        }
    }

    /// Zero a single cell
    pub fn reset_cell(&mut self, stat_type: StatisticType, period: StatisticPeriod) {
        if !period.is_rolling() {
            warn!("Refusing to reset {} {} order stats", stat_type, period);
            return;
        }
        self.counters[stat_type.index()][period.index()] = 0;
    }

    /// All periods for one type
    #[inline]
    pub fn row(&self, stat_type: StatisticType) -> &PeriodRow {
        &self.counters[stat_type.index()]
    }

    /// Every cell as `(type, period, value)`, row by row
    pub fn iter(&self) -> impl Iterator<Item = (StatisticType, StatisticPeriod, u64)> + '_ {
        StatisticType::ALL.into_iter().flat_map(move |t| {
            StatisticPeriod::ALL
                .into_iter()
                .map(move |p| (t, p, self.value(t, p)))
        })
    }

    /// Lookup by raw indices
    pub fn try_value(&self, type_index: usize, period_index: usize) -> Result<u64, GateError> {
        let stat_type = StatisticType::from_index(type_index)?;
        let period = StatisticPeriod::from_index(period_index)?;
        Ok(self.value(stat_type, period))
    }

    /// Lookup by raw indices, falling back to zero on an invalid index
    pub fn value_or_zero(&self, type_index: usize, period_index: usize) -> u64 {
        self.try_value(type_index, period_index).unwrap_or_else(|err| {
            warn!("Order stats lookup failed: {}", err);
            0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_hits_every_period() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersOpened, 3);

        for period in StatisticPeriod::ALL {
            assert_eq!(stats.value(StatisticType::OrdersOpened, period), 3);
            assert_eq!(stats.value(StatisticType::OrdersClosed, period), 0);
        }
    }

    #[test]
    fn test_add_saturates() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersErrors, u64::MAX);
        stats.increment(StatisticType::OrdersErrors);
        assert_eq!(
            stats.value(StatisticType::OrdersErrors, StatisticPeriod::AllTime),
            u64::MAX
        );
    }

    #[test]
    fn test_rollover_zeroes_only_named_periods() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersOpened, 4);
        stats.add(StatisticType::OrdersClosed, 2);

        stats.rollover(RolloverSignal::of(&[StatisticPeriod::PerHour]));

        for t in StatisticType::ALL {
            assert_eq!(stats.value(t, StatisticPeriod::PerHour), 0);
        }
        assert_eq!(stats.value(StatisticType::OrdersOpened, StatisticPeriod::PerDay), 4);
        assert_eq!(stats.value(StatisticType::OrdersClosed, StatisticPeriod::AllTime), 2);
    }

    #[test]
    fn test_rollover_idempotent() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersOpened, 5);
        let signal = RolloverSignal::of(&[StatisticPeriod::PerDay, StatisticPeriod::PerWeek]);

        stats.rollover(signal);
        let once = stats.clone();
        stats.rollover(signal);

        assert_eq!(stats, once);
    }

    #[test]
    fn test_get_applies_clock_for_rolling_periods() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersOpened, 2);

        let mut clock = RolloverSignal::of(&[StatisticPeriod::PerHour]);
        let value = stats.get(StatisticType::OrdersOpened, StatisticPeriod::PerHour, &mut clock);

        assert_eq!(value, 0);
        assert!(clock.is_empty(), "signal should have been consumed");
    }

    #[test]
    fn test_get_all_time_skips_clock() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersOpened, 2);

        let mut clock = RolloverSignal::all_rolling();
        let value = stats.get(StatisticType::OrdersOpened, StatisticPeriod::AllTime, &mut clock);

        assert_eq!(value, 2);
        assert!(!clock.is_empty(), "clock must not be consulted for all_time");
        assert_eq!(stats.value(StatisticType::OrdersOpened, StatisticPeriod::PerHour), 2);
    }

    #[test]
    fn test_all_time_never_reset() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersOpened, 7);

        stats.reset_period(StatisticPeriod::AllTime);
        stats.reset_cell(StatisticType::OrdersOpened, StatisticPeriod::AllTime);
        stats.reset_type(StatisticType::OrdersOpened);
        stats.rollover(RolloverSignal::all_rolling());

        assert_eq!(stats.value(StatisticType::OrdersOpened, StatisticPeriod::AllTime), 7);
        assert_eq!(stats.value(StatisticType::OrdersOpened, StatisticPeriod::PerYear), 0);
    }

    #[test]
    fn test_reset_cell() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersClosed, 3);
        stats.reset_cell(StatisticType::OrdersClosed, StatisticPeriod::PerWeek);

        assert_eq!(stats.value(StatisticType::OrdersClosed, StatisticPeriod::PerWeek), 0);
        assert_eq!(stats.value(StatisticType::OrdersClosed, StatisticPeriod::PerMonth), 3);
    }

    #[test]
    fn test_raw_lookup() {
        let mut stats = OrderStats::new();
        stats.add(StatisticType::OrdersClosed, 9);

        assert_eq!(stats.try_value(1, 5), Ok(9));
        assert!(matches!(
            stats.try_value(3, 0),
            Err(GateError::InvalidStatisticType { index: 3, .. })
        ));
        assert!(matches!(
            stats.try_value(0, 6),
            Err(GateError::InvalidPeriod { index: 6, .. })
        ));
        assert_eq!(stats.value_or_zero(42, 0), 0);
    }

    #[test]
    fn test_iter_covers_grid() {
        let stats = OrderStats::new();
        assert_eq!(stats.iter().count(), STAT_TYPE_COUNT * STAT_PERIOD_COUNT);
    }
}
