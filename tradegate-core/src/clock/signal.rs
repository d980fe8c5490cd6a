use crate::core::StatisticPeriod;
use std::fmt;
use tracing::debug;

/// Set of calendar granularities whose boundary has just been crossed
///
/// Only rolling periods are ever members; `AllTime` never elapses, so
/// inserting it is a no-op. Iteration yields members finest to coarsest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RolloverSignal {
    periods: u8,
}

impl RolloverSignal {
    /// Signal with no elapsed periods
    pub const fn empty() -> Self {
        Self { periods: 0 }
    }

    /// Signal for the given periods
    pub fn of(periods: &[StatisticPeriod]) -> Self {
        periods.iter().copied().collect()
    }

    /// Hour, day, week, month and year all elapsed at once
    pub fn all_rolling() -> Self {
        StatisticPeriod::ROLLING.iter().copied().collect()
    }

    pub fn insert(&mut self, period: StatisticPeriod) {
        if !period.is_rolling() {
            debug!("Ignoring {} in rollover signal (never elapses)", period);
            return;
        }
        self.periods |= 1 << period.index();
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, period: StatisticPeriod) -> Self {
        self.insert(period);
        self
    }

    #[inline]
    pub fn contains(&self, period: StatisticPeriod) -> bool {
        self.periods & (1 << period.index()) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods == 0
    }

    pub fn len(&self) -> usize {
        self.periods.count_ones() as usize
    }

    /// Elapsed periods, finest first
    pub fn iter(&self) -> impl Iterator<Item = StatisticPeriod> + '_ {
        StatisticPeriod::ROLLING
            .iter()
            .copied()
            .filter(move |p| self.contains(*p))
    }
}

impl FromIterator<StatisticPeriod> for RolloverSignal {
    fn from_iter<I: IntoIterator<Item = StatisticPeriod>>(iter: I) -> Self {
        let mut signal = Self::empty();
        for period in iter {
            signal.insert(period);
        }
        signal
    }
}

impl fmt::Display for RolloverSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        let names: Vec<&str> = self.iter().map(StatisticPeriod::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
