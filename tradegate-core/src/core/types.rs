//! Closed enumerations indexing the statistics and limit grids

use super::errors::GateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of statistic types (rows of the grids)
pub const STAT_TYPE_COUNT: usize = 3;

/// Number of statistic periods (columns of the grids)
pub const STAT_PERIOD_COUNT: usize = 6;

/// Order-event category being counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticType {
    /// Orders opened
    OrdersOpened = 0,
    /// Orders closed
    OrdersClosed = 1,
    /// Order errors (rejects, failed sends)
    OrdersErrors = 2,
}

impl StatisticType {
    /// Every statistic type in index order
    pub const ALL: [StatisticType; STAT_TYPE_COUNT] = [
        StatisticType::OrdersOpened,
        StatisticType::OrdersClosed,
        StatisticType::OrdersErrors,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a type by raw index
    pub fn from_index(index: usize) -> Result<Self, GateError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GateError::InvalidStatisticType {
                index,
                max: STAT_TYPE_COUNT,
            })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatisticType::OrdersOpened => "orders_opened",
            StatisticType::OrdersClosed => "orders_closed",
            StatisticType::OrdersErrors => "orders_errors",
        }
    }
}

impl FromStr for StatisticType {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GateError::UnknownName {
                kind: "statistic type",
                name: s.to_string(),
            })
    }
}

impl fmt::Display for StatisticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar granularity of a counter, ordered finest to coarsest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticPeriod {
    PerHour = 0,
    PerDay = 1,
    PerWeek = 2,
    PerMonth = 3,
    PerYear = 4,
    /// Lifetime total, never reset
    AllTime = 5,
}

impl StatisticPeriod {
    /// Every period in index order (finest first)
    pub const ALL: [StatisticPeriod; STAT_PERIOD_COUNT] = [
        StatisticPeriod::PerHour,
        StatisticPeriod::PerDay,
        StatisticPeriod::PerWeek,
        StatisticPeriod::PerMonth,
        StatisticPeriod::PerYear,
        StatisticPeriod::AllTime,
    ];

    /// Periods that roll over with the calendar (everything but `AllTime`)
    pub const ROLLING: [StatisticPeriod; STAT_PERIOD_COUNT - 1] = [
        StatisticPeriod::PerHour,
        StatisticPeriod::PerDay,
        StatisticPeriod::PerWeek,
        StatisticPeriod::PerMonth,
        StatisticPeriod::PerYear,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn is_rolling(self) -> bool {
        !matches!(self, StatisticPeriod::AllTime)
    }

    /// Look up a period by raw index
    pub fn from_index(index: usize) -> Result<Self, GateError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GateError::InvalidPeriod {
                index,
                max: STAT_PERIOD_COUNT,
            })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatisticPeriod::PerHour => "per_hour",
            StatisticPeriod::PerDay => "per_day",
            StatisticPeriod::PerWeek => "per_week",
            StatisticPeriod::PerMonth => "per_month",
            StatisticPeriod::PerYear => "per_year",
            StatisticPeriod::AllTime => "all_time",
        }
    }
}

impl FromStr for StatisticPeriod {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| GateError::UnknownName {
                kind: "statistic period",
                name: s.to_string(),
            })
    }
}

impl fmt::Display for StatisticPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for t in StatisticType::ALL {
            assert_eq!(StatisticType::from_index(t.index()), Ok(t));
        }
        for p in StatisticPeriod::ALL {
            assert_eq!(StatisticPeriod::from_index(p.index()), Ok(p));
        }
    }

    #[test]
    fn test_out_of_range_index() {
        assert_eq!(
            StatisticType::from_index(3),
            Err(GateError::InvalidStatisticType { index: 3, max: 3 })
        );
        assert_eq!(
            StatisticPeriod::from_index(6),
            Err(GateError::InvalidPeriod { index: 6, max: 6 })
        );
    }

    #[test]
    fn test_periods_ordered_finest_first() {
        let mut sorted = StatisticPeriod::ALL;
        sorted.sort();
        assert_eq!(sorted, StatisticPeriod::ALL);
        assert!(!StatisticPeriod::AllTime.is_rolling());
        assert!(StatisticPeriod::ROLLING.iter().all(|p| p.is_rolling()));
    }

    #[test]
    fn test_parse_names() {
        for t in StatisticType::ALL {
            assert_eq!(t.as_str().parse::<StatisticType>(), Ok(t));
        }
        assert_eq!("per_month".parse::<StatisticPeriod>(), Ok(StatisticPeriod::PerMonth));
        assert!(matches!(
            "per_decade".parse::<StatisticPeriod>(),
            Err(GateError::UnknownName { .. })
        ));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&StatisticPeriod::PerWeek).unwrap();
        assert_eq!(json, "\"per_week\"");
        let t: StatisticType = serde_json::from_str("\"orders_errors\"").unwrap();
        assert_eq!(t, StatisticType::OrdersErrors);
    }
}
