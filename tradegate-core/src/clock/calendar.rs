use super::{RolloverSignal, RolloverSource};
use crate::core::StatisticPeriod;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};
use tracing::{debug, warn};

/// Wall-clock rollover detector working on the UTC calendar
///
/// Compares each observed timestamp against the previous one and reports
/// every period whose boundary lies between them. Weeks start on
/// `week_start` (Sunday by default, matching the FX trading-week open).
#[derive(Debug, Clone)]
pub struct CalendarClock {
    week_start: Weekday,
    last: Option<DateTime<Utc>>,
}

impl CalendarClock {
    pub fn new(week_start: Weekday) -> Self {
        Self {
            week_start,
            last: None,
        }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Timestamp of the most recent accepted observation
    pub fn last_observed(&self) -> Option<DateTime<Utc>> {
        self.last
    }

    /// Report the periods that started since the previous observation
    ///
    /// The first call only records a baseline. A timestamp older than the
    /// baseline is rejected without moving it, so a boundary is never
    /// reported twice.
    pub fn observe(&mut self, now: DateTime<Utc>) -> RolloverSignal {
        let Some(last) = self.last else {
            debug!("Calendar clock baseline set at {}", now);
            self.last = Some(now);
            return RolloverSignal::empty();
        };

        if now < last {
            warn!(
                "Calendar clock went backwards: {} < {} (ignoring observation)",
                now, last
            );
            return RolloverSignal::empty();
        }

        let signal = self.crossed(last, now);
        self.last = Some(now);

        if !signal.is_empty() {
            debug!("Periods started at {}: {}", now, signal);
        }

        signal
    }

    fn crossed(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> RolloverSignal {
        let (prev, curr) = (last.naive_utc(), now.naive_utc());
        let (prev_date, curr_date) = (prev.date(), curr.date());
        let mut signal = RolloverSignal::empty();

        if prev_date != curr_date || prev.hour() != curr.hour() {
            signal.insert(StatisticPeriod::PerHour);
        }
        if prev_date != curr_date {
            signal.insert(StatisticPeriod::PerDay);
        }
        if self.week_anchor(prev_date) != self.week_anchor(curr_date) {
            signal.insert(StatisticPeriod::PerWeek);
        }
        if (prev_date.year(), prev_date.month()) != (curr_date.year(), curr_date.month()) {
            signal.insert(StatisticPeriod::PerMonth);
        }
        if prev_date.year() != curr_date.year() {
            signal.insert(StatisticPeriod::PerYear);
        }

        signal
    }

    /// First day of the week containing `date`
    fn week_anchor(&self, date: NaiveDate) -> NaiveDate {
        let offset = (date.weekday().num_days_from_monday() + 7
            - self.week_start.num_days_from_monday())
            % 7;
        date - Duration::days(i64::from(offset))
    }
}

impl Default for CalendarClock {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

/// Live wall-clock source. Do not mix with `observe` calls fed from replayed
/// or exchange timestamps on the same clock.
impl RolloverSource for CalendarClock {
    fn started_periods(&mut self) -> RolloverSignal {
        self.observe(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn primed(week_start: Weekday, start: DateTime<Utc>) -> CalendarClock {
        let mut clock = CalendarClock::new(week_start);
        assert!(clock.observe(start).is_empty());
        clock
    }

    #[test]
    fn test_first_observation_is_baseline() {
        let mut clock = CalendarClock::default();
        assert!(clock.observe(at(2024, 3, 1, 10, 0)).is_empty());
        assert_eq!(clock.last_observed(), Some(at(2024, 3, 1, 10, 0)));
    }

    #[test]
    fn test_same_hour_no_rollover() {
        let mut clock = primed(Weekday::Sun, at(2024, 3, 1, 10, 5));
        assert!(clock.observe(at(2024, 3, 1, 10, 59)).is_empty());
    }

    #[test]
    fn test_hour_rollover_only() {
        let mut clock = primed(Weekday::Sun, at(2024, 3, 1, 10, 59));
        let signal = clock.observe(at(2024, 3, 1, 11, 0));
        assert_eq!(signal, RolloverSignal::of(&[StatisticPeriod::PerHour]));
    }

    #[test]
    fn test_midnight_rolls_hour_and_day() {
        // Friday -> Saturday, same week and month
        let mut clock = primed(Weekday::Sun, at(2024, 3, 1, 23, 30));
        let signal = clock.observe(at(2024, 3, 2, 0, 10));
        assert_eq!(
            signal,
            RolloverSignal::of(&[StatisticPeriod::PerHour, StatisticPeriod::PerDay])
        );
    }

    #[test]
    fn test_week_starts_on_configured_day() {
        // Saturday 2024-03-02 -> Sunday 2024-03-03
        let mut sunday = primed(Weekday::Sun, at(2024, 3, 2, 12, 0));
        assert!(sunday
            .observe(at(2024, 3, 3, 12, 0))
            .contains(StatisticPeriod::PerWeek));

        let mut monday = primed(Weekday::Mon, at(2024, 3, 2, 12, 0));
        let signal = monday.observe(at(2024, 3, 3, 12, 0));
        assert!(signal.contains(StatisticPeriod::PerDay));
        assert!(!signal.contains(StatisticPeriod::PerWeek));
        assert!(monday
            .observe(at(2024, 3, 4, 0, 0))
            .contains(StatisticPeriod::PerWeek));
    }

    #[test]
    fn test_month_rollover_without_week() {
        // Thursday 2024-02-29 -> Friday 2024-03-01
        let mut clock = primed(Weekday::Sun, at(2024, 2, 29, 18, 0));
        let signal = clock.observe(at(2024, 3, 1, 9, 0));
        assert!(signal.contains(StatisticPeriod::PerMonth));
        assert!(!signal.contains(StatisticPeriod::PerWeek));
        assert!(!signal.contains(StatisticPeriod::PerYear));
    }

    #[test]
    fn test_new_year_rolls_everything_but_week() {
        // Tuesday 2024-12-31 -> Wednesday 2025-01-01
        let mut clock = primed(Weekday::Sun, at(2024, 12, 31, 23, 0));
        let signal = clock.observe(at(2025, 1, 1, 0, 0));
        assert_eq!(
            signal,
            RolloverSignal::of(&[
                StatisticPeriod::PerHour,
                StatisticPeriod::PerDay,
                StatisticPeriod::PerMonth,
                StatisticPeriod::PerYear,
            ])
        );
    }

    #[test]
    fn test_backwards_time_ignored() {
        let mut clock = primed(Weekday::Sun, at(2024, 3, 1, 10, 0));
        assert!(clock.observe(at(2024, 3, 1, 8, 0)).is_empty());
        assert_eq!(clock.last_observed(), Some(at(2024, 3, 1, 10, 0)));

        // The hour boundary is still reported once, relative to the baseline
        let signal = clock.observe(at(2024, 3, 1, 11, 0));
        assert!(signal.contains(StatisticPeriod::PerHour));
        assert!(clock.observe(at(2024, 3, 1, 11, 30)).is_empty());
    }
}
