//! End-to-end gating scenarios: counters, limits and conditions together

use chrono::{Duration, TimeZone, Utc, Weekday};
use rust_decimal_macros::dec;
use tradegate_core::prelude::*;
use tradegate_core::state::{has_all_conditions, has_any_condition, describe_bits, UNKNOWN_CONDITION};

#[test]
fn test_hourly_limit_cleared_by_rollover() {
    let mut limits = LimitTable::unlimited();
    limits.set(StatisticType::OrdersOpened, StatisticPeriod::PerHour, 5);

    let mut stats = OrderStats::new();
    for _ in 0..5 {
        stats.increment(StatisticType::OrdersOpened);
    }
    assert!(limits.is_any_limit_reached(&stats));

    stats.rollover(RolloverSignal::of(&[StatisticPeriod::PerHour]));
    assert!(!limits.is_any_limit_reached(&stats));
    assert_eq!(stats.value(StatisticType::OrdersOpened, StatisticPeriod::PerDay), 5);
    assert_eq!(stats.value(StatisticType::OrdersOpened, StatisticPeriod::AllTime), 5);
}

#[test]
fn test_market_closed_queries() {
    let mut states = TradeConditions::empty();
    states.insert(TradeCondition::MarketClosed);

    assert!(states.contains(TradeCondition::MarketClosed));
    assert!(!states.contains(TradeCondition::SpreadTooHigh));
    assert!(!states.has_all(TradeCondition::MarketClosed | TradeCondition::SpreadTooHigh));
    assert!(states.has_any(TradeCondition::MarketClosed | TradeCondition::SpreadTooHigh));
    assert!(!states.allows_trading());
}

#[test]
fn test_period_limit_broadcast() {
    let mut limits = LimitTable::unlimited();
    limits.set(StatisticType::OrdersErrors, StatisticPeriod::PerHour, 7);
    limits.set_period(StatisticPeriod::PerDay, 100);

    for t in StatisticType::ALL {
        assert_eq!(limits.threshold(t, StatisticPeriod::PerDay), 100);
        for p in [StatisticPeriod::PerWeek, StatisticPeriod::PerMonth, StatisticPeriod::PerYear] {
            assert_eq!(limits.threshold(t, p), 0);
        }
    }
    assert_eq!(limits.threshold(StatisticType::OrdersErrors, StatisticPeriod::PerHour), 7);
}

#[test]
fn test_empty_query_matches_only_empty_set() {
    let empty = TradeConditions::empty();
    assert!(has_any_condition(empty, empty));

    let busy: TradeConditions = TradeCondition::TerminalBusy.into();
    assert!(!has_any_condition(busy, empty));
    assert!(has_all_conditions(busy, empty));
}

#[test]
fn test_condition_bits_are_stable() {
    assert_eq!(TradeCondition::BarsNotEnough.bit(), 1);
    assert_eq!(TradeCondition::PeriodLimitReached.bit(), 1 << 9);
    assert_eq!(TradeCondition::TerminalShutdown.bit(), 1 << 15);

    let states = TradeCondition::MarketClosed | TradeCondition::PeriodLimitReached;
    let restored = TradeConditions::from_bits(states.to_bits()).unwrap();
    assert_eq!(restored, states);

    assert!(TradeConditions::from_bits(1 << 20).is_err());
    assert_eq!(TradeConditions::from_bits_truncate((1 << 20) | 1).to_bits(), 1);

    assert_eq!(describe_bits(1 << 31), UNKNOWN_CONDITION);
    assert_eq!(describe_bits(0), UNKNOWN_CONDITION);
}

#[test]
fn test_gate_over_a_trading_week() {
    let params = TradeParams::default()
        .with_limit(StatisticType::OrdersOpened, StatisticPeriod::PerDay, 3)
        .with_limit(StatisticType::OrdersErrors, StatisticPeriod::PerWeek, 2)
        .with_bars_min(50);
    let mut gate = TradeGate::new(params, CalendarClock::new(Weekday::Mon));

    let healthy = Observation {
        bars_available: Some(500),
        margin_used_pct: Some(dec!(0.2)),
        ..Default::default()
    };

    // Tuesday 2024-03-05: three opens exhaust the daily budget
    let tuesday = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
    assert!(gate.evaluate(tuesday, &healthy).is_empty());
    gate.record(StatisticType::OrdersOpened, 3);
    let states = gate.evaluate(tuesday + Duration::hours(2), &healthy);
    assert_eq!(states, TradeCondition::PeriodLimitReached.into());

    // Wednesday: new day, daily counter cleared
    let states = gate.evaluate(tuesday + Duration::days(1), &healthy);
    assert!(gate.allows_trading(), "unexpected states {}", states);

    // Two errors across the week trip the weekly limit
    gate.record(StatisticType::OrdersErrors, 1);
    assert!(gate.evaluate(tuesday + Duration::days(2), &healthy).is_empty());
    gate.record(StatisticType::OrdersErrors, 1);
    assert!(gate.evaluate(tuesday + Duration::days(3), &healthy).contains(TradeCondition::PeriodLimitReached));

    // Still limited on Sunday, cleared on Monday 2024-03-11
    let sunday = Utc.with_ymd_and_hms(2024, 3, 10, 23, 0, 0).unwrap();
    assert!(gate.evaluate(sunday, &healthy).contains(TradeCondition::PeriodLimitReached));
    let monday = sunday + Duration::hours(2);
    assert!(gate.evaluate(monday, &healthy).is_empty());

    assert_eq!(gate.stats().value(StatisticType::OrdersErrors, StatisticPeriod::PerWeek), 0);
    assert_eq!(gate.stats().value(StatisticType::OrdersErrors, StatisticPeriod::PerMonth), 2);
    assert_eq!(gate.stats().value(StatisticType::OrdersOpened, StatisticPeriod::AllTime), 3);
}

#[test]
fn test_environment_conditions_classify() {
    let mut gate = TradeGate::new(TradeParams::default(), CalendarClock::default());

    // Soft conditions are reported but do not block
    let soft = Observation {
        margin_soft_limit: true,
        orders_max_soft: true,
        orders_active: true,
        ..Default::default()
    };
    let states = gate.evaluate_with(RolloverSignal::empty(), &soft);
    assert_eq!(states.len(), 3);
    assert!(states.allows_trading());

    // Terminal trouble blocks
    let offline = Observation {
        terminal_offline: true,
        ..Default::default()
    };
    let states = gate.evaluate_with(RolloverSignal::empty(), &offline);
    assert!(states.has_any(TradeConditions::cannot_trade()));
    assert!(!gate.allows_trading());

    // Wide spread is a should-not-trade condition
    let wide = Observation {
        spread_too_high: true,
        ..Default::default()
    };
    let states = gate.evaluate_with(RolloverSignal::empty(), &wide);
    assert!(states.has_any(TradeConditions::should_not_trade()));
    assert!(!states.has_any(TradeConditions::cannot_trade()));
    assert!(!gate.allows_trading());
}

#[test]
fn test_invalid_raw_lookups_do_not_halt() {
    let mut stats = OrderStats::new();
    stats.add(StatisticType::OrdersClosed, 4);

    assert!(stats.try_value(3, 0).is_err());
    assert!(stats.try_value(0, 6).is_err());
    assert_eq!(stats.value_or_zero(3, 0), 0);
    assert_eq!(stats.value_or_zero(1, 5), 4);

    let limits = LimitTable::unlimited();
    assert_eq!(limits.threshold_or_unlimited(42, 42), 0);
    assert!(matches!(
        limits.try_threshold(0, 42),
        Err(GateError::InvalidPeriod { index: 42, .. })
    ));
}
