//! Trade Gate - Per-Tick Gating Driver
//!
//! Owns one trading context's statistics, limits and condition set, and
//! recomputes the conditions on every tick.
//!
//! ```text
//!  order event ──► TradeGate::record ──► OrderStats::add
//!
//!  tick(now, observation)
//!     │
//!     ├─► CalendarClock::observe(now) ──► RolloverSignal
//!     ├─► OrderStats::rollover(signal)
//!     ├─► LimitTable::first_limit_reached(stats) ──► PeriodLimitReached
//!     ├─► bars / margin vs TradeParams        ──► BarsNotEnough, MarginMaxHard
//!     ├─► observation flags                   ──► everything else
//!     ▼
//!  TradeConditions ──► allows_trading()?
//! ```
//!
//! One gate per trading context. Ticks are processed strictly in sequence
//! through `&mut self`; nothing here is shared between contexts.

use crate::clock::{CalendarClock, RolloverSignal};
use crate::config::GateConfig;
use crate::core::{StatisticPeriod, StatisticType};
use crate::params::TradeParams;
use crate::state::{TradeCondition, TradeConditions};
use crate::stats::OrderStats;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Broker/terminal conditions observed by the driver this tick
///
/// `None` numeric fields mean "not known" and never raise a condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    /// Bars currently available on the chart
    pub bars_available: Option<u32>,
    /// Account margin in use, in percent
    pub margin_used_pct: Option<Decimal>,
    pub margin_soft_limit: bool,
    pub hedge_not_allowed: bool,
    pub market_closed: bool,
    pub money_not_enough: bool,
    pub orders_active: bool,
    pub orders_max_hard: bool,
    pub orders_max_soft: bool,
    pub spread_too_high: bool,
    pub trade_not_allowed: bool,
    pub trade_not_possible: bool,
    pub terminal_busy: bool,
    pub terminal_offline: bool,
    pub terminal_shutdown: bool,
}

/// Gating state for one trading context
#[derive(Debug, Clone)]
pub struct TradeGate {
    params: TradeParams,
    stats: OrderStats,
    states: TradeConditions,
    clock: CalendarClock,
}

impl TradeGate {
    pub fn new(params: TradeParams, clock: CalendarClock) -> Self {
        info!(
            "Initialized TradeGate: lot_size={}, risk_margin={}%, bars_min={}, limits={}",
            params.lot_size,
            params.risk_margin,
            params.bars_min,
            if params.limits.is_unlimited() { "none" } else { "configured" }
        );

        Self {
            params,
            stats: OrderStats::new(),
            states: TradeConditions::empty(),
            clock,
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.trade.clone(), CalendarClock::new(config.clock.week_start))
    }

    // ------------------------------------------------------------------
    // Order events
    // ------------------------------------------------------------------

    /// Count `amount` order events of `stat_type`
    pub fn record(&mut self, stat_type: StatisticType, amount: u64) {
        self.stats.add(stat_type, amount);
    }

    /// Counter value at `now`, applying any rollover since the last tick
    ///
    /// `now` must come from the same time source as `evaluate`; the clock
    /// baseline advances exactly as it would for a tick.
    pub fn current_count(
        &mut self,
        stat_type: StatisticType,
        period: StatisticPeriod,
        now: DateTime<Utc>,
    ) -> u64 {
        let signal = self.clock.observe(now);
        self.stats.rollover(signal);
        self.stats.value(stat_type, period)
    }

    // ------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------

    /// Recompute the conditions for a tick at `now`
    pub fn evaluate(&mut self, now: DateTime<Utc>, observation: &Observation) -> TradeConditions {
        let signal = self.clock.observe(now);
        self.evaluate_with(signal, observation)
    }

    /// Recompute the conditions using an explicit rollover signal
    pub fn evaluate_with(&mut self, signal: RolloverSignal, observation: &Observation) -> TradeConditions {
        self.stats.rollover(signal);

        let mut next = self.environment_conditions(observation);

        let breach = self.params.limits.first_limit_reached(&self.stats);
        if let Some(breach) = breach {
            debug!("Period limit reached: {}", breach);
        }
        next.set(TradeCondition::PeriodLimitReached, breach.is_some());

        self.log_transitions(next);
        self.states = next;
        next
    }

    fn environment_conditions(&self, obs: &Observation) -> TradeConditions {
        let mut next = TradeConditions::empty();

        let bars_short = obs
            .bars_available
            .is_some_and(|bars| bars < u32::from(self.params.bars_min));
        let margin_hard = obs
            .margin_used_pct
            .is_some_and(|used| used >= self.params.risk_margin);

        next.set(TradeCondition::BarsNotEnough, bars_short);
        next.set(TradeCondition::MarginMaxHard, margin_hard);
        next.set(TradeCondition::MarginMaxSoft, obs.margin_soft_limit);
        next.set(TradeCondition::HedgeNotAllowed, obs.hedge_not_allowed);
        next.set(TradeCondition::MarketClosed, obs.market_closed);
        next.set(TradeCondition::MoneyNotEnough, obs.money_not_enough);
        next.set(TradeCondition::OrdersActive, obs.orders_active);
        next.set(TradeCondition::OrdersMaxHard, obs.orders_max_hard);
        next.set(TradeCondition::OrdersMaxSoft, obs.orders_max_soft);
        next.set(TradeCondition::SpreadTooHigh, obs.spread_too_high);
        next.set(TradeCondition::TradeNotAllowed, obs.trade_not_allowed);
        next.set(TradeCondition::TradeNotPossible, obs.trade_not_possible);
        next.set(TradeCondition::TerminalBusy, obs.terminal_busy);
        next.set(TradeCondition::TerminalOffline, obs.terminal_offline);
        next.set(TradeCondition::TerminalShutdown, obs.terminal_shutdown);

        next
    }

    fn log_transitions(&self, next: TradeConditions) {
        for condition in next.difference(self.states).iter() {
            info!(condition = condition.as_str(), "Trade condition raised: {}", condition);
        }
        for condition in self.states.difference(next).iter() {
            info!(condition = condition.as_str(), "Trade condition cleared: {}", condition);
        }
    }

    // ------------------------------------------------------------------
    // Limit reconfiguration (between ticks)
    // ------------------------------------------------------------------

    pub fn set_limit(&mut self, stat_type: StatisticType, period: StatisticPeriod, value: u64) {
        self.params.limits.set(stat_type, period, value);
    }

    pub fn set_period_limit(&mut self, period: StatisticPeriod, value: u64) {
        self.params.limits.set_period(period, value);
    }

    pub fn set_type_limit(&mut self, stat_type: StatisticType, value: u64) {
        self.params.limits.set_type(stat_type, value);
    }

    pub fn set_all_limits(&mut self, value: u64) {
        self.params.limits.set_all(value);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Conditions from the most recent evaluation
    pub fn conditions(&self) -> TradeConditions {
        self.states
    }

    pub fn allows_trading(&self) -> bool {
        self.states.allows_trading()
    }

    pub fn is_rate_limited(&self) -> bool {
        self.states.contains(TradeCondition::PeriodLimitReached)
    }

    pub fn stats(&self) -> &OrderStats {
        &self.stats
    }

    pub fn params(&self) -> &TradeParams {
        &self.params
    }
}
