use crate::core::GateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Description returned for masks that do not name exactly one condition
pub const UNKNOWN_CONDITION: &str = "Unknown!";

/// A named reason why automated trading should not proceed
///
/// Discriminants are bit positions in the encoded mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TradeCondition {
    BarsNotEnough = 0,
    HedgeNotAllowed = 1,
    MarginMaxHard = 2,
    MarginMaxSoft = 3,
    MarketClosed = 4,
    MoneyNotEnough = 5,
    OrdersActive = 6,
    OrdersMaxHard = 7,
    OrdersMaxSoft = 8,
    PeriodLimitReached = 9,
    SpreadTooHigh = 10,
    TradeNotAllowed = 11,
    TradeNotPossible = 12,
    TerminalBusy = 13,
    TerminalOffline = 14,
    TerminalShutdown = 15,
}

impl TradeCondition {
    /// Every condition in bit order
    pub const ALL: [TradeCondition; 16] = [
        TradeCondition::BarsNotEnough,
        TradeCondition::HedgeNotAllowed,
        TradeCondition::MarginMaxHard,
        TradeCondition::MarginMaxSoft,
        TradeCondition::MarketClosed,
        TradeCondition::MoneyNotEnough,
        TradeCondition::OrdersActive,
        TradeCondition::OrdersMaxHard,
        TradeCondition::OrdersMaxSoft,
        TradeCondition::PeriodLimitReached,
        TradeCondition::SpreadTooHigh,
        TradeCondition::TradeNotAllowed,
        TradeCondition::TradeNotPossible,
        TradeCondition::TerminalBusy,
        TradeCondition::TerminalOffline,
        TradeCondition::TerminalShutdown,
    ];

    /// Bit position in the encoded mask
    #[inline(always)]
    pub const fn position(self) -> u32 {
        self as u32
    }

    /// Single-bit mask for this condition
    #[inline(always)]
    pub const fn bit(self) -> u32 {
        1 << self.position()
    }

    /// Condition at a bit position
    pub fn from_position(position: u32) -> Result<Self, GateError> {
        Self::ALL
            .get(position as usize)
            .copied()
            .ok_or(GateError::InvalidCondition { bit: position })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TradeCondition::BarsNotEnough => "bars_not_enough",
            TradeCondition::HedgeNotAllowed => "hedge_not_allowed",
            TradeCondition::MarginMaxHard => "margin_max_hard",
            TradeCondition::MarginMaxSoft => "margin_max_soft",
            TradeCondition::MarketClosed => "market_closed",
            TradeCondition::MoneyNotEnough => "money_not_enough",
            TradeCondition::OrdersActive => "orders_active",
            TradeCondition::OrdersMaxHard => "orders_max_hard",
            TradeCondition::OrdersMaxSoft => "orders_max_soft",
            TradeCondition::PeriodLimitReached => "period_limit_reached",
            TradeCondition::SpreadTooHigh => "spread_too_high",
            TradeCondition::TradeNotAllowed => "trade_not_allowed",
            TradeCondition::TradeNotPossible => "trade_not_possible",
            TradeCondition::TerminalBusy => "terminal_busy",
            TradeCondition::TerminalOffline => "terminal_offline",
            TradeCondition::TerminalShutdown => "terminal_shutdown",
        }
    }

    /// Operator-facing message
    pub const fn description(self) -> &'static str {
        match self {
            TradeCondition::BarsNotEnough => "Not enough bars to trade",
            TradeCondition::HedgeNotAllowed => "Hedging not allowed by broker",
            TradeCondition::MarginMaxHard => "Hard limit of trade margin reached",
            TradeCondition::MarginMaxSoft => "Soft limit of trade margin reached",
            TradeCondition::MarketClosed => "Trade market closed",
            TradeCondition::MoneyNotEnough => "Not enough money to trade",
            TradeCondition::OrdersActive => "New orders has been placed",
            TradeCondition::OrdersMaxHard => "Hard limit of maximum orders reached",
            TradeCondition::OrdersMaxSoft => "Soft limit of maximum orders reached",
            TradeCondition::PeriodLimitReached => "Per period limit reached",
            TradeCondition::SpreadTooHigh => "Spread too high",
            TradeCondition::TradeNotAllowed => "Trade not allowed",
            TradeCondition::TradeNotPossible => "Trade not possible",
            TradeCondition::TerminalBusy => "Terminal context busy",
            TradeCondition::TerminalOffline => "Terminal offline",
            TradeCondition::TerminalShutdown => "Terminal is shutting down",
        }
    }
}

impl fmt::Display for TradeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Describe a raw single-bit mask
///
/// Anything other than exactly one known bit yields [`UNKNOWN_CONDITION`].
pub fn describe_bits(bits: u32) -> &'static str {
    if bits.count_ones() != 1 {
        return UNKNOWN_CONDITION;
    }
    TradeCondition::from_position(bits.trailing_zeros())
        .map(TradeCondition::description)
        .unwrap_or(UNKNOWN_CONDITION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_match_all_order() {
        for (i, condition) in TradeCondition::ALL.iter().enumerate() {
            assert_eq!(condition.position(), i as u32);
            assert_eq!(TradeCondition::from_position(i as u32), Ok(*condition));
        }
        assert_eq!(
            TradeCondition::from_position(16),
            Err(GateError::InvalidCondition { bit: 16 })
        );
    }

    #[test]
    fn test_hard_and_soft_descriptions() {
        assert!(TradeCondition::OrdersMaxHard.description().starts_with("Hard"));
        assert!(TradeCondition::OrdersMaxSoft.description().starts_with("Soft"));
        assert!(TradeCondition::MarginMaxHard.description().starts_with("Hard"));
    }

    #[test]
    fn test_describe_bits() {
        assert_eq!(describe_bits(1 << 4), "Trade market closed");
        assert_eq!(describe_bits(1 << 15), "Terminal is shutting down");
        assert_eq!(describe_bits(0), UNKNOWN_CONDITION);
        assert_eq!(describe_bits(0b11), UNKNOWN_CONDITION);
        assert_eq!(describe_bits(1 << 20), UNKNOWN_CONDITION);
    }

    #[test]
    fn test_descriptions_unique() {
        let mut seen = std::collections::HashSet::new();
        for condition in TradeCondition::ALL {
            assert!(seen.insert(condition.description()), "{:?}", condition);
        }
    }
}
