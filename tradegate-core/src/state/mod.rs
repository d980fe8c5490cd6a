//! Trade Conditions - Why Trading Is Blocked This Tick
//!
//! [`TradeConditions`] is the single decision surface a strategy driver reads
//! before trading. Rate-limit verdicts (from [`LimitTable`](crate::limits::LimitTable))
//! and environment verdicts (market closed, margin, terminal state) are
//! folded into one set of named conditions.
//!
//! ## Wire Layout
//!
//! Each condition owns a fixed bit. The layout is persisted and transmitted
//! by external consumers; positions are never renumbered.
//!
//! ```text
//! bit  0 BarsNotEnough       bit  8 OrdersMaxSoft
//! bit  1 HedgeNotAllowed     bit  9 PeriodLimitReached
//! bit  2 MarginMaxHard       bit 10 SpreadTooHigh
//! bit  3 MarginMaxSoft       bit 11 TradeNotAllowed
//! bit  4 MarketClosed        bit 12 TradeNotPossible
//! bit  5 MoneyNotEnough      bit 13 TerminalBusy
//! bit  6 OrdersActive        bit 14 TerminalOffline
//! bit  7 OrdersMaxHard       bit 15 TerminalShutdown
//! ```
//!
//! ## Matching Semantics
//!
//! [`has_any_condition`] matches when the sets intersect OR are equal. That
//! makes an empty query match an empty set, which a plain intersection test
//! would not. Use [`has_all_conditions`] for strict containment.

mod condition;

pub use condition::{describe_bits, TradeCondition, UNKNOWN_CONDITION};

use crate::core::GateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Width of the encoded mask
pub const MASK_BITS: u32 = u32::BITS;

/// Set of active trade conditions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct TradeConditions {
    bits: u32,
}

/// Any-intersection-or-equal match between two condition sets
#[inline]
pub fn has_any_condition(states: TradeConditions, query: TradeConditions) -> bool {
    (states.bits & query.bits) != 0 || states.bits == query.bits
}

/// Strict containment: every condition in `query` is present in `states`
#[inline]
pub fn has_all_conditions(states: TradeConditions, query: TradeConditions) -> bool {
    (states.bits & query.bits) == query.bits
}

impl TradeConditions {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Every named condition
    pub fn all() -> Self {
        TradeCondition::ALL.iter().copied().collect()
    }

    /// Conditions under which an order cannot be placed at all
    pub fn cannot_trade() -> Self {
        Self::from_conditions(&[
            TradeCondition::BarsNotEnough,
            TradeCondition::MarketClosed,
            TradeCondition::MoneyNotEnough,
            TradeCondition::TradeNotAllowed,
            TradeCondition::TradeNotPossible,
            TradeCondition::TerminalBusy,
            TradeCondition::TerminalOffline,
            TradeCondition::TerminalShutdown,
        ])
    }

    /// Conditions under which an order could be placed but must not be
    pub fn should_not_trade() -> Self {
        Self::from_conditions(&[
            TradeCondition::HedgeNotAllowed,
            TradeCondition::MarginMaxHard,
            TradeCondition::OrdersMaxHard,
            TradeCondition::PeriodLimitReached,
            TradeCondition::SpreadTooHigh,
        ])
    }

    pub fn from_conditions(conditions: &[TradeCondition]) -> Self {
        conditions.iter().copied().collect()
    }

    // ------------------------------------------------------------------
    // Wire encoding
    // ------------------------------------------------------------------

    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.bits
    }

    /// Decode a mask, rejecting bits outside the known layout
    pub fn from_bits(bits: u32) -> Result<Self, GateError> {
        let unknown = bits & !Self::all().bits;
        if unknown != 0 {
            return Err(GateError::UnknownConditionBits { bits: unknown });
        }
        Ok(Self { bits })
    }

    /// Decode a mask, dropping bits outside the known layout
    pub fn from_bits_truncate(bits: u32) -> Self {
        let known = Self::all().bits;
        if bits & !known != 0 {
            warn!(
                "Dropping unknown trade condition bits {:#010x}",
                bits & !known
            );
        }
        Self { bits: bits & known }
    }

    /// Per-bit report keyed `"1"` to `"32"`, value `1` if the bit is set
    pub fn flag_report(&self) -> BTreeMap<String, u8> {
        (0..MASK_BITS)
            .map(|i| {
                let bit = Self { bits: 1 << i };
                ((i + 1).to_string(), u8::from(self.has_any(bit)))
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    #[inline]
    pub fn insert(&mut self, condition: TradeCondition) {
        self.bits |= condition.bit();
    }

    #[inline]
    pub fn remove(&mut self, condition: TradeCondition) {
        self.bits &= !condition.bit();
    }

    /// Raise or clear exactly one condition
    #[inline]
    pub fn set(&mut self, condition: TradeCondition, active: bool) {
        if active {
            self.insert(condition);
        } else {
            self.remove(condition);
        }
    }

    /// Raise every condition in `other`
    pub fn add_all(&mut self, other: TradeConditions) {
        self.bits |= other.bits;
    }

    /// Clear every condition in `other`
    pub fn remove_all(&mut self, other: TradeConditions) {
        self.bits &= !other.bits;
    }

    /// Replace the whole set
    pub fn replace_all(&mut self, other: TradeConditions) {
        self.bits = other.bits;
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[inline]
    pub fn contains(&self, condition: TradeCondition) -> bool {
        self.bits & condition.bit() != 0
    }

    /// See [`has_any_condition`]
    #[inline]
    pub fn has_any(&self, query: TradeConditions) -> bool {
        has_any_condition(*self, query)
    }

    /// See [`has_all_conditions`]
    #[inline]
    pub fn has_all(&self, query: TradeConditions) -> bool {
        has_all_conditions(*self, query)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// True unless a cannot-trade or should-not-trade condition is active
    pub fn allows_trading(&self) -> bool {
        let mut blocking = Self::cannot_trade();
        blocking.add_all(Self::should_not_trade());
        self.bits & blocking.bits == 0
    }

    /// Active conditions in bit order
    pub fn iter(&self) -> impl Iterator<Item = TradeCondition> + '_ {
        TradeCondition::ALL
            .iter()
            .copied()
            .filter(move |c| self.contains(*c))
    }

    /// Conditions in `self` that are not in `other`
    pub fn difference(&self, other: TradeConditions) -> TradeConditions {
        Self {
            bits: self.bits & !other.bits,
        }
    }
}

impl From<TradeCondition> for TradeConditions {
    fn from(condition: TradeCondition) -> Self {
        Self {
            bits: condition.bit(),
        }
    }
}

impl FromIterator<TradeCondition> for TradeConditions {
    fn from_iter<I: IntoIterator<Item = TradeCondition>>(iter: I) -> Self {
        let mut set = Self::empty();
        for condition in iter {
            set.insert(condition);
        }
        set
    }
}

impl std::ops::BitOr for TradeConditions {
    type Output = TradeConditions;

    fn bitor(self, rhs: TradeConditions) -> TradeConditions {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl std::ops::BitOr for TradeCondition {
    type Output = TradeConditions;

    fn bitor(self, rhs: TradeCondition) -> TradeConditions {
        TradeConditions::from(self) | TradeConditions::from(rhs)
    }
}

impl std::ops::BitOr<TradeCondition> for TradeConditions {
    type Output = TradeConditions;

    fn bitor(self, rhs: TradeCondition) -> TradeConditions {
        self | TradeConditions::from(rhs)
    }
}

// Serde boundary: the mask travels as its raw `u32`.
impl From<u32> for TradeConditions {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl From<TradeConditions> for u32 {
    fn from(conditions: TradeConditions) -> Self {
        conditions.bits
    }
}

impl fmt::Display for TradeConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter().map(TradeCondition::as_str).collect();
        f.write_str(&names.join("|"))
    }
}
