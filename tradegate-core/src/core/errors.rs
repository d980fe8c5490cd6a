//! Domain-specific error types for gating lookups
//!
//! The gating primitives never abort a tick. These errors are returned by the
//! strict `try_*` lookups; the lenient lookups log them and fall back to a
//! sentinel value instead.

use thiserror::Error;

/// Invalid-parameter conditions raised by raw index and bit lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// Raw statistic type index outside the closed enumeration
    #[error("invalid parameter: statistic type index {index} (expected 0..{max})")]
    InvalidStatisticType {
        /// Index that was looked up
        index: usize,
        /// Number of known statistic types
        max: usize,
    },

    /// Raw statistic period index outside the closed enumeration
    #[error("invalid parameter: statistic period index {index} (expected 0..{max})")]
    InvalidPeriod {
        /// Index that was looked up
        index: usize,
        /// Number of known periods
        max: usize,
    },

    /// Bit position that does not map to a named trade condition
    #[error("invalid parameter: no trade condition at bit {bit}")]
    InvalidCondition { bit: u32 },

    /// Name that does not match any variant of the enumeration
    #[error("invalid parameter: unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// Encoded mask carries bits outside the stable condition layout
    #[error("invalid parameter: unknown trade condition bits {bits:#010x}")]
    UnknownConditionBits { bits: u32 },
}
