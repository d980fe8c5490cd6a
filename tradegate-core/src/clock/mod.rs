//! Calendar Rollover Detection
//!
//! Decides which calendar boundaries have been crossed since the previous
//! tick and hands that over as a [`RolloverSignal`]. The statistics matrix
//! never reads the wall clock itself; it only applies signals.
//!
//! ```text
//! tick(now) ──► CalendarClock::observe(now) ──► RolloverSignal {per_hour, per_day}
//!                                                      │
//!                                                      ▼
//!                                           OrderStats::rollover(signal)
//! ```

pub mod calendar;
pub mod signal;

pub use calendar::CalendarClock;
pub use signal::RolloverSignal;

/// Producer of rollover signals
///
/// Implementations must never report the same boundary crossing twice.
pub trait RolloverSource {
    /// Periods that started since the previous call
    fn started_periods(&mut self) -> RolloverSignal;
}

/// A fixed signal is a one-shot source: it yields its periods once, then
/// nothing.
impl RolloverSource for RolloverSignal {
    fn started_periods(&mut self) -> RolloverSignal {
        std::mem::take(self)
    }
}

impl<S: RolloverSource + ?Sized> RolloverSource for &mut S {
    fn started_periods(&mut self) -> RolloverSignal {
        (**self).started_periods()
    }
}
