//! Input subsystem errors
//!
//! None of these are faults. Each one means "operation skipped"; retry or
//! discard is the caller's decision.

use core::fmt;

use crate::config::TimingError;

/// Errors reported by the input subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Event queue is full, the event was dropped
    QueueFull,
    /// Handler table is at capacity
    HandlerTableFull,
    /// Device has no bound event context
    Unbound,
    /// Interrupt button registry is at capacity
    RegistryFull,
    /// Button timing thresholds are inconsistent
    InvalidTiming(TimingError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::QueueFull => f.write_str("event queue full"),
            InputError::HandlerTableFull => f.write_str("handler table full"),
            InputError::Unbound => f.write_str("device not bound to a context"),
            InputError::RegistryFull => f.write_str("button registry full"),
            InputError::InvalidTiming(reason) => write!(f, "invalid button timing: {:?}", reason),
        }
    }
}
