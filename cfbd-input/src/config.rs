//! Input configuration
//!
//! Capacities are compile-time constants (they size static buffers).
//! Button timing is a runtime value so boards can tune it, with defaults
//! that suit a mechanical tact switch scanned every few milliseconds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use cfbd_hal::Ticks;

/// Ring buffer slots per event context (one slot is always kept empty)
pub const INPUT_EVENT_QUEUE_SIZE: usize = 16;

/// Maximum handlers per event context
pub const INPUT_MAX_HANDLER_CNT: usize = 8;

/// Maximum buttons watched by one interrupt registry
pub const MAX_INTERRUPT_BUTTONS: usize = 3;

/// Minimum stable-sample interval; enforced by the caller's scan period
pub const DEBOUNCE_TICKS: Ticks = 20;

/// Hold duration that turns a press into a long press
pub const LONG_PRESS_TICKS: Ticks = 1000;

/// Window after a short release in which a second press makes a double click
pub const DOUBLE_CLICK_TICKS: Ticks = 300;

/// Suggested repeat interval for long-press hold reports
pub const LONG_PRESS_HOLD_TICKS: Ticks = 200;

/// Button timing thresholds, in ticks of the board's tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonTiming {
    /// Debounce interval the scan period should respect
    pub debounce: Ticks,
    /// Long-press threshold
    pub long_press: Ticks,
    /// Double-click window
    pub double_click: Ticks,
    /// Repeat interval for `LongPressHold` reports, `None` = never repeat
    pub hold_repeat: Option<Ticks>,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_TICKS,
            long_press: LONG_PRESS_TICKS,
            double_click: DOUBLE_CLICK_TICKS,
            hold_repeat: None,
        }
    }
}

/// Reasons a [`ButtonTiming`] set is inconsistent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Long-press threshold is zero, every press would be a long press
    ZeroLongPress,
    /// Double-click window is not shorter than the long-press threshold
    DoubleClickTooLong,
    /// Debounce interval swallows the other thresholds
    DebounceTooLong,
    /// Hold repeat interval of zero would report on every scan
    ZeroHoldRepeat,
}

impl ButtonTiming {
    /// Timing with long-press hold repeats enabled at the given interval
    pub fn with_hold_repeat(mut self, interval: Ticks) -> Self {
        self.hold_repeat = Some(interval);
        self
    }

    /// Check that the thresholds make sense together
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.long_press == 0 {
            return Err(TimingError::ZeroLongPress);
        }
        if self.double_click >= self.long_press {
            return Err(TimingError::DoubleClickTooLong);
        }
        if self.debounce >= self.double_click {
            return Err(TimingError::DebounceTooLong);
        }
        if self.hold_repeat == Some(0) {
            return Err(TimingError::ZeroHoldRepeat);
        }
        Ok(())
    }
}
