//! Statics shared between tasks and input handlers
//!
//! Input handlers are plain functions called from the dispatch loop, so
//! everything they touch lives here.

use cfbd_hal_rp2040::{EdgeLatch, LatchedPin};
use cfbd_input::{ButtonRegistry, EventContext};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// LED the handlers can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    /// Toggled by a single click on either button
    Click,
    /// Toggled by a double click on either button
    DoubleClick,
}

/// Pending LED toggles
const LED_CHANNEL_SIZE: usize = 4;

/// Event context both buttons report into
pub static INPUT: EventContext<'static> = EventContext::new();

/// Interrupt-driven buttons, routed by pin
pub static EDGE_BUTTONS: ButtonRegistry<'static, 'static, LatchedPin> = ButtonRegistry::new();

/// Latched level of the interrupt-driven button (released, pulled up)
pub static EDGE_LATCH: EdgeLatch = EdgeLatch::new(true);

/// LED toggle requests from input handlers
pub static LED_TOGGLE: Channel<CriticalSectionRawMutex, Led, LED_CHANNEL_SIZE> = Channel::new();
