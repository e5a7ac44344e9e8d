//! Push button input device
//!
//! - [`Button`]: per-pin state machine classifying press, release, click,
//!   double click, long press and long-press hold
//! - [`ButtonRegistry`]: routes shared edge interrupts to interrupt-mode
//!   buttons
//! - [`ButtonEvent`]: the event codes buttons report

pub mod events;
pub mod machine;
pub mod registry;

pub use events::ButtonEvent;
pub use machine::{Button, ButtonMode, ButtonSetup};
pub use registry::ButtonRegistry;
