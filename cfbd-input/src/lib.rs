//! Board-agnostic input event subsystem
//!
//! This crate turns raw input sources into semantic events and delivers
//! them to application handlers:
//!
//! - Device identity allocation and the common device base
//! - Event records and the event kind numbering scheme
//! - Event context: fixed-size ring buffer plus ordered handler chain
//! - Button state machine (press / release / click / double click /
//!   long press / long-press hold), polled or interrupt driven
//!
//! Nothing here allocates, blocks or depends on a specific chip. Hardware is
//! reached only through the `cfbd-hal` traits.
//!
//! # Data flow
//!
//! ```text
//! Button::scan ──► DeviceBase::report_once ──► EventContext::enqueue
//!                                                       │
//!                 application main loop ──► EventContext::dispatch
//!                                                       │
//!                                   handler 1 ─► handler 2 ─► ...
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod config;
pub mod device;
pub mod error;
pub mod event;

pub use button::{Button, ButtonEvent, ButtonMode, ButtonRegistry, ButtonSetup};
pub use config::{ButtonTiming, TimingError, INPUT_EVENT_QUEUE_SIZE, INPUT_MAX_HANDLER_CNT};
pub use device::{DeviceBase, DeviceId};
pub use error::InputError;
pub use event::{Event, EventContext, EventKind, Handler, InputContext, Payload};
