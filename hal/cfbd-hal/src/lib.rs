//! CFBD Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the input framework calls
//! into. Chip-specific crates (RP2040, STM32, ...) implement them so that the
//! same application and input code runs on different hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (cfbd-firmware, etc.)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cfbd-input (events, buttons)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cfbd-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ cfbd-hal-     │       │ embedded-hal  │
//! │   rp2040      │       │   adapter     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::OutputPin`] - Digital I/O
//! - [`gpio::EdgePin`] - Input pin with a stable identity for edge interrupts
//! - [`time::TickSource`] - Monotonic tick counter

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{EdgePin, InputPin, Level, OutputPin, PinId};
pub use time::{TickSource, Ticks};

#[cfg(feature = "embedded-hal")]
pub use gpio::EmbeddedHalPin;
#[cfg(feature = "embassy-time")]
pub use time::EmbassyClock;
