//! RP2040 backend for the CFBD capability traits
//!
//! - [`gpio::ButtonInput`]: embassy-rp input pin as an edge-capable
//!   [`cfbd_hal::InputPin`]
//! - [`gpio::EdgeWatcher`] / [`gpio::LatchedPin`]: hand edge-interrupt pins
//!   to a button registry
//! - [`gpio::LedOutput`]: embassy-rp output pin as a [`cfbd_hal::OutputPin`]
//! - [`gpio::GpioAllocator`]: bookkeeping so two drivers never claim the
//!   same GPIO

#![no_std]

pub mod gpio;

pub use cfbd_hal::EmbassyClock;
pub use gpio::{
    ButtonInput, EdgeLatch, EdgeWatcher, GpioAllocator, LatchedPin, LedOutput, PinError,
    GPIO_COUNT,
};
