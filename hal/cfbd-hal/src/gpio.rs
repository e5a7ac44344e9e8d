//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs. Only reading is required by the input framework;
//! configuring a pin is the backend's business.

/// Identifier the platform uses for a pin in edge-interrupt notifications
///
/// On STM32 this is the EXTI line mask, on RP2040 the GPIO number.
pub type PinId = u16;

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Level corresponding to a boolean pin reading (true = high)
    pub const fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Check if this is the high level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Drive the pin to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
///
/// Takes `&mut self` because some HALs need mutable access to sample a pin
/// (embedded-hal 1.0 among them).
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }

    /// Sample the pin as a [`Level`]
    fn read_level(&mut self) -> Level {
        Level::from_high(self.is_high())
    }
}

/// Input pin that the platform can report edge interrupts for
///
/// The shared edge-interrupt vector only tells us *which* pin changed;
/// [`EdgePin::pin_id`] lets the input layer find the devices watching it.
pub trait EdgePin: InputPin {
    /// Platform identifier of this pin
    fn pin_id(&self) -> PinId;
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        T::is_high(self)
    }
}

impl<T: EdgePin + ?Sized> EdgePin for &mut T {
    fn pin_id(&self) -> PinId {
        T::pin_id(self)
    }
}

/// Adapter exposing any embedded-hal 1.0 digital input as an [`InputPin`]
///
/// A read error is reported as [`Level::Low`]; GPIO reads on the supported
/// chips are infallible, so this only matters for port expanders.
#[cfg(feature = "embedded-hal")]
pub struct EmbeddedHalPin<P> {
    pin: P,
    id: PinId,
}

#[cfg(feature = "embedded-hal")]
impl<P: embedded_hal::digital::InputPin> EmbeddedHalPin<P> {
    /// Wrap an embedded-hal pin, tagging it with the platform pin identifier
    pub fn new(pin: P, id: PinId) -> Self {
        Self { pin, id }
    }

    /// Give back the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

#[cfg(feature = "embedded-hal")]
impl<P: embedded_hal::digital::InputPin> InputPin for EmbeddedHalPin<P> {
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or(false)
    }
}

#[cfg(feature = "embedded-hal")]
impl<P: embedded_hal::digital::InputPin> EdgePin for EmbeddedHalPin<P> {
    fn pin_id(&self) -> PinId {
        self.id
    }
}
