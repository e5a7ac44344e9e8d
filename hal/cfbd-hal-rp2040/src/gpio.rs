//! GPIO backend
//!
//! Wraps embassy-rp pins so the input layer can read them and route their
//! edge interrupts, and tracks which GPIOs are in use to prevent conflicts.

use cfbd_hal::{EdgePin, InputPin, OutputPin, PinId};
use embassy_rp::gpio::{Input, Output, Pin, Pull};
use embassy_rp::Peri;
use heapless::FnvIndexSet;
use portable_atomic::{AtomicBool, Ordering};

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when claiming a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already claimed by another driver
    AlreadyClaimed,
}

/// GPIO bookkeeping
pub struct GpioAllocator {
    claimed: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    pub fn new() -> Self {
        Self {
            claimed: FnvIndexSet::new(),
        }
    }

    /// Claim a GPIO for exclusive use
    pub fn claim(&mut self, pin: u8) -> Result<(), PinError> {
        if pin as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        match self.claimed.insert(pin) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PinError::AlreadyClaimed),
            // Capacity exceeds GPIO_COUNT, so the set never fills up
            Err(_) => Err(PinError::InvalidPin),
        }
    }

    /// Give a GPIO back
    pub fn release(&mut self, pin: u8) {
        self.claimed.remove(&pin);
    }

    pub fn is_claimed(&self, pin: u8) -> bool {
        self.claimed.contains(&pin)
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }
}

/// Button input on an RP2040 GPIO
///
/// On the RP2040 all GPIO edges arrive through the shared `IO_IRQ_BANK0`
/// vector; the pin number is the identifier used to route them.
pub struct ButtonInput<'d> {
    input: Input<'d>,
    id: PinId,
}

impl<'d> ButtonInput<'d> {
    /// Configure `pin` as an input with the given pull
    pub fn new(pin: Peri<'d, impl Pin>, pull: Pull) -> Self {
        let id = PinId::from(pin.pin());
        Self {
            input: Input::new(pin, pull),
            id,
        }
    }

    /// Active-low wiring: switch to ground, internal pull-up
    pub fn pull_up(pin: Peri<'d, impl Pin>) -> Self {
        Self::new(pin, Pull::Up)
    }

    /// Wait for the next rising or falling edge
    ///
    /// The embassy-rp GPIO interrupt handler wakes this future; running the
    /// state machine right after it stands in for a per-pin ISR callback.
    pub async fn wait_for_any_edge(&mut self) {
        self.input.wait_for_any_edge().await;
    }
}

impl InputPin for ButtonInput<'_> {
    fn is_high(&mut self) -> bool {
        self.input.is_high()
    }
}

impl EdgePin for ButtonInput<'_> {
    fn pin_id(&self) -> PinId {
        self.id
    }
}

/// Level of an edge-watched pin, latched when the edge arrived
///
/// Shared between the [`EdgeWatcher`] that owns the hardware pin and the
/// [`LatchedPin`] a button registry samples.
pub struct EdgeLatch {
    high: AtomicBool,
}

impl EdgeLatch {
    /// Latch starting at `high` (true for a released pull-up button)
    pub const fn new(high: bool) -> Self {
        Self {
            high: AtomicBool::new(high),
        }
    }

    fn store(&self, high: bool) {
        self.high.store(high, Ordering::Release);
    }

    fn load(&self) -> bool {
        self.high.load(Ordering::Acquire)
    }
}

/// Owner of an edge-interrupt pin
///
/// Waits for edges and latches the level the pin settled at, so the button
/// state machine can run under the registry lock without holding the
/// hardware pin.
pub struct EdgeWatcher<'d> {
    input: ButtonInput<'d>,
    latch: &'static EdgeLatch,
}

impl<'d> EdgeWatcher<'d> {
    pub fn new(mut input: ButtonInput<'d>, latch: &'static EdgeLatch) -> Self {
        latch.store(input.is_high());
        Self { input, latch }
    }

    /// Registry-side view of this pin
    pub fn latched_pin(&self) -> LatchedPin {
        LatchedPin {
            id: self.input.pin_id(),
            latch: self.latch,
        }
    }

    /// Wait for the next edge, latch the new level and return the pin
    pub async fn next_edge(&mut self) -> PinId {
        self.input.wait_for_any_edge().await;
        self.latch.store(self.input.is_high());
        self.input.pin_id()
    }
}

/// Input pin reading the level latched by an [`EdgeWatcher`]
pub struct LatchedPin {
    id: PinId,
    latch: &'static EdgeLatch,
}

impl InputPin for LatchedPin {
    fn is_high(&mut self) -> bool {
        self.latch.load()
    }
}

impl EdgePin for LatchedPin {
    fn pin_id(&self) -> PinId {
        self.id
    }
}

/// LED (or any push-pull output) on an RP2040 GPIO
pub struct LedOutput<'d> {
    output: Output<'d>,
}

impl<'d> LedOutput<'d> {
    /// Configure `pin` as an output, initially off
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            output: Output::new(pin, embassy_rp::gpio::Level::Low),
        }
    }
}

impl OutputPin for LedOutput<'_> {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn toggle(&mut self) {
        self.output.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}
