//! Button state machine
//!
//! Samples one digital pin and turns its transitions into semantic events.
//! The same per-scan routine serves both delivery modes: it is called every
//! scan tick in polling mode, and from the pin's edge interrupt (through
//! [`ButtonRegistry`](super::ButtonRegistry)) in interrupt mode.
//!
//! # Classification
//!
//! ```text
//!  press ──► PRESS
//!    │
//!    ├─ held ≥ long_press ──► LONG_PRESS ──► (LONG_PRESS_HOLD ...) ──► release ──► RELEASE
//!    │
//!    └─ released < long_press
//!          │
//!          ├─ second press within double_click ──► PRESS ──► release ──► DOUBLE_CLICK
//!          │
//!          └─ window closes ──► CLICK
//! ```
//!
//! A short release reports nothing by itself: the click stays tentative
//! until the double-click window closes or a second press upgrades it.
//!
//! The routine never blocks, allocates or loops; it only touches this
//! button's fields and the context's enqueue, so it is safe to run from an
//! interrupt handler. Debouncing is left to the scan period.

use cfbd_hal::{InputPin, Level, TickSource, Ticks};

use super::events::ButtonEvent;
use crate::config::ButtonTiming;
use crate::device::{DeviceBase, DeviceId};
use crate::error::InputError;
use crate::event::{Event, Handler, InputContext, Payload};

/// How the button gets sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonMode {
    /// Application calls [`Button::scan`] every scan tick
    #[default]
    Polling,
    /// Pin edge interrupts drive the scan
    Interrupt,
}

/// Everything needed to create a [`Button`]
pub struct ButtonSetup<'c, 'p, P> {
    /// Pin the button is wired to
    pub pin: P,
    /// Pin level that means "pressed"
    pub press_level: Level,
    /// Delivery mode
    pub mode: ButtonMode,
    /// Context the button reports into
    pub context: Option<&'c dyn InputContext<'p>>,
    /// Handler registered with the context at creation
    pub on_change: Option<Handler<'p>>,
    /// Attaches the pin's edge interrupt; called once, interrupt mode only
    pub enable_interrupt: Option<fn(&mut P)>,
    /// Data attached to every event from this button
    pub payload: Option<Payload<'p>>,
    /// Timing thresholds, checked by [`Button::new`]
    pub timing: ButtonTiming,
}

impl<'c, 'p, P> ButtonSetup<'c, 'p, P> {
    /// Polled, active-low button (pull-up wiring) with default timing
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            press_level: Level::Low,
            mode: ButtonMode::Polling,
            context: None,
            on_change: None,
            enable_interrupt: None,
            payload: None,
            timing: ButtonTiming::default(),
        }
    }

    /// Pressed when the pin reads high
    pub fn active_high(mut self) -> Self {
        self.press_level = Level::High;
        self
    }

    /// Report into `context`
    pub fn context(mut self, context: &'c dyn InputContext<'p>) -> Self {
        self.context = Some(context);
        self
    }

    /// Register `handler` with the context when the button is created
    pub fn on_change(mut self, handler: Handler<'p>) -> Self {
        self.on_change = Some(handler);
        self
    }

    /// Interrupt mode, with `enable` attaching the edge interrupt
    pub fn interrupt(mut self, enable: fn(&mut P)) -> Self {
        self.mode = ButtonMode::Interrupt;
        self.enable_interrupt = Some(enable);
        self
    }

    /// Attach `payload` to every event
    pub fn payload(mut self, payload: Payload<'p>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Use custom timing thresholds
    pub fn timing(mut self, timing: ButtonTiming) -> Self {
        self.timing = timing;
        self
    }
}

/// Debounced-by-cadence push button
pub struct Button<'c, 'p, P> {
    base: DeviceBase<'c, 'p>,
    pin: P,
    mode: ButtonMode,
    press_level: Level,
    timing: ButtonTiming,
    /// Last classified state
    state: ButtonEvent,
    press_time: Ticks,
    release_time: Ticks,
    last_click_time: Option<Ticks>,
    /// Release time of a short press still waiting for a possible second press
    click_pending_since: Option<Ticks>,
    /// Current press is the second half of a double click
    double_click_pending: bool,
    pressed: bool,
    long_press_fired: bool,
    last_hold_report: Ticks,
}

impl<'c, 'p, P: InputPin> Button<'c, 'p, P> {
    /// Create a button, registering its handler and attaching its interrupt
    ///
    /// Fails if the timing set does not pass [`ButtonTiming::validate`] or
    /// the context's handler table is full. Nothing is registered on failure.
    pub fn new(setup: ButtonSetup<'c, 'p, P>) -> Result<Self, InputError> {
        let ButtonSetup {
            pin,
            press_level,
            mode,
            context,
            on_change,
            enable_interrupt,
            payload,
            timing,
        } = setup;

        timing.validate().map_err(InputError::InvalidTiming)?;

        if let (Some(context), Some(handler)) = (context, on_change) {
            context.register_handler(handler)?;
        }

        let mut button = Self {
            base: DeviceBase::new(context, payload),
            pin,
            mode,
            press_level,
            timing,
            state: ButtonEvent::Idle,
            press_time: 0,
            release_time: 0,
            last_click_time: None,
            click_pending_since: None,
            double_click_pending: false,
            pressed: false,
            long_press_fired: false,
            last_hold_report: 0,
        };

        if mode == ButtonMode::Interrupt {
            if let Some(enable) = enable_interrupt {
                enable(&mut button.pin);
            }
        }

        Ok(button)
    }

    /// Polling-mode scan using `clock` for the timestamp
    ///
    /// Does nothing for interrupt-mode buttons.
    pub fn scan<T: TickSource + ?Sized>(&mut self, clock: &T) {
        self.scan_at(clock.now_ticks());
    }

    /// Polling-mode scan at tick `now`
    ///
    /// Does nothing for interrupt-mode buttons.
    pub fn scan_at(&mut self, now: Ticks) {
        if self.mode == ButtonMode::Polling {
            self.sample(now);
        }
    }

    /// Run the state machine once at tick `now`, whatever the mode
    pub(crate) fn sample(&mut self, now: Ticks) {
        let pressed = self.pin.read_level() == self.press_level;
        let mut reported = false;

        // Double-click window closed without a second press
        if let Some(since) = self.click_pending_since {
            if now.wrapping_sub(since) >= self.timing.double_click {
                self.click_pending_since = None;
                self.last_click_time = Some(now);
                self.emit(ButtonEvent::Click);
                reported = true;
            }
        }

        if pressed && !self.pressed {
            self.pressed = true;
            self.press_time = now;
            self.long_press_fired = false;

            if self.click_pending_since.take().is_some() {
                self.double_click_pending = true;
            }

            self.emit(ButtonEvent::Press);
            reported = true;
        } else if !pressed && self.pressed {
            self.pressed = false;
            self.release_time = now;
            let held = now.wrapping_sub(self.press_time);

            if !self.long_press_fired && held < self.timing.long_press {
                if self.double_click_pending {
                    self.double_click_pending = false;
                    self.click_pending_since = None;
                    self.last_click_time = Some(now);
                    self.emit(ButtonEvent::DoubleClick);
                    reported = true;
                } else {
                    self.state = ButtonEvent::Click;
                    self.click_pending_since = Some(now);
                }
            } else {
                self.click_pending_since = None;
                self.double_click_pending = false;
                self.emit(ButtonEvent::Release);
                reported = true;
            }
        } else if pressed {
            let held = now.wrapping_sub(self.press_time);

            if !self.long_press_fired {
                if held >= self.timing.long_press {
                    self.long_press_fired = true;
                    self.last_hold_report = now;
                    self.click_pending_since = None;
                    self.emit(ButtonEvent::LongPress);
                    reported = true;
                }
            } else {
                let repeat_due = self
                    .timing
                    .hold_repeat
                    .is_some_and(|interval| now.wrapping_sub(self.last_hold_report) >= interval);

                if repeat_due {
                    self.last_hold_report = now;
                    self.emit(ButtonEvent::LongPressHold);
                    reported = true;
                } else {
                    // Still held past the long press, reported or not
                    self.state = ButtonEvent::LongPressHold;
                }
            }
        }

        if !reported && !self.pressed && self.click_pending_since.is_none() {
            self.state = ButtonEvent::Idle;
        }
    }

    /// Record `event` as the current state and report it
    ///
    /// A full queue or missing context drops the event; the context keeps
    /// count of the former.
    fn emit(&mut self, event: ButtonEvent) {
        self.state = event;

        #[cfg(feature = "defmt")]
        defmt::debug!("button {}: {}", self.base.device_id(), event);

        let _ = self.base.report_once(Event::new(event.kind(), &self.base));
    }
}

impl<'c, 'p, P> Button<'c, 'p, P> {
    /// Device identifier
    pub fn device_id(&self) -> DeviceId {
        self.base.device_id()
    }

    /// Last classified state
    pub fn state(&self) -> ButtonEvent {
        self.state
    }

    /// Debounced physical state as of the last scan
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Delivery mode
    pub fn mode(&self) -> ButtonMode {
        self.mode
    }

    /// Timing thresholds in use
    pub fn timing(&self) -> &ButtonTiming {
        &self.timing
    }

    /// Tick of the last press edge
    pub fn press_time(&self) -> Ticks {
        self.press_time
    }

    /// Tick of the last release edge
    pub fn release_time(&self) -> Ticks {
        self.release_time
    }

    /// Tick at which the last click or double click was reported
    pub fn last_click_time(&self) -> Option<Ticks> {
        self.last_click_time
    }

    /// Check if a short press is waiting for the double-click window to close
    pub fn is_click_pending(&self) -> bool {
        self.click_pending_since.is_some()
    }

    /// Common device base
    pub fn base(&self) -> &DeviceBase<'c, 'p> {
        &self.base
    }

    /// Report into a different context from now on
    pub fn bind_context(&mut self, context: &'c dyn InputContext<'p>) {
        self.base.bind_context(context);
    }

    /// Stop reporting; events are dropped until bound again
    pub fn unbind_context(&mut self) {
        self.base.unbind_context();
    }

    /// The pin the button samples
    pub fn pin(&self) -> &P {
        &self.pin
    }
}
