//! Interrupt-mode button registry
//!
//! Chips usually share one edge-interrupt vector between many pins. The
//! registry owns the interrupt-driven buttons and routes an edge on a pin to
//! the button(s) wired to it, running the same per-scan routine a polled
//! button runs on its tick.
//!
//! An edge only tells the state machine that the level changed. Timeouts
//! (double-click window, long-press threshold, hold repeat) resolve on a
//! later scan, so the application also calls
//! [`service_timers`](ButtonRegistry::service_timers) periodically.

use core::cell::RefCell;

use cfbd_hal::{EdgePin, PinId, Ticks};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;

use super::machine::{Button, ButtonMode};
use crate::config::MAX_INTERRUPT_BUTTONS;
use crate::error::InputError;

/// Owner of the interrupt-driven buttons, indexed by pin
pub struct ButtonRegistry<
    'c,
    'p,
    P,
    M: RawMutex = CriticalSectionRawMutex,
    const N: usize = MAX_INTERRUPT_BUTTONS,
> {
    buttons: Mutex<M, RefCell<Vec<Button<'c, 'p, P>, N>>>,
}

impl<'c, 'p, P, M: RawMutex, const N: usize> Default for ButtonRegistry<'c, 'p, P, M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c, 'p, P, M: RawMutex, const N: usize> ButtonRegistry<'c, 'p, P, M, N> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            buttons: Mutex::new(RefCell::new(Vec::new())),
        }
    }

    /// Number of registered buttons
    pub fn len(&self) -> usize {
        self.buttons.lock(|buttons| buttons.borrow().len())
    }

    /// Check if no buttons are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of buttons
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Take ownership of `button`
    ///
    /// Fails with [`InputError::RegistryFull`] when all slots are taken; the
    /// button is dropped in that case.
    pub fn add(&self, button: Button<'c, 'p, P>) -> Result<(), InputError> {
        self.buttons.lock(|buttons| {
            buttons
                .borrow_mut()
                .push(button)
                .map_err(|_| InputError::RegistryFull)
        })
    }
}

impl<'c, 'p, P: EdgePin, M: RawMutex, const N: usize> ButtonRegistry<'c, 'p, P, M, N> {
    /// Handle an edge interrupt on `pin` at tick `now`
    ///
    /// Runs the state machine of every interrupt-mode button on that pin and
    /// returns how many were scanned. Safe to call from the interrupt
    /// handler itself.
    pub fn on_pin_edge(&self, pin: PinId, now: Ticks) -> usize {
        self.buttons.lock(|buttons| {
            let mut buttons = buttons.borrow_mut();
            let mut scanned = 0;
            for button in buttons
                .iter_mut()
                .filter(|b| b.mode() == ButtonMode::Interrupt && b.pin().pin_id() == pin)
            {
                button.sample(now);
                scanned += 1;
            }

            #[cfg(feature = "defmt")]
            if scanned == 0 {
                defmt::trace!("edge on pin {} matched no button", pin);
            }

            scanned
        })
    }

    /// Resolve time-based transitions of every interrupt-mode button
    ///
    /// Reports pending clicks, long presses and hold repeats that would
    /// otherwise wait for the next edge.
    pub fn service_timers(&self, now: Ticks) {
        self.buttons.lock(|buttons| {
            for button in buttons
                .borrow_mut()
                .iter_mut()
                .filter(|b| b.mode() == ButtonMode::Interrupt)
            {
                button.sample(now);
            }
        })
    }

    /// Run `f` on the first button wired to `pin`
    ///
    /// `f` runs with the registry locked and must not call back into it.
    pub fn with_button<R>(
        &self,
        pin: PinId,
        f: impl FnOnce(&mut Button<'c, 'p, P>) -> R,
    ) -> Option<R> {
        self.buttons.lock(|buttons| {
            buttons
                .borrow_mut()
                .iter_mut()
                .find(|b| b.pin().pin_id() == pin)
                .map(f)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{ButtonEvent, ButtonSetup};
    use crate::event::{Event, EventContext};
    use cfbd_hal::InputPin;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::vec::Vec as StdVec;

    struct MockPin {
        id: PinId,
        high: Arc<AtomicBool>,
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> bool {
            self.high.load(Ordering::SeqCst)
        }
    }

    impl EdgePin for MockPin {
        fn pin_id(&self) -> PinId {
            self.id
        }
    }

    fn attach(_pin: &mut MockPin) {}

    fn button<'c>(
        context: &'c EventContext<'static>,
        id: PinId,
        mode: ButtonMode,
    ) -> (Button<'c, 'static, MockPin>, Arc<AtomicBool>) {
        let high = Arc::new(AtomicBool::new(true));
        let pin = MockPin {
            id,
            high: high.clone(),
        };
        let setup = ButtonSetup::new(pin).context(context);
        let setup = match mode {
            ButtonMode::Interrupt => setup.interrupt(attach),
            ButtonMode::Polling => setup,
        };
        (Button::new(setup).unwrap(), high)
    }

    fn drain(context: &EventContext<'_>) -> StdVec<ButtonEvent> {
        std::thread_local! {
            static EVENTS: std::cell::RefCell<StdVec<ButtonEvent>> = const { std::cell::RefCell::new(StdVec::new()) };
        }

        fn collect(event: &mut Event<'_>) -> bool {
            if let Some(button) = ButtonEvent::from_kind(event.kind()) {
                EVENTS.with(|events| events.borrow_mut().push(button));
            }
            true
        }

        context.register_handler(collect).unwrap();
        context.dispatch();
        context.unregister_handler(collect);
        EVENTS.with(|events| events.borrow_mut().drain(..).collect())
    }

    #[test]
    fn test_edge_routes_by_pin() {
        let context: EventContext<'static> = EventContext::new();
        let registry: ButtonRegistry<'_, 'static, MockPin> = ButtonRegistry::new();

        let (a, a_level) = button(&context, 14, ButtonMode::Interrupt);
        let (b, _b_level) = button(&context, 15, ButtonMode::Interrupt);
        registry.add(a).unwrap();
        registry.add(b).unwrap();

        a_level.store(false, Ordering::SeqCst);
        assert_eq!(registry.on_pin_edge(14, 0), 1);
        assert_eq!(registry.with_button(14, |b| b.is_pressed()), Some(true));
        assert_eq!(registry.with_button(15, |b| b.is_pressed()), Some(false));
        assert_eq!(drain(&context), [ButtonEvent::Press]);

        assert_eq!(registry.on_pin_edge(3, 10), 0);
        assert_eq!(registry.with_button(3, |b| b.device_id()), None);
    }

    #[test]
    fn test_polled_buttons_ignore_edges() {
        let context: EventContext<'static> = EventContext::new();
        let registry: ButtonRegistry<'_, 'static, MockPin> = ButtonRegistry::new();

        let (polled, level) = button(&context, 14, ButtonMode::Polling);
        registry.add(polled).unwrap();

        level.store(false, Ordering::SeqCst);
        assert_eq!(registry.on_pin_edge(14, 0), 0);
        registry.service_timers(10);
        assert!(context.is_empty());
    }

    #[test]
    fn test_service_timers_confirms_click() {
        let context: EventContext<'static> = EventContext::new();
        let registry: ButtonRegistry<'_, 'static, MockPin> = ButtonRegistry::new();

        let (interrupt, level) = button(&context, 15, ButtonMode::Interrupt);
        registry.add(interrupt).unwrap();

        level.store(false, Ordering::SeqCst);
        registry.on_pin_edge(15, 0);
        level.store(true, Ordering::SeqCst);
        registry.on_pin_edge(15, 50);
        assert_eq!(drain(&context), [ButtonEvent::Press]);

        // No further edge: only the timer resolves the pending click
        registry.service_timers(200);
        assert!(context.is_empty());
        registry.service_timers(350);
        assert_eq!(drain(&context), [ButtonEvent::Click]);
    }

    #[test]
    fn test_service_timers_fires_long_press() {
        let context: EventContext<'static> = EventContext::new();
        let registry: ButtonRegistry<'_, 'static, MockPin> = ButtonRegistry::new();

        let (interrupt, level) = button(&context, 15, ButtonMode::Interrupt);
        registry.add(interrupt).unwrap();

        level.store(false, Ordering::SeqCst);
        registry.on_pin_edge(15, 0);
        registry.service_timers(1000);
        level.store(true, Ordering::SeqCst);
        registry.on_pin_edge(15, 1200);

        assert_eq!(
            drain(&context),
            [ButtonEvent::Press, ButtonEvent::LongPress, ButtonEvent::Release]
        );
    }

    #[test]
    fn test_registry_full() {
        let context: EventContext<'static> = EventContext::new();
        let registry: ButtonRegistry<'_, 'static, MockPin, CriticalSectionRawMutex, 1> =
            ButtonRegistry::new();

        let (first, _) = button(&context, 1, ButtonMode::Interrupt);
        let (second, _) = button(&context, 2, ButtonMode::Interrupt);
        assert!(registry.add(first).is_ok());
        assert_eq!(registry.add(second), Err(InputError::RegistryFull));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.capacity(), 1);
    }
}
