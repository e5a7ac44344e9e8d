//! Buttons on pins coming from an embedded-hal 1.0 driver

use core::convert::Infallible;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cfbd_hal::EmbeddedHalPin;
use cfbd_input::{Button, ButtonEvent, ButtonRegistry, ButtonSetup, Event, EventContext};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal::digital::{ErrorType, InputPin};

thread_local! {
    static LOG: RefCell<Vec<ButtonEvent>> = const { RefCell::new(Vec::new()) };
}

fn log_button_events(event: &mut Event<'_>) -> bool {
    if let Some(button) = ButtonEvent::from_kind(event.kind()) {
        LOG.with(|log| log.borrow_mut().push(button));
    }
    true
}

fn take_log() -> Vec<ButtonEvent> {
    LOG.with(|log| log.borrow_mut().drain(..).collect())
}

/// Pull-up switch as an embedded-hal driver would expose it
struct Switch {
    high: Arc<AtomicBool>,
}

impl ErrorType for Switch {
    type Error = Infallible;
}

impl InputPin for Switch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high.load(Ordering::SeqCst))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high.load(Ordering::SeqCst))
    }
}

fn switch() -> (Switch, Arc<AtomicBool>) {
    let high = Arc::new(AtomicBool::new(true));
    (Switch { high: high.clone() }, high)
}

#[test]
fn test_polled_button_on_embedded_hal_pin() {
    let context: EventContext<'static> = EventContext::new();
    let (pin, level) = switch();
    let mut button = Button::new(
        ButtonSetup::new(EmbeddedHalPin::new(pin, 4))
            .context(&context)
            .on_change(log_button_events),
    )
    .unwrap();

    level.store(false, Ordering::SeqCst);
    button.scan_at(0);
    level.store(true, Ordering::SeqCst);
    button.scan_at(60);
    button.scan_at(360);
    context.dispatch();

    assert_eq!(take_log(), [ButtonEvent::Press, ButtonEvent::Click]);
}

#[test]
fn test_registry_routes_edges_by_adapter_pin_id() {
    fn no_irq(_pin: &mut EmbeddedHalPin<Switch>) {}

    let context: EventContext<'static> = EventContext::new();
    let registry: ButtonRegistry<'_, 'static, EmbeddedHalPin<Switch>, CriticalSectionRawMutex, 3> =
        ButtonRegistry::new();

    let (pin, level) = switch();
    let button = Button::new(
        ButtonSetup::new(EmbeddedHalPin::new(pin, 9))
            .context(&context)
            .on_change(log_button_events)
            .interrupt(no_irq),
    )
    .unwrap();
    registry.add(button).unwrap();

    level.store(false, Ordering::SeqCst);
    assert_eq!(registry.on_pin_edge(8, 0), 0);
    assert_eq!(registry.on_pin_edge(9, 0), 1);
    registry.service_timers(1000);
    context.dispatch();

    assert_eq!(take_log(), [ButtonEvent::Press, ButtonEvent::LongPress]);
}
