//! Press/release timelines driven through a dispatched context

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cfbd_hal::{EdgePin, InputPin, PinId, Ticks};
use cfbd_input::{
    Button, ButtonEvent, ButtonRegistry, ButtonSetup, ButtonTiming, Event, EventContext,
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

thread_local! {
    static LOG: RefCell<Vec<ButtonEvent>> = const { RefCell::new(Vec::new()) };
}

fn log_button_events(event: &mut Event<'_>) -> bool {
    match ButtonEvent::from_kind(event.kind()) {
        Some(button) => {
            LOG.with(|log| log.borrow_mut().push(button));
            true
        }
        None => false,
    }
}

/// Active-low pin on a shared level flag
struct TestPin {
    id: PinId,
    high: Arc<AtomicBool>,
}

impl InputPin for TestPin {
    fn is_high(&mut self) -> bool {
        self.high.load(Ordering::SeqCst)
    }
}

impl EdgePin for TestPin {
    fn pin_id(&self) -> PinId {
        self.id
    }
}

/// One polled button, its context, and the events seen at each tick
struct Bench {
    context: &'static EventContext<'static>,
    button: Button<'static, 'static, TestPin>,
    level: Arc<AtomicBool>,
    timeline: Vec<(Ticks, ButtonEvent)>,
}

impl Bench {
    fn new(timing: ButtonTiming) -> Self {
        let context: &'static EventContext<'static> = Box::leak(Box::new(EventContext::new()));
        let level = Arc::new(AtomicBool::new(true));
        let pin = TestPin {
            id: 14,
            high: level.clone(),
        };
        let button = Button::new(
            ButtonSetup::new(pin)
                .context(context)
                .on_change(log_button_events)
                .timing(timing),
        )
        .unwrap();

        Self {
            context,
            button,
            level,
            timeline: Vec::new(),
        }
    }

    /// Set the contact state, scan at `now` and dispatch
    fn at(&mut self, now: Ticks, pressed: bool) {
        self.level.store(!pressed, Ordering::SeqCst);
        self.button.scan_at(now);
        self.context.dispatch();
        let seen: Vec<ButtonEvent> = LOG.with(|log| log.borrow_mut().drain(..).collect());
        self.timeline.extend(seen.into_iter().map(|event| (now, event)));
    }

    /// Scan every 10 ticks over `from..to` keeping the contact state
    fn hold(&mut self, from: Ticks, to: Ticks, pressed: bool) {
        for now in (from..to).step_by(10) {
            self.at(now, pressed);
        }
    }
}

#[test]
fn test_single_tap_confirms_after_window() {
    let mut bench = Bench::new(ButtonTiming::default());

    bench.at(0, true);
    bench.hold(10, 50, true);
    bench.at(50, false);
    bench.hold(60, 600, false);

    assert_eq!(
        bench.timeline,
        [(0, ButtonEvent::Press), (350, ButtonEvent::Click)]
    );
    assert_eq!(bench.button.state(), ButtonEvent::Idle);
}

#[test]
fn test_double_tap_reports_one_double_click() {
    let mut bench = Bench::new(ButtonTiming::default());

    bench.at(0, true);
    bench.at(50, false);
    bench.hold(60, 100, false);
    bench.at(100, true);
    bench.at(150, false);
    bench.hold(160, 1000, false);

    assert_eq!(
        bench.timeline,
        [
            (0, ButtonEvent::Press),
            (100, ButtonEvent::Press),
            (150, ButtonEvent::DoubleClick),
        ]
    );
}

#[test]
fn test_long_press_then_release() {
    let mut bench = Bench::new(ButtonTiming::default());

    bench.at(0, true);
    bench.hold(10, 1500, true);
    bench.at(1500, false);
    bench.hold(1510, 2000, false);

    assert_eq!(
        bench.timeline,
        [
            (0, ButtonEvent::Press),
            (1000, ButtonEvent::LongPress),
            (1500, ButtonEvent::Release),
        ]
    );
}

#[test]
fn test_long_press_hold_repeat_when_enabled() {
    let timing = ButtonTiming::default().with_hold_repeat(250);
    assert!(timing.validate().is_ok());
    let mut bench = Bench::new(timing);

    bench.at(0, true);
    bench.hold(10, 1600, true);
    bench.at(1600, false);

    assert_eq!(
        bench.timeline,
        [
            (0, ButtonEvent::Press),
            (1000, ButtonEvent::LongPress),
            (1250, ButtonEvent::LongPressHold),
            (1500, ButtonEvent::LongPressHold),
            (1600, ButtonEvent::Release),
        ]
    );
}

#[test]
fn test_custom_timing() {
    let timing = ButtonTiming {
        debounce: 5,
        long_press: 400,
        double_click: 100,
        hold_repeat: None,
    };
    assert!(timing.validate().is_ok());
    let mut bench = Bench::new(timing);

    bench.at(0, true);
    bench.at(30, false);
    bench.hold(40, 200, false);
    bench.at(200, true);
    bench.hold(210, 700, true);

    assert_eq!(
        bench.timeline,
        [
            (0, ButtonEvent::Press),
            (130, ButtonEvent::Click),
            (200, ButtonEvent::Press),
            (600, ButtonEvent::LongPress),
        ]
    );
}

#[test]
fn test_polled_and_interrupt_buttons_share_a_context() {
    static CONTEXT: EventContext<'static> = EventContext::new();
    static REGISTRY: ButtonRegistry<'static, 'static, TestPin> = ButtonRegistry::new();

    CONTEXT.register_handler(log_button_events).unwrap();

    let polled_level = Arc::new(AtomicBool::new(true));
    let mut polled = Button::new(
        ButtonSetup::new(TestPin {
            id: 14,
            high: polled_level.clone(),
        })
        .context(&CONTEXT),
    )
    .unwrap();

    fn attach(_pin: &mut TestPin) {}

    let edge_level = Arc::new(AtomicBool::new(true));
    let interrupt = Button::new(
        ButtonSetup::new(TestPin {
            id: 15,
            high: edge_level.clone(),
        })
        .context(&CONTEXT)
        .interrupt(attach),
    )
    .unwrap();
    let interrupt_id = interrupt.device_id();
    REGISTRY.add(interrupt).unwrap();
    assert_ne!(polled.device_id(), interrupt_id);

    // Polled button pressed first, interrupt button second
    polled_level.store(false, Ordering::SeqCst);
    polled.scan_at(0);
    edge_level.store(false, Ordering::SeqCst);
    assert_eq!(REGISTRY.on_pin_edge(15, 5), 1);

    polled_level.store(true, Ordering::SeqCst);
    polled.scan_at(40);
    edge_level.store(true, Ordering::SeqCst);
    REGISTRY.on_pin_edge(15, 45);

    polled.scan_at(340);
    REGISTRY.service_timers(345);

    assert_eq!(CONTEXT.dispatch(), 4);
    let seen: Vec<ButtonEvent> = LOG.with(|log| log.borrow_mut().drain(..).collect());
    assert_eq!(
        seen,
        [
            ButtonEvent::Press,
            ButtonEvent::Press,
            ButtonEvent::Click,
            ButtonEvent::Click,
        ]
    );
}

#[test]
fn test_full_queue_drops_button_events() {
    let context: &'static EventContext<'static, CriticalSectionRawMutex, 3> =
        Box::leak(Box::new(EventContext::new()));
    let level = Arc::new(AtomicBool::new(true));
    let mut button = Button::new(
        ButtonSetup::new(TestPin {
            id: 1,
            high: level.clone(),
        })
        .context(context),
    )
    .unwrap();

    // Two slots usable: press, long press fit; release is dropped
    level.store(false, Ordering::SeqCst);
    button.scan_at(0);
    button.scan_at(1000);
    level.store(true, Ordering::SeqCst);
    button.scan_at(1100);

    assert_eq!(context.len(), 2);
    assert_eq!(context.dropped_events(), 1);
    assert_eq!(button.state(), ButtonEvent::Release);
}
