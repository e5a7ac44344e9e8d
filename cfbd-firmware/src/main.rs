//! CFBD input demo firmware
//!
//! Two buttons report into one event context:
//!
//! - GPIO14, polled every debounce interval
//! - GPIO15, driven by its edge interrupt through a button registry
//!
//! A click on either button toggles the LED on GPIO16, a double click the
//! LED on GPIO17.

#![no_std]
#![no_main]

use cfbd_hal::EdgePin;
use cfbd_hal_rp2040::{ButtonInput, EdgeWatcher, GpioAllocator, LatchedPin, LedOutput};
use cfbd_input::{Button, ButtonEvent, ButtonSetup, ButtonTiming, Event};
use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use crate::channels::{Led, EDGE_BUTTONS, EDGE_LATCH, INPUT, LED_TOGGLE};

mod channels;
mod tasks;

/// Dispatch period of the main loop, in milliseconds
const DISPATCH_INTERVAL_MS: u64 = 5;

const POLLED_BUTTON_GPIO: u8 = 14;
const EDGE_BUTTON_GPIO: u8 = 15;
const CLICK_LED_GPIO: u8 = 16;
const DOUBLE_CLICK_LED_GPIO: u8 = 17;

static POLLED_NAME: &str = "GPIO14 (polled)";
static EDGE_NAME: &str = "GPIO15 (interrupt)";

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("CFBD input demo starting...");

    let p = embassy_rp::init(Default::default());

    let mut gpio = GpioAllocator::new();
    for pin in [
        POLLED_BUTTON_GPIO,
        EDGE_BUTTON_GPIO,
        CLICK_LED_GPIO,
        DOUBLE_CLICK_LED_GPIO,
    ] {
        unwrap!(gpio.claim(pin));
    }
    info!("{} GPIOs claimed", gpio.claimed_count());

    // Button::new rejects an inconsistent timing set
    let timing = ButtonTiming::default();

    // Polled button: scanned by its own task
    let polled = unwrap!(Button::new(
        ButtonSetup::new(ButtonInput::pull_up(p.PIN_14))
            .context(&INPUT)
            .on_change(on_button)
            .payload(&POLLED_NAME)
            .timing(timing),
    ));

    // Interrupt button: owned by the registry, fed by the edge task
    let watcher = EdgeWatcher::new(ButtonInput::pull_up(p.PIN_15), &EDGE_LATCH);
    let edge = unwrap!(Button::new(
        ButtonSetup::new(watcher.latched_pin())
            .context(&INPUT)
            .on_change(on_button)
            .payload(&EDGE_NAME)
            .interrupt(arm_edge_interrupt)
            .timing(timing),
    ));
    unwrap!(EDGE_BUTTONS.add(edge));

    let click_led = LedOutput::new(p.PIN_16);
    let double_click_led = LedOutput::new(p.PIN_17);

    spawner.spawn(tasks::led_task(click_led, double_click_led)).unwrap();
    spawner.spawn(tasks::polled_button_task(polled)).unwrap();
    spawner.spawn(tasks::edge_button_task(watcher)).unwrap();
    spawner.spawn(tasks::edge_timer_task()).unwrap();

    info!("All tasks spawned, dispatching input events");

    let mut ticker = Ticker::every(Duration::from_millis(DISPATCH_INTERVAL_MS));
    let mut dropped = 0;
    loop {
        ticker.next().await;
        INPUT.dispatch();

        let now_dropped = INPUT.dropped_events();
        if now_dropped != dropped {
            warn!("{} input events dropped so far", now_dropped);
            dropped = now_dropped;
        }
    }
}

/// Edge interrupts are armed by the edge task waiting on the pin
fn arm_edge_interrupt(pin: &mut LatchedPin) {
    info!("Edge interrupt armed on GPIO{}", pin.pin_id());
}

/// Shared handler for both buttons
fn on_button(event: &mut Event<'static>) -> bool {
    let Some(button) = ButtonEvent::from_kind(event.kind()) else {
        return true;
    };
    let source = event.payload_as::<&'static str>().copied().unwrap_or("?");
    debug!("{}: {}", source, button);

    let led = match button {
        ButtonEvent::Click => Led::Click,
        ButtonEvent::DoubleClick => Led::DoubleClick,
        _ => return true,
    };

    // Handlers must not block; a full channel means the LED task is behind
    if LED_TOGGLE.try_send(led).is_err() {
        warn!("LED queue full, {} toggle lost", led);
        return false;
    }
    event.stop_propagation();
    true
}
