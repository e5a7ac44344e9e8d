//! Button scanning tasks
//!
//! - GPIO14 is polled every debounce interval
//! - GPIO15 is interrupt driven: its edges run the registry, and a timer
//!   resolves clicks and long presses that no further edge would report

use cfbd_hal::TickSource;
use cfbd_hal_rp2040::{ButtonInput, EdgeWatcher, EmbassyClock};
use cfbd_input::config::DEBOUNCE_TICKS;
use cfbd_input::Button;
use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::EDGE_BUTTONS;

/// Timer period for the interrupt-driven buttons, in milliseconds
pub const EDGE_TIMER_MS: u64 = 10;

/// Scan a polled button at the debounce cadence
#[embassy_executor::task]
pub async fn polled_button_task(mut button: Button<'static, 'static, ButtonInput<'static>>) {
    info!("Polled button task started (device {})", button.device_id());

    let mut ticker = Ticker::every(Duration::from_millis(DEBOUNCE_TICKS as u64));
    loop {
        ticker.next().await;
        button.scan(&EmbassyClock);
    }
}

/// Feed pin edges to the interrupt-driven buttons
#[embassy_executor::task]
pub async fn edge_button_task(mut watcher: EdgeWatcher<'static>) {
    info!("Edge button task started");

    loop {
        let pin = watcher.next_edge().await;
        let scanned = EDGE_BUTTONS.on_pin_edge(pin, EmbassyClock.now_ticks());
        if scanned == 0 {
            warn!("edge on GPIO{} with no button registered", pin);
        }
    }
}

/// Resolve the time-based transitions of the interrupt-driven buttons
#[embassy_executor::task]
pub async fn edge_timer_task() {
    info!("Edge timer task started");

    let mut ticker = Ticker::every(Duration::from_millis(EDGE_TIMER_MS));
    loop {
        ticker.next().await;
        EDGE_BUTTONS.service_timers(EmbassyClock.now_ticks());
    }
}
