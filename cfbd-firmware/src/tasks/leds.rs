//! LED task
//!
//! Applies toggle requests queued by the input handlers.

use cfbd_hal::OutputPin;
use cfbd_hal_rp2040::LedOutput;
use defmt::*;

use crate::channels::{Led, LED_TOGGLE};

#[embassy_executor::task]
pub async fn led_task(mut click_led: LedOutput<'static>, mut double_click_led: LedOutput<'static>) {
    info!("LED task started");

    loop {
        let led = LED_TOGGLE.receive().await;
        let pin = match led {
            Led::Click => &mut click_led,
            Led::DoubleClick => &mut double_click_led,
        };
        pin.toggle();
        debug!("{} LED now {}", led, if pin.is_set_high() { "on" } else { "off" });
    }
}
