//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod buttons;
pub mod leds;

pub use buttons::{edge_button_task, edge_timer_task, polled_button_task};
pub use leds::led_task;
