//! Monotonic tick source
//!
//! All input timing (debounce, long press, double click) is expressed in
//! ticks of an externally supplied counter. The unit is up to the platform;
//! milliseconds is the usual choice.

/// Tick counter value
///
/// Wraps around at `u32::MAX`; consumers compare timestamps with
/// wrapping subtraction.
pub type Ticks = u32;

/// Monotonic tick counter
pub trait TickSource {
    /// Current tick count
    fn now_ticks(&self) -> Ticks;
}

/// Plain functions work as tick sources (e.g. a SysTick counter reader)
impl TickSource for fn() -> Ticks {
    fn now_ticks(&self) -> Ticks {
        self()
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now_ticks(&self) -> Ticks {
        T::now_ticks(self)
    }
}

/// Millisecond tick source backed by the embassy-time driver
#[cfg(feature = "embassy-time")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl TickSource for EmbassyClock {
    fn now_ticks(&self) -> Ticks {
        // Truncation gives the wrapping counter the input layer expects
        embassy_time::Instant::now().as_millis() as Ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_clock() -> Ticks {
        1234
    }

    #[test]
    fn test_fn_tick_source() {
        let clock: fn() -> Ticks = fixed_clock;
        assert_eq!(clock.now_ticks(), 1234);
        assert_eq!((&clock).now_ticks(), 1234);
    }
}
