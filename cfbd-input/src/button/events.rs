//! Button event codes
//!
//! Button events occupy the start of the system-defined kind range.

use crate::event::EventKind;

/// Classified button state, also the kind of the event reported for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum ButtonEvent {
    /// Nothing in progress (never reported)
    Idle = 0,
    /// Button went down
    Press = EventKind::SYSTEM_START,
    /// Button released after a long press
    Release,
    /// Single short press, confirmed once the double-click window closed
    Click,
    /// Two short presses within the double-click window
    DoubleClick,
    /// Held past the long-press threshold
    LongPress,
    /// Still held after a long press (periodic, if enabled)
    LongPressHold,
}

impl ButtonEvent {
    /// Event kind carried by reported events
    pub const fn kind(self) -> EventKind {
        EventKind::from_raw(self as u32)
    }

    /// Recognize a button event from an event kind
    pub fn from_kind(kind: EventKind) -> Option<Self> {
        const PRESS: u32 = ButtonEvent::Press as u32;
        const RELEASE: u32 = ButtonEvent::Release as u32;
        const CLICK: u32 = ButtonEvent::Click as u32;
        const DOUBLE_CLICK: u32 = ButtonEvent::DoubleClick as u32;
        const LONG_PRESS: u32 = ButtonEvent::LongPress as u32;
        const LONG_PRESS_HOLD: u32 = ButtonEvent::LongPressHold as u32;

        match kind.raw() {
            0 => Some(ButtonEvent::Idle),
            PRESS => Some(ButtonEvent::Press),
            RELEASE => Some(ButtonEvent::Release),
            CLICK => Some(ButtonEvent::Click),
            DOUBLE_CLICK => Some(ButtonEvent::DoubleClick),
            LONG_PRESS => Some(ButtonEvent::LongPress),
            LONG_PRESS_HOLD => Some(ButtonEvent::LongPressHold),
            _ => None,
        }
    }

    /// Check if this event concludes a short-press gesture
    pub fn is_click(&self) -> bool {
        matches!(self, ButtonEvent::Click | ButtonEvent::DoubleClick)
    }

    /// Check if this event belongs to a long press
    pub fn is_long_press(&self) -> bool {
        matches!(
            self,
            ButtonEvent::LongPress | ButtonEvent::LongPressHold | ButtonEvent::Release
        )
    }
}

impl From<ButtonEvent> for EventKind {
    fn from(event: ButtonEvent) -> Self {
        event.kind()
    }
}
