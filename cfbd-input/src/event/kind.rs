//! Event kind numbering
//!
//! ```text
//! 0            invalid
//! 0x001-0x0FF  system-defined (button events, ...)
//! 0x100-...    user-defined
//! ```

/// Event kind code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventKind(u32);

impl EventKind {
    /// Reserved invalid kind
    pub const INVALID: Self = Self(0);

    /// First system-defined kind
    pub const SYSTEM_START: u32 = 0x001;

    /// First user-defined kind
    pub const USER_START: u32 = 0x100;

    /// Kind from its raw code
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Kind from an offset into the user range
    pub const fn user(offset: u32) -> Self {
        Self(Self::USER_START.saturating_add(offset))
    }

    /// Raw code
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is the reserved invalid kind
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }

    /// Check if this kind lies in the system-defined range
    pub const fn is_system(self) -> bool {
        self.0 >= Self::SYSTEM_START && self.0 < Self::USER_START
    }

    /// Check if this kind lies in the user-defined range
    pub const fn is_user(self) -> bool {
        self.0 >= Self::USER_START
    }
}

impl From<u32> for EventKind {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<EventKind> for u32 {
    fn from(kind: EventKind) -> Self {
        kind.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_disjoint() {
        assert!(EventKind::INVALID.is_invalid());
        assert!(!EventKind::INVALID.is_system());
        assert!(!EventKind::INVALID.is_user());

        let system = EventKind::from_raw(EventKind::SYSTEM_START);
        assert!(system.is_system());
        assert!(!system.is_user());

        let last_system = EventKind::from_raw(EventKind::USER_START - 1);
        assert!(last_system.is_system());

        let user = EventKind::user(0);
        assert!(user.is_user());
        assert!(!user.is_system());
        assert_eq!(user.raw(), 0x100);
    }

    #[test]
    fn test_user_offset_saturates() {
        assert_eq!(EventKind::user(u32::MAX).raw(), u32::MAX);
    }
}
