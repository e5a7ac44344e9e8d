//! Fixed-size event ring buffer
//!
//! Classic head/tail ring with one slot always left empty, so that
//! `head == tail` means empty and `(tail + 1) % N == head` means full.
//! Usable capacity is therefore `N - 1`.

use super::record::Event;
use crate::error::InputError;

pub(crate) struct EventRing<'p, const N: usize> {
    slots: [Event<'p>; N],
    head: usize,
    tail: usize,
}

impl<'p, const N: usize> EventRing<'p, N> {
    const CAPACITY_CHECK: () = assert!(N >= 2, "event ring needs at least two slots");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_CHECK;
        Self {
            slots: [Event::INVALID; N],
            head: 0,
            tail: 0,
        }
    }

    /// Number of events that fit
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    pub fn len(&self) -> usize {
        (self.tail + N - self.head) % N
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        (self.tail + 1) % N == self.head
    }

    /// Copy `event` into the tail slot
    ///
    /// A full ring rejects the event and leaves head and tail untouched.
    pub fn push(&mut self, event: Event<'p>) -> Result<(), InputError> {
        if self.is_full() {
            return Err(InputError::QueueFull);
        }
        self.slots[self.tail] = event;
        self.tail = (self.tail + 1) % N;
        Ok(())
    }

    /// Copy of the oldest event, left in place
    pub fn peek(&self) -> Option<Event<'p>> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots[self.head])
        }
    }

    /// Retire the oldest event
    ///
    /// The slot is not cleared; it is simply reused by a later push.
    pub fn advance(&mut self) {
        if !self.is_empty() {
            self.head = (self.head + 1) % N;
        }
    }
}
