//! Event record
//!
//! An event says what happened and which device produced it. It is created
//! per occurrence, copied into the queue, and consumed by a single dispatch
//! pass. The only field that changes after creation is the stop flag.

use core::any::Any;

use super::kind::EventKind;
use crate::device::{DeviceBase, DeviceId};

/// Borrowed device-private data attached to events
///
/// The event never owns it; it stays valid for as long as the device's
/// payload does.
pub type Payload<'p> = &'p (dyn Any + Send + Sync);

/// One input occurrence
#[derive(Debug, Clone, Copy)]
pub struct Event<'p> {
    kind: EventKind,
    device_id: DeviceId,
    payload: Option<Payload<'p>>,
    stop_propagation: bool,
}

impl<'p> Event<'p> {
    /// Placeholder for unused queue slots
    pub const INVALID: Self = Self::from_raw_parts(EventKind::INVALID, 0, None);

    /// Build an event produced by `device`
    pub fn new(kind: EventKind, device: &DeviceBase<'_, 'p>) -> Self {
        Self::from_raw_parts(kind, device.device_id(), device.payload())
    }

    /// Build an event without going through a device base
    pub const fn from_raw_parts(
        kind: EventKind,
        device_id: DeviceId,
        payload: Option<Payload<'p>>,
    ) -> Self {
        Self {
            kind,
            device_id,
            payload,
            stop_propagation: false,
        }
    }

    /// What happened
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Who produced it
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Device-private payload
    pub fn payload(&self) -> Option<Payload<'p>> {
        self.payload
    }

    /// Payload downcast to a concrete type
    pub fn payload_as<T: Any>(&self) -> Option<&'p T> {
        self.payload.and_then(|payload| payload.downcast_ref::<T>())
    }

    /// Claim the event: handlers after the current one won't see it
    pub fn stop_propagation(&mut self) {
        self.stop_propagation = true;
    }

    /// Check if a handler has claimed the event
    pub fn is_propagation_stopped(&self) -> bool {
        self.stop_propagation
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Event<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Event(kind={}, device={}, stopped={})",
            self.kind,
            self.device_id,
            self.stop_propagation
        )
    }
}
