//! Common input device base
//!
//! Every concrete input source embeds a [`DeviceBase`]: its identity, the
//! event context it reports into, and an optional payload reference that is
//! attached to every event it produces.

use super::id::{next_device_id, DeviceId, DeviceIdGenerator};
use crate::error::InputError;
use crate::event::{Event, EventKind, InputContext, Payload};

/// Identity and context binding shared by all input devices
///
/// `'c` is the lifetime of the bound context, `'p` the lifetime of the
/// payload (and of the events flowing through the context).
#[derive(Clone, Copy)]
pub struct DeviceBase<'c, 'p> {
    device_id: DeviceId,
    context: Option<&'c dyn InputContext<'p>>,
    payload: Option<Payload<'p>>,
}

impl<'c, 'p> DeviceBase<'c, 'p> {
    /// Create a device base with an ID from the process-wide generator
    ///
    /// An unbound base (`context == None`) drops its reports until it is
    /// bound with [`DeviceBase::bind_context`].
    pub fn new(context: Option<&'c dyn InputContext<'p>>, payload: Option<Payload<'p>>) -> Self {
        Self::from_parts(next_device_id(), context, payload)
    }

    /// Create a device base with an ID from an explicit generator
    pub fn with_generator(
        generator: &dyn DeviceIdGenerator,
        context: Option<&'c dyn InputContext<'p>>,
        payload: Option<Payload<'p>>,
    ) -> Self {
        Self::from_parts(generator.next_id(), context, payload)
    }

    fn from_parts(
        device_id: DeviceId,
        context: Option<&'c dyn InputContext<'p>>,
        payload: Option<Payload<'p>>,
    ) -> Self {
        Self {
            device_id,
            context,
            payload,
        }
    }

    /// Device identifier
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Payload attached to this device's events
    pub fn payload(&self) -> Option<Payload<'p>> {
        self.payload
    }

    /// Currently bound context
    pub fn context(&self) -> Option<&'c dyn InputContext<'p>> {
        self.context
    }

    /// Check if the device is bound to a context
    pub fn is_bound(&self) -> bool {
        self.context.is_some()
    }

    /// Bind to a new context
    ///
    /// Events already queued in the previous context stay there.
    pub fn bind_context(&mut self, context: &'c dyn InputContext<'p>) {
        self.context = Some(context);
    }

    /// Detach from the current context
    pub fn unbind_context(&mut self) {
        self.context = None;
    }

    /// Enqueue one event into the bound context
    pub fn report_once(&self, event: Event<'p>) -> Result<(), InputError> {
        match self.context {
            Some(context) => context.enqueue(event),
            None => Err(InputError::Unbound),
        }
    }

    /// Build an event of `kind` from this device and report it
    pub fn report(&self, kind: EventKind) -> Result<(), InputError> {
        self.report_once(Event::new(kind, self))
    }
}

impl core::fmt::Debug for DeviceBase<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceBase")
            .field("device_id", &self.device_id)
            .field("bound", &self.is_bound())
            .field("payload", &self.payload)
            .finish()
    }
}
