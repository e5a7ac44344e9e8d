//! Device identity allocation
//!
//! Every input device gets an ID once, when its base is created. The ID comes
//! from a pluggable generator: a process-wide counter by default, or whatever
//! the application installs with [`set_device_id_generator`] before creating
//! its devices.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicU32, Ordering};

/// Opaque device identifier, unique per run
pub type DeviceId = u32;

/// Source of device identifiers
///
/// Implementations must never hand out the same ID twice while both
/// devices are alive.
pub trait DeviceIdGenerator: Sync {
    /// Allocate the next identifier
    fn next_id(&self) -> DeviceId;
}

/// Monotonic counter generator
#[derive(Debug)]
pub struct CounterIdGenerator {
    next: AtomicU32,
}

impl Default for CounterIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterIdGenerator {
    /// Counter starting at 0
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Counter starting at `first`
    pub const fn starting_at(first: DeviceId) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }
}

impl DeviceIdGenerator for CounterIdGenerator {
    fn next_id(&self) -> DeviceId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Plain functions can act as generators
impl DeviceIdGenerator for fn() -> DeviceId {
    fn next_id(&self) -> DeviceId {
        self()
    }
}

static DEFAULT_GENERATOR: CounterIdGenerator = CounterIdGenerator::new();

static INSTALLED_GENERATOR: Mutex<
    CriticalSectionRawMutex,
    Cell<Option<&'static dyn DeviceIdGenerator>>,
> = Mutex::new(Cell::new(None));

/// Install the process-wide generator
///
/// Only devices created afterwards use it. IDs from the previous generator
/// are not reconciled with the new one, so install it before creating any
/// device if uniqueness across both matters.
pub fn set_device_id_generator(generator: &'static dyn DeviceIdGenerator) {
    INSTALLED_GENERATOR.lock(|installed| installed.set(Some(generator)));
}

/// Allocate an ID from the process-wide generator
pub fn next_device_id() -> DeviceId {
    let installed = INSTALLED_GENERATOR.lock(|installed| installed.get());
    match installed {
        Some(generator) => generator.next_id(),
        None => DEFAULT_GENERATOR.next_id(),
    }
}
