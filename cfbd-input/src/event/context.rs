//! Event context: queue plus dispatcher
//!
//! Producers (button scans, possibly running in interrupt context) push
//! events into a ring buffer; the application drains it from its main loop
//! with [`EventContext::dispatch`], which hands each event to the registered
//! handlers in registration order.
//!
//! # Concurrency
//!
//! Ring indices and the handler table are only touched inside the raw
//! mutex, which for [`CriticalSectionRawMutex`] means with interrupts
//! masked. Handlers always run outside the lock, so a handler may enqueue,
//! register or unregister without deadlocking.
//!
//! # Dispatch pass
//!
//! A pass drains exactly the events that were queued when it started.
//! Events enqueued while it runs (by a handler or an interrupt) stay queued
//! for the next pass, which keeps the time spent in one call bounded.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use super::record::Event;
use super::ring::EventRing;
use crate::config::{INPUT_EVENT_QUEUE_SIZE, INPUT_MAX_HANDLER_CNT};
use crate::error::InputError;

/// Event handler callback
///
/// Returns `false` if it failed to process the event. Handlers are
/// identified by function address for registration and removal.
pub type Handler<'p> = fn(&mut Event<'p>) -> bool;

/// Operations input devices use to talk to their context
pub trait InputContext<'p>: Sync {
    /// Queue an event without blocking
    ///
    /// Fails with [`InputError::QueueFull`] when there is no free slot; the
    /// event is lost unless the caller retries.
    fn enqueue(&self, event: Event<'p>) -> Result<(), InputError>;

    /// Append a handler to the chain
    ///
    /// Registering a handler that is already present succeeds without
    /// adding a second copy.
    fn register_handler(&self, handler: Handler<'p>) -> Result<(), InputError>;

    /// Remove a handler, keeping the order of the remaining ones
    ///
    /// Returns `false` if the handler was not registered.
    fn unregister_handler(&self, handler: Handler<'p>) -> bool;

    /// Drain the queue through the handler chain
    ///
    /// Returns the number of events dispatched.
    fn dispatch(&self) -> usize;
}

/// Ring-buffered event queue with an ordered handler chain
///
/// `QUEUE` is the number of ring slots (one is always kept empty) and
/// `HANDLERS` the size of the handler table. Construction is `const`, so a
/// context can live in a `static` shared with interrupt handlers:
///
/// ```ignore
/// static INPUT: EventContext<'static> = EventContext::new();
/// ```
pub struct EventContext<
    'p,
    M: RawMutex = CriticalSectionRawMutex,
    const QUEUE: usize = INPUT_EVENT_QUEUE_SIZE,
    const HANDLERS: usize = INPUT_MAX_HANDLER_CNT,
> {
    queue: Mutex<M, RefCell<EventRing<'p, QUEUE>>>,
    handlers: Mutex<M, RefCell<Vec<Handler<'p>, HANDLERS>>>,
    /// A failing handler ends the chain for that event
    stop_on_failure: AtomicBool,
    /// Set while a dispatch pass is running
    dispatching: AtomicBool,
    /// Events rejected because the queue was full
    dropped: AtomicU32,
}

impl<'p, M: RawMutex, const QUEUE: usize, const HANDLERS: usize> Default
    for EventContext<'p, M, QUEUE, HANDLERS>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, M: RawMutex, const QUEUE: usize, const HANDLERS: usize>
    EventContext<'p, M, QUEUE, HANDLERS>
{
    /// Create an empty context with no handlers
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(EventRing::new())),
            handlers: Mutex::new(RefCell::new(Vec::new())),
            stop_on_failure: AtomicBool::new(false),
            dispatching: AtomicBool::new(false),
            dropped: AtomicU32::new(0),
        }
    }

    /// Choose whether a handler returning `false` ends the chain for that event
    pub fn set_stop_on_failure(&self, stop: bool) {
        self.stop_on_failure.store(stop, Ordering::Relaxed);
    }

    /// Check if failing handlers end the chain
    pub fn stop_on_failure(&self) -> bool {
        self.stop_on_failure.load(Ordering::Relaxed)
    }

    /// Number of events waiting for dispatch
    pub fn len(&self) -> usize {
        self.queue.lock(|queue| queue.borrow().len())
    }

    /// Check if no events are waiting
    pub fn is_empty(&self) -> bool {
        self.queue.lock(|queue| queue.borrow().is_empty())
    }

    /// Maximum number of queued events
    pub fn capacity(&self) -> usize {
        self.queue.lock(|queue| queue.borrow().capacity())
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.lock(|handlers| handlers.borrow().len())
    }

    /// Events lost to a full queue since creation
    pub fn dropped_events(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Queue an event without blocking
    pub fn enqueue(&self, event: Event<'p>) -> Result<(), InputError> {
        let result = self.queue.lock(|queue| queue.borrow_mut().push(event));
        if result.is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "defmt")]
            defmt::warn!("input queue full, dropped {}", event);
        }
        result
    }

    /// Append a handler to the chain (idempotent)
    pub fn register_handler(&self, handler: Handler<'p>) -> Result<(), InputError> {
        self.handlers.lock(|handlers| {
            let mut handlers = handlers.borrow_mut();
            if handlers.iter().any(|h| core::ptr::fn_addr_eq(*h, handler)) {
                return Ok(());
            }
            handlers
                .push(handler)
                .map_err(|_| InputError::HandlerTableFull)?;
            #[cfg(feature = "defmt")]
            defmt::trace!("handler registered ({} total)", handlers.len());
            Ok(())
        })
    }

    /// Remove the first registration of `handler`
    pub fn unregister_handler(&self, handler: Handler<'p>) -> bool {
        self.handlers.lock(|handlers| {
            let mut handlers = handlers.borrow_mut();
            match handlers
                .iter()
                .position(|h| core::ptr::fn_addr_eq(*h, handler))
            {
                Some(index) => {
                    handlers.remove(index);
                    #[cfg(feature = "defmt")]
                    defmt::trace!("handler unregistered ({} left)", handlers.len());
                    true
                }
                None => false,
            }
        })
    }

    /// Drain the events queued so far through the handler chain
    ///
    /// For each event, in FIFO order, the handlers run in registration
    /// order until one of them stops propagation or, with
    /// [`set_stop_on_failure`](Self::set_stop_on_failure) enabled, returns
    /// `false`. The event is retired afterwards whatever the outcome; it is
    /// never retried.
    ///
    /// Calling `dispatch` from inside a handler returns 0 immediately.
    pub fn dispatch(&self) -> usize {
        if self.dispatching.swap(true, Ordering::Acquire) {
            return 0;
        }

        let pending = self.len();
        let mut dispatched = 0;

        while dispatched < pending {
            let Some(mut event) = self.queue.lock(|queue| queue.borrow().peek()) else {
                break;
            };

            // Snapshot so handlers can change the table while running
            let handlers = self.handlers.lock(|handlers| handlers.borrow().clone());
            let stop_on_failure = self.stop_on_failure();

            for handler in handlers.iter() {
                let ok = handler(&mut event);
                if !ok && stop_on_failure {
                    break;
                }
                if event.is_propagation_stopped() {
                    break;
                }
            }

            self.queue.lock(|queue| queue.borrow_mut().advance());
            dispatched += 1;
        }

        self.dispatching.store(false, Ordering::Release);
        dispatched
    }
}

impl<'p, M, const QUEUE: usize, const HANDLERS: usize> InputContext<'p>
    for EventContext<'p, M, QUEUE, HANDLERS>
where
    M: RawMutex + Sync,
{
    fn enqueue(&self, event: Event<'p>) -> Result<(), InputError> {
        EventContext::enqueue(self, event)
    }

    fn register_handler(&self, handler: Handler<'p>) -> Result<(), InputError> {
        EventContext::register_handler(self, handler)
    }

    fn unregister_handler(&self, handler: Handler<'p>) -> bool {
        EventContext::unregister_handler(self, handler)
    }

    fn dispatch(&self) -> usize {
        EventContext::dispatch(self)
    }
}
