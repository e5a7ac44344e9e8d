//! Events and the context that queues and dispatches them

pub mod context;
pub mod kind;
pub mod record;
mod ring;

pub use context::{EventContext, Handler, InputContext};
pub use kind::EventKind;
pub use record::{Event, Payload};
