//! Input devices
//!
//! Identity allocation and the base record every input source embeds.

pub mod base;
pub mod id;

pub use base::DeviceBase;
pub use id::{
    next_device_id, set_device_id_generator, CounterIdGenerator, DeviceId, DeviceIdGenerator,
};
