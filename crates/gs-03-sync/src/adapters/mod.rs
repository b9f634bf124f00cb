//! Transport adapters.

pub mod loopback;
pub mod recording;

pub use loopback::Loopback;
pub use recording::{Delivery, QueuedClientChannel, QueuedServerChannel, Target};
