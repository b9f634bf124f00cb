//! Adapters for the player crate ports.

pub mod clock;
pub mod file_store;
pub mod memory_store;

pub use clock::{ManualClock, MonotonicClock};
pub use file_store::{FilePlayerStore, RECORD_EXTENSION};
pub use memory_store::InMemoryPlayerStore;
