//! Domain layer for the player crate.

pub mod errors;
pub mod instance;
pub mod persistence;
pub mod registry;
pub mod snapshot;

pub use errors::*;
pub use instance::PlayerInstance;
pub use persistence::*;
pub use registry::PlayerRegistry;
pub use snapshot::{PlayerPayload, Vitals};
