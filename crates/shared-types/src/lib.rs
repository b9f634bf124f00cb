//! # Shared Types Crate
//!
//! Primitives shared by the permission, player and sync crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identity and wire envelope types live here.
//! - **Transport-Established Identity**: a `PlayerIdentity` is never
//!   authenticated by this workspace; it arrives from the transport layer.
//! - **Versioned Frames**: every wire message is wrapped in an `Envelope<T>`.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::Envelope;
pub use errors::*;
