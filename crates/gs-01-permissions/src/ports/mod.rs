//! Ports layer for the permission crate.
//!
//! Only outbound (driven) ports exist here: the permission tree itself is
//! the inbound surface.

pub mod outbound;

pub use outbound::*;
