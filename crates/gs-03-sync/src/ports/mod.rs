//! Ports for the sync crate.

pub mod outbound;

pub use outbound::{ClientChannel, PermissionsListener, ServerChannel};
