//! Outbound (Driven) ports for the sync crate.
//!
//! Frames are already encoded when they reach a channel; the transport
//! knows nothing about message types. Delivery is assumed reliable and
//! ordered.

use gs_02_players::PlayerInstance;

use crate::errors::SyncResult;

/// Server → client transport.
pub trait ClientChannel: Send + Sync {
    /// Deliver a frame to one client.
    fn send_to(&self, guid: &str, frame: Vec<u8>) -> SyncResult<()>;

    /// Deliver a frame to every connected client.
    fn broadcast(&self, frame: Vec<u8>) -> SyncResult<()>;
}

/// Client → server transport.
pub trait ServerChannel: Send + Sync {
    fn send(&self, frame: Vec<u8>) -> SyncResult<()>;
}

/// Client-side modules that gate UI on permissions.
///
/// Notified after the client's own instance or any role changes.
pub trait PermissionsListener: Send + Sync {
    /// `own` is `None` until the server has sent the client's own instance.
    fn on_permissions_updated(&self, own: Option<&PlayerInstance>);
}
