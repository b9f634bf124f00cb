//! # Error Types
//!
//! Errors shared by more than one session crate.

use thiserror::Error;

/// Errors related to wire message handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Message version not supported.
    #[error("Unsupported version: received {received}, supported {supported}")]
    UnsupportedVersion { received: u16, supported: u16 },

    /// A frame could not be decoded.
    #[error("Malformed frame: {0}")]
    Malformed(String),

    /// Message could not be encoded.
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

/// Which side of the session a component runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// The authoritative server: persists, refreshes vitals, checks access.
    Server,
    /// A client mirror: read-only, never persists.
    Client,
}

impl Authority {
    pub fn is_server(self) -> bool {
        matches!(self, Authority::Server)
    }
}
