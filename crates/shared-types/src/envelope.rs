//! # `Envelope` Wrapper
//!
//! The versioned wrapper around every wire message exchanged between the
//! authoritative server and its clients.
//!
//! ## Properties
//!
//! - **Versioning**: receivers MUST compare `version` before touching `payload`.
//! - **Transport Identity**: the sender is known to the transport, never
//!   carried in the payload.

use serde::{Deserialize, Serialize};

use crate::errors::MessageError;

/// The envelope for all session wire messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Protocol version for forward compatibility.
    pub version: u16,

    /// The message payload.
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Current protocol version.
    pub const CURRENT_VERSION: u16 = 1;

    /// Wrap a payload with the current protocol version.
    pub fn new(payload: T) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            payload,
        }
    }

    /// Unwrap the payload, rejecting any version other than `supported`.
    pub fn open(self, supported: u16) -> Result<T, MessageError> {
        if self.version != supported {
            return Err(MessageError::UnsupportedVersion {
                received: self.version,
                supported,
            });
        }
        Ok(self.payload)
    }
}
