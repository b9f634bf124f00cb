//! Frame codec: bincode over a versioned [`Envelope`].
//!
//! The version prefix is checked before the payload is decoded, so a frame
//! from a newer protocol is reported as a version mismatch rather than as
//! garbage.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{Envelope, MessageError};

/// Encode `payload` as a frame of protocol `version`.
pub fn encode<T: Serialize>(payload: &T, version: u16) -> Result<Vec<u8>, MessageError> {
    let envelope = Envelope { version, payload };
    bincode::serialize(&envelope).map_err(|e| MessageError::Encoding(e.to_string()))
}

/// Decode a frame, accepting only protocol `supported`.
pub fn decode<T: DeserializeOwned>(frame: &[u8], supported: u16) -> Result<T, MessageError> {
    let version: u16 =
        bincode::deserialize(frame).map_err(|e| MessageError::Malformed(e.to_string()))?;
    if version != supported {
        return Err(MessageError::UnsupportedVersion {
            received: version,
            supported,
        });
    }

    let envelope: Envelope<T> =
        bincode::deserialize(frame).map_err(|e| MessageError::Malformed(e.to_string()))?;
    envelope.open(supported)
}
