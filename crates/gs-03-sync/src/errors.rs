//! Error types for the sync crate.

use shared_types::MessageError;
use thiserror::Error;

/// Errors raised at the sync boundary.
///
/// Handlers never return these to a peer; they are logged and the frame is
/// dropped.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Message(#[from] MessageError),

    /// The transport could not deliver a frame.
    #[error("Channel error sending to {target}: {message}")]
    Channel { target: String, message: String },

    #[error("Unknown player: {guid}")]
    UnknownPlayer { guid: String },
}

pub type SyncResult<T> = Result<T, SyncError>;
