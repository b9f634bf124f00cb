//! # Domain Errors
//!
//! Error types for the permission tree.

use thiserror::Error;

/// Permission error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The path was empty; the root is not addressable.
    #[error("Permission path is empty")]
    EmptyPath,

    /// The path contains an empty segment (`"Admin..Read"`).
    #[error("Permission path {path:?} has an empty segment at position {position}")]
    EmptySegment {
        /// The rejected path.
        path: String,
        /// Zero-based index of the empty segment.
        position: usize,
    },

    /// A segment contains whitespace, so its entry line could not be parsed back.
    #[error("Permission path {path:?} has whitespace in segment {position}")]
    WhitespaceInSegment {
        /// The rejected path.
        path: String,
        /// Zero-based index of the offending segment.
        position: usize,
    },

    /// A serialized entry carried a type token that is not recognised.
    #[error("Unknown permission type {token:?} in entry {entry:?}")]
    UnknownType {
        /// The full entry.
        entry: String,
        /// The unrecognised token.
        token: String,
    },
}

/// Result type for permission operations
pub type PermissionResult<T> = Result<T, PermissionError>;
