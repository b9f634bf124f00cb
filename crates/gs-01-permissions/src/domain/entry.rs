//! # Permission Entries
//!
//! Parsing and formatting of the flat `"<path> <TYPE>"` form used by the
//! wire protocol, the role registry and the on-disk records.
//!
//! ```text
//! Admin.Player.Read ALLOW     explicit type
//! Admin.Player.Read 2         legacy numeric type
//! Admin.Player.Read           bare; caller supplies the type
//! ```

use super::errors::{PermissionError, PermissionResult};
use super::value_objects::PermissionType;

/// Path separator.
pub const SEPARATOR: char = '.';

/// One parsed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionEntry {
    /// Validated dotted path.
    pub path: String,
    /// Type token, if the entry carried one.
    pub kind: Option<PermissionType>,
}

impl PermissionEntry {
    /// Parse an entry line.
    ///
    /// Surrounding whitespace is ignored. The path must pass
    /// [`split_path`]; at most one type token may follow it.
    pub fn parse(raw: &str) -> PermissionResult<Self> {
        let mut tokens = raw.split_whitespace();
        let path = tokens.next().ok_or(PermissionError::EmptyPath)?;
        split_path(path)?;

        let kind = match tokens.next() {
            None => None,
            Some(token) => {
                let parsed =
                    token
                        .parse::<PermissionType>()
                        .map_err(|_| PermissionError::UnknownType {
                            entry: raw.to_string(),
                            token: token.to_string(),
                        })?;
                Some(parsed)
            }
        };

        if let Some(extra) = tokens.next() {
            return Err(PermissionError::UnknownType {
                entry: raw.to_string(),
                token: extra.to_string(),
            });
        }

        Ok(Self {
            path: path.to_string(),
            kind,
        })
    }

    /// The entry's type, or `fallback` for a bare path.
    pub fn kind_or(&self, fallback: PermissionType) -> PermissionType {
        self.kind.unwrap_or(fallback)
    }
}

/// Split a dotted path into its segments.
///
/// An empty path, an empty segment or a segment containing whitespace is
/// rejected.
pub fn split_path(path: &str) -> PermissionResult<Vec<&str>> {
    if path.is_empty() {
        return Err(PermissionError::EmptyPath);
    }

    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    if let Some(position) = segments.iter().position(|s| s.is_empty()) {
        return Err(PermissionError::EmptySegment {
            path: path.to_string(),
            position,
        });
    }
    if let Some(position) = segments
        .iter()
        .position(|s| s.chars().any(char::is_whitespace))
    {
        return Err(PermissionError::WhitespaceInSegment {
            path: path.to_string(),
            position,
        });
    }

    Ok(segments)
}

/// Format an entry line.
pub fn format_entry(path: &str, kind: PermissionType) -> String {
    format!("{} {}", path, kind.as_token())
}
