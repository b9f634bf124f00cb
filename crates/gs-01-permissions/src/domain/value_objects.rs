//! # Value Objects
//!
//! `PermissionType` and the result of a permission query.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The type tag carried by every permission node.
///
/// Numeric values match the legacy on-disk encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PermissionType {
    /// No decision here; defer to ancestors, then to roles.
    #[default]
    Inherit = 0,
    /// Explicit deny. Short-circuits resolution.
    Disallow = 1,
    /// Explicit grant.
    Allow = 2,
}

impl PermissionType {
    /// Token written after the path in a serialized entry.
    pub fn as_token(self) -> &'static str {
        match self {
            PermissionType::Inherit => "INHERIT",
            PermissionType::Disallow => "DISALLOW",
            PermissionType::Allow => "ALLOW",
        }
    }

    /// Returns true for ALLOW and DISALLOW.
    pub fn is_explicit(self) -> bool {
        !matches!(self, PermissionType::Inherit)
    }
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for PermissionType {
    type Err = ();

    /// Accepts the upper-case names (any case) and the legacy digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INHERIT" | "0" => Ok(PermissionType::Inherit),
            "DISALLOW" | "1" => Ok(PermissionType::Disallow),
            "ALLOW" | "2" => Ok(PermissionType::Allow),
            _ => Err(()),
        }
    }
}

/// Outcome of resolving a path against one permission tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionCheck {
    /// Whether the path is granted by this tree alone.
    pub granted: bool,
    /// ALLOW when granted, DISALLOW on explicit deny, INHERIT otherwise.
    pub kind: PermissionType,
}

impl PermissionCheck {
    pub const ALLOWED: Self = Self {
        granted: true,
        kind: PermissionType::Allow,
    };

    pub const DENIED: Self = Self {
        granted: false,
        kind: PermissionType::Disallow,
    };

    pub const UNDECIDED: Self = Self {
        granted: false,
        kind: PermissionType::Inherit,
    };

    /// True when this tree explicitly denies the path.
    pub fn is_denied(&self) -> bool {
        self.kind == PermissionType::Disallow
    }
}
