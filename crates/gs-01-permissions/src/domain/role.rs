//! # Roles
//!
//! A role is a named, shared bundle of permission entries. Players refer to
//! roles by name only; the registry owns the `Role` values.

use super::node::PermissionNode;
use super::value_objects::{PermissionCheck, PermissionType};

/// Name of the baseline role every player holds.
pub const EVERYONE_ROLE: &str = "everyone";

/// A named permission bundle.
///
/// `serialized` is the authoritative form (what the wire and disk carry);
/// `root` is re-derived from it whenever it changes.
#[derive(Clone, Debug)]
pub struct Role {
    name: String,
    serialized: Vec<String>,
    root: PermissionNode,
}

impl Role {
    /// Create an empty role.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serialized: Vec::new(),
            root: PermissionNode::root(),
        }
    }

    /// Create a role from serialized entries.
    pub fn from_entries(name: impl Into<String>, entries: Vec<String>) -> Self {
        let mut role = Self::new(name);
        role.replace_entries(entries);
        role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The serialized entries as last loaded.
    pub fn entries(&self) -> &[String] {
        &self.serialized
    }

    /// The derived permission tree.
    pub fn tree(&self) -> &PermissionNode {
        &self.root
    }

    /// Replace the serialized data and rebuild the tree.
    ///
    /// Bare entries are grants. Malformed entries are skipped.
    pub fn replace_entries(&mut self, entries: Vec<String>) {
        self.serialized = entries;
        self.deserialize();
    }

    fn deserialize(&mut self) {
        self.root.clear();
        for entry in &self.serialized {
            if let Err(e) = self.root.add_permission(entry, PermissionType::Allow) {
                tracing::warn!(role = %self.name, entry = %entry, error = %e, "Skipping malformed role entry");
            }
        }
    }

    /// Resolve a path against this role's tree.
    pub fn has_permission(&self, path: &str) -> PermissionCheck {
        self.root.has_permission(path)
    }
}
