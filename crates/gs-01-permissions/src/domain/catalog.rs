//! # Permission Catalog
//!
//! The set of permission paths that have administrative meaning. Features
//! register the paths they check at start-up so administration front-ends
//! can list them. Unregistered paths are still structurally valid.

use std::collections::BTreeSet;

use super::entry::split_path;
use super::errors::PermissionResult;

/// Registered permission paths.
#[derive(Clone, Debug, Default)]
pub struct PermissionCatalog {
    paths: BTreeSet<String>,
}

impl PermissionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path. Registering twice is harmless.
    pub fn register(&mut self, path: &str) -> PermissionResult<()> {
        split_path(path)?;
        if self.paths.insert(path.to_string()) {
            tracing::debug!(permission = %path, "Registered permission");
        }
        Ok(())
    }

    pub fn is_registered(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// All registered paths in sorted order.
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
