use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::domain::{PermissionCheck, Role, EVERYONE_ROLE};
use crate::ports::RoleRegistry;

/// In-memory role registry shared by every player instance.
///
/// Mutation goes through `&self` so the registry can sit behind an `Arc`
/// and still accept role updates from the sync protocol. The baseline
/// `everyone` role always exists.
pub struct InMemoryRoleRegistry {
    roles: RwLock<BTreeMap<String, Role>>,
}

impl InMemoryRoleRegistry {
    /// Create a registry holding only the empty `everyone` role.
    pub fn new() -> Self {
        let mut roles = BTreeMap::new();
        roles.insert(EVERYONE_ROLE.to_string(), Role::new(EVERYONE_ROLE));
        Self {
            roles: RwLock::new(roles),
        }
    }

    /// Create or replace a role from serialized entries.
    ///
    /// Returns true if the role did not exist before.
    pub fn load_role(&self, name: &str, entries: Vec<String>) -> bool {
        let mut roles = self.roles.write();
        match roles.get_mut(name) {
            Some(role) => {
                role.replace_entries(entries);
                tracing::debug!(role = %name, "Replaced role definition");
                false
            }
            None => {
                roles.insert(name.to_string(), Role::from_entries(name, entries));
                tracing::debug!(role = %name, "Created role");
                true
            }
        }
    }

    /// Remove a role. The `everyone` role cannot be removed.
    pub fn remove_role(&self, name: &str) -> bool {
        if name == EVERYONE_ROLE {
            return false;
        }
        self.roles.write().remove(name).is_some()
    }

    /// Serialized entries of a role.
    pub fn role_entries(&self, name: &str) -> Option<Vec<String>> {
        self.roles.read().get(name).map(|r| r.entries().to_vec())
    }

    /// All role names in sorted order.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.roles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.read().is_empty()
    }
}

impl Default for InMemoryRoleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleRegistry for InMemoryRoleRegistry {
    fn is_role(&self, name: &str) -> bool {
        self.roles.read().contains_key(name)
    }

    fn has_role_permission(&self, name: &str, path: &str) -> PermissionCheck {
        self.roles
            .read()
            .get(name)
            .map(|role| role.has_permission(path))
            .unwrap_or(PermissionCheck::UNDECIDED)
    }
}
