//! Outbound (Driven) ports for the permission crate.
//!
//! Player instances resolve role permissions through this trait at check
//! time, so a role edited in the registry is observed by the next check.

use crate::domain::PermissionCheck;

/// Role registry interface.
///
/// Roles are looked up by name on every call; callers never hold a
/// resolved handle.
pub trait RoleRegistry: Send + Sync {
    /// Returns true if `name` is a known role.
    fn is_role(&self, name: &str) -> bool;

    /// Resolve `path` against role `name`.
    ///
    /// # Returns
    /// - `granted = true, kind = Allow`: the role grants the path
    /// - `kind = Disallow`: the role explicitly denies it
    /// - `kind = Inherit`: no decision, or the role is unknown
    fn has_role_permission(&self, name: &str, path: &str) -> PermissionCheck;
}

/// Mock registry for testing: a fixed map of role → granted paths.
#[cfg(test)]
pub struct MockRoleRegistry {
    roles: std::collections::HashMap<String, Vec<String>>,
}

#[cfg(test)]
impl MockRoleRegistry {
    pub fn new() -> Self {
        Self {
            roles: std::collections::HashMap::new(),
        }
    }

    pub fn with_role(mut self, name: &str, granted: &[&str]) -> Self {
        self.roles.insert(
            name.to_string(),
            granted.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

#[cfg(test)]
impl RoleRegistry for MockRoleRegistry {
    fn is_role(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    fn has_role_permission(&self, name: &str, path: &str) -> PermissionCheck {
        match self.roles.get(name) {
            Some(granted) if granted.iter().any(|g| g == path) => PermissionCheck::ALLOWED,
            _ => PermissionCheck::UNDECIDED,
        }
    }
}
