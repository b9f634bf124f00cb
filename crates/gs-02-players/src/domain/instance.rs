//! # Player Instance
//!
//! The authoritative (server) or mirrored (client) record of one player:
//! identity, own permission tree, role memberships and the vitals snapshot.
//!
//! ## Permission Resolution
//!
//! 1. The player's own tree is asked first. A grant wins; an explicit deny
//!    ends the check without consulting any role.
//! 2. Otherwise each role is asked in membership order; the first grant
//!    wins. A role's deny does not stop the remaining roles.
//! 3. No grant anywhere means no permission.

use std::fmt::Write as _;
use std::sync::Arc;

use gs_01_permissions::{PermissionNode, PermissionResult, PermissionType, EVERYONE_ROLE};
use shared_types::{PlayerIdentity, Tick};

use super::errors::PlayerResult;
use super::persistence::{load_permissions, permission_record_name, retire_legacy, PlayerRecord};
use super::snapshot::{PlayerPayload, Vitals};
use crate::context::SessionContext;
use crate::ports::LiveEntity;

/// One player's state.
pub struct PlayerInstance {
    identity: PlayerIdentity,
    permissions: PermissionNode,
    roles: Vec<String>,
    vitals: Vitals,
    last_refresh: Option<Tick>,
    entity: Option<Arc<dyn LiveEntity>>,
    ctx: SessionContext,
}

impl PlayerInstance {
    /// Create an instance holding only the `everyone` role.
    pub fn new(identity: PlayerIdentity, ctx: SessionContext) -> Self {
        let mut instance = Self {
            identity,
            permissions: PermissionNode::root(),
            roles: Vec::new(),
            vitals: Vitals::default(),
            last_refresh: None,
            entity: None,
            ctx,
        };
        instance.clear_roles();
        instance
    }

    /// Create a mirror from a received payload.
    pub fn from_payload(payload: PlayerPayload, ctx: SessionContext) -> Self {
        let mut instance = Self::new(payload.identity.clone(), ctx);
        instance.apply_payload(payload);
        instance
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    pub fn guid(&self) -> &str {
        &self.identity.guid
    }

    pub fn steam64_id(&self) -> &str {
        &self.identity.steam64_id
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// The player's own permission tree.
    pub fn permissions(&self) -> &PermissionNode {
        &self.permissions
    }

    /// Role names in membership order.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    /// Tick of the last vitals refresh, if any.
    pub fn last_refresh(&self) -> Option<Tick> {
        self.last_refresh
    }

    // =========================================================================
    // LIVE ENTITY
    // =========================================================================

    /// Bind the in-engine entity that vitals are sampled from.
    pub fn attach_entity(&mut self, entity: Arc<dyn LiveEntity>) {
        self.entity = Some(entity);
    }

    pub fn detach_entity(&mut self) {
        self.entity = None;
    }

    /// True when a live entity is attached.
    pub fn can_send_data(&self) -> bool {
        self.entity.is_some()
    }

    /// Refresh the vitals snapshot if the throttle allows.
    ///
    /// Only the server refreshes, and only from an attached entity. The
    /// first refresh is always due; later ones need at least
    /// `refresh_interval_ticks` since the previous one. Returns true if the
    /// snapshot was refreshed.
    pub fn update(&mut self) -> bool {
        if !self.ctx.is_server() {
            return false;
        }
        let Some(entity) = &self.entity else {
            return false;
        };

        let now = self.ctx.clock.now();
        let interval = self.ctx.config.refresh_interval_ticks;
        if let Some(last) = self.last_refresh {
            if now.saturating_sub(last) < interval {
                return false;
            }
        }

        self.vitals = entity.sample();
        self.last_refresh = Some(now);
        gs_diagnostics::VITALS_REFRESHES.inc();
        true
    }

    // =========================================================================
    // PERMISSIONS
    // =========================================================================

    /// Check a permission against the own tree, then the roles.
    pub fn has_permission(&self, permission: &str) -> bool {
        let own = self.permissions.has_permission(permission);
        if own.granted {
            return true;
        }
        if own.is_denied() {
            return false;
        }

        self.roles
            .iter()
            .any(|role| self.ctx.roles.has_role_permission(role, permission).granted)
    }

    /// Type resolved by the own tree alone; roles are not consulted.
    pub fn raw_permission_type(&self, permission: &str) -> PermissionType {
        self.permissions.has_permission(permission).kind
    }

    /// Add one entry to the own tree. An inline type suffix beats `kind`.
    pub fn add_permission(&mut self, entry: &str, kind: PermissionType) -> PermissionResult<()> {
        self.permissions.add_permission(entry, kind)
    }

    /// Remove a path and its subtree from the own tree.
    pub fn remove_permission(&mut self, path: &str) -> bool {
        self.permissions.remove_permission(path)
    }

    /// Merge every explicit entry of `source` into the own tree.
    pub fn copy_permissions(&mut self, source: &PermissionNode) {
        for entry in source.serialize() {
            // Serialized entries are always well formed.
            let _ = self.permissions.add_permission(&entry, PermissionType::Inherit);
        }
    }

    pub fn clear_permissions(&mut self) {
        self.permissions.clear();
    }

    /// Replace the own tree with `entries` and persist.
    ///
    /// Bare entries are grants. Malformed entries are skipped.
    pub fn load_permissions(&mut self, entries: &[String]) -> PlayerResult<()> {
        self.permissions.clear();
        self.add_granted_entries(entries);
        self.save()
    }

    fn add_granted_entries(&mut self, entries: &[String]) {
        for entry in entries {
            if let Err(e) = self.permissions.add_permission(entry, PermissionType::Allow) {
                tracing::warn!(guid = %self.identity.guid, entry = %entry, error = %e, "Skipping malformed permission entry");
            }
        }
    }

    // =========================================================================
    // ROLES
    // =========================================================================

    /// Join a role. Unknown roles and existing memberships are ignored.
    ///
    /// Returns true if the role was added.
    pub fn add_role(&mut self, role: &str) -> bool {
        if !self.ctx.roles.is_role(role) {
            tracing::debug!(guid = %self.identity.guid, role = %role, "Ignoring unknown role");
            return false;
        }
        if self.has_role(role) {
            return false;
        }
        self.roles.push(role.to_string());
        true
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Drop every membership except `everyone`.
    pub fn clear_roles(&mut self) {
        self.roles.clear();
        self.add_role(EVERYONE_ROLE);
    }

    /// Replace the memberships with `roles` and persist.
    pub fn load_roles(&mut self, roles: &[String]) -> PlayerResult<()> {
        self.clear_roles();
        for role in roles {
            self.add_role(role);
        }
        self.save()
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    /// Write the own tree and the role list to the store.
    ///
    /// No-op without a store, which is always the case on a client.
    pub fn save(&self) -> PlayerResult<()> {
        let Some(store) = &self.ctx.store else {
            return Ok(());
        };

        let record = PlayerRecord {
            guid: self.identity.guid.clone(),
            name: self.identity.name.clone(),
            roles: self.roles.clone(),
        };
        store.save_record(&record)?;

        let name = permission_record_name(&self.identity.guid, &self.ctx.config);
        store.write_permissions(&name, &self.permissions.serialize())?;

        tracing::debug!(guid = %self.identity.guid, "Saved player");
        Ok(())
    }

    /// Restore roles and permissions from the store, then save back.
    ///
    /// Unreadable records are treated as missing. Permissions come from the
    /// first record found in the load chain; legacy records are migrated.
    pub fn load(&mut self) -> PlayerResult<()> {
        if !self.ctx.is_server() {
            return Ok(());
        }
        self.update();

        let Some(store) = self.ctx.store.clone() else {
            return Ok(());
        };

        let persisted_roles = match store.load_record(&self.identity.guid) {
            Ok(record) => record.map(|r| r.roles).unwrap_or_default(),
            Err(e) => {
                tracing::warn!(guid = %self.identity.guid, error = %e, "Ignoring unreadable player record");
                Vec::new()
            }
        };
        self.clear_roles();
        for role in &persisted_roles {
            self.add_role(role);
        }

        let loaded = load_permissions(store.as_ref(), &self.identity, &self.ctx.config);
        if let Some(loaded) = &loaded {
            self.add_granted_entries(&loaded.entries);
        }

        tracing::info!(
            guid = %self.identity.guid,
            roles = self.roles.len(),
            "Loaded player"
        );
        self.save()?;

        // The legacy record goes only once the primary one is on disk.
        if let Some(loaded) = &loaded {
            retire_legacy(store.as_ref(), &self.identity, loaded);
        }
        Ok(())
    }

    // =========================================================================
    // SYNC
    // =========================================================================

    /// Full-state wire form.
    pub fn to_payload(&self) -> PlayerPayload {
        PlayerPayload {
            identity: self.identity.clone(),
            permissions: self.permissions.serialize(),
            roles: self.roles.clone(),
            vitals: self.vitals,
        }
    }

    /// Replace every field with the payload's.
    ///
    /// Permissions are rebuilt with bare entries as grants; roles are
    /// rebuilt through `clear_roles` so unknown names are dropped.
    pub fn apply_payload(&mut self, payload: PlayerPayload) {
        self.identity = payload.identity;

        self.permissions.clear();
        self.add_granted_entries(&payload.permissions);

        self.clear_roles();
        for role in &payload.roles {
            self.add_role(role);
        }

        self.vitals = payload.vitals;
    }

    /// Identity, roles and tree dump, also emitted at debug level.
    pub fn debug_print(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "GUID: {}", self.identity.guid);
        let _ = writeln!(out, "Steam64ID: {}", self.identity.steam64_id);
        let _ = writeln!(out, "Name: {}", self.identity.name);
        let _ = writeln!(out, "Roles: {}", self.roles.join(", "));
        out.push_str(&self.permissions.debug_print(2));

        tracing::debug!(guid = %self.identity.guid, "{}", out);
        out
    }
}

impl std::fmt::Debug for PlayerInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerInstance")
            .field("identity", &self.identity)
            .field("roles", &self.roles)
            .field("permissions", &self.permissions.serialize())
            .field("last_refresh", &self.last_refresh)
            .field("attached", &self.entity.is_some())
            .finish()
    }
}
