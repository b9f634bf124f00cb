//! # Session Server
//!
//! The authoritative side of the sync protocol. Owns the connected player
//! instances and answers client requests.
//!
//! ## Access Rules
//!
//! | Request | Required permission | On denial |
//! |---------|---------------------|-----------|
//! | `RefreshPlayers` | none | n/a |
//! | `UpdatePlayer` | `Admin.Player.Read` | dropped, audit log |
//! | `UpdateRole` | `Admin.Roles.Update` | dropped, audit log |
//!
//! Denied and malformed requests get no reply. Replies to a request go to
//! the requester only; only role changes and disconnects are broadcast.

use std::sync::Arc;

use gs_01_permissions::{
    InMemoryRoleRegistry, PermissionCatalog, PermissionResult, PERM_PLAYER_READ,
    PERM_ROLES_UPDATE,
};
use gs_02_players::{
    GameClock, LiveEntity, PlayerInstance, PlayerRegistry, PlayerStore, SessionConfig,
    SessionContext,
};
use gs_diagnostics::{audit_denied, metric_inc};
use shared_types::PlayerIdentity;

use crate::errors::{SyncError, SyncResult};
use crate::ipc::{codec, ClientMessage, ServerMessage};
use crate::ports::ClientChannel;

/// Server side of a session.
pub struct SessionServer {
    ctx: SessionContext,
    roles: Arc<InMemoryRoleRegistry>,
    players: PlayerRegistry,
    catalog: PermissionCatalog,
    channel: Arc<dyn ClientChannel>,
}

impl SessionServer {
    /// Create a server without persistence.
    pub fn new(
        config: SessionConfig,
        roles: Arc<InMemoryRoleRegistry>,
        clock: Arc<dyn GameClock>,
        channel: Arc<dyn ClientChannel>,
    ) -> Self {
        let ctx = SessionContext::server(roles.clone(), clock, config);

        let mut catalog = PermissionCatalog::new();
        for permission in [PERM_PLAYER_READ, PERM_ROLES_UPDATE] {
            if let Err(e) = catalog.register(permission) {
                tracing::warn!(permission = %permission, error = %e, "Failed to register permission");
            }
        }

        Self {
            ctx,
            roles,
            players: PlayerRegistry::new(),
            catalog,
            channel,
        }
    }

    /// Persist players through `store`.
    pub fn with_store(mut self, store: Arc<dyn PlayerStore>) -> Self {
        self.ctx = self.ctx.with_store(store);
        self
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn player(&self, guid: &str) -> Option<&PlayerInstance> {
        self.players.get(guid)
    }

    pub fn roles(&self) -> &Arc<InMemoryRoleRegistry> {
        &self.roles
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Register a permission path for administration front-ends.
    pub fn register_permission(&mut self, path: &str) -> PermissionResult<()> {
        self.catalog.register(path)
    }

    /// Whether connected player `guid` holds `permission`.
    ///
    /// Unknown players hold nothing.
    pub fn has_permission(&self, guid: &str, permission: &str) -> bool {
        self.players
            .get(guid)
            .is_some_and(|p| p.has_permission(permission))
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Admit a player.
    ///
    /// Loads persisted state, then sends the connecting client every role
    /// definition followed by its own instance. Nothing is broadcast.
    pub fn connect(&mut self, identity: PlayerIdentity, entity: Option<Arc<dyn LiveEntity>>) {
        let guid = identity.guid.clone();
        let mut instance = PlayerInstance::new(identity, self.ctx.clone());
        if let Some(entity) = entity {
            instance.attach_entity(entity);
        }
        if let Err(e) = instance.load() {
            tracing::warn!(guid = %guid, error = %e, "Failed to load player state");
        }

        let payload = instance.to_payload();
        if self.players.insert(instance).is_some() {
            tracing::warn!(guid = %guid, "Replaced existing instance on reconnect");
        }
        gs_diagnostics::PLAYERS_CONNECTED.set(self.players.len() as f64);
        tracing::info!(guid = %guid, players = self.players.len(), "Player connected");

        for name in self.roles.role_names() {
            let permissions = self.roles.role_entries(&name).unwrap_or_default();
            self.send_to(&guid, &ServerMessage::UpdateRole { name, permissions });
        }
        self.send_to(
            &guid,
            &ServerMessage::SetClientInstance {
                guid: guid.clone(),
                player: payload,
            },
        );
    }

    /// Remove a player, saving it first, and tell every client.
    ///
    /// Returns false if the player was not connected.
    pub fn disconnect(&mut self, guid: &str) -> bool {
        let Some(instance) = self.players.remove(guid) else {
            return false;
        };
        if let Err(e) = instance.save() {
            tracing::warn!(guid = %guid, error = %e, "Failed to save player on disconnect");
        }
        gs_diagnostics::PLAYERS_CONNECTED.set(self.players.len() as f64);
        tracing::info!(guid = %guid, players = self.players.len(), "Player disconnected");

        self.broadcast(&ServerMessage::RemoveClient {
            guid: guid.to_string(),
        });
        true
    }

    /// Run the throttled vitals refresh for every player.
    pub fn tick(&mut self) -> usize {
        self.players.update_all()
    }

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================

    /// Create or replace a role and broadcast it to every client.
    ///
    /// Returns true if the role was created. Server-side role edits go
    /// through here so client registries never miss a role a mirror
    /// refers to.
    pub fn load_role(&self, name: &str, permissions: Vec<String>) -> bool {
        let created = self.roles.load_role(name, permissions);
        let permissions = self.roles.role_entries(name).unwrap_or_default();
        self.broadcast(&ServerMessage::UpdateRole {
            name: name.to_string(),
            permissions,
        });
        created
    }

    /// Replace a player's own permissions, persist, and resend its instance.
    pub fn load_player_permissions(&mut self, guid: &str, entries: &[String]) -> SyncResult<()> {
        let player = self.player_mut(guid)?;
        if let Err(e) = player.load_permissions(entries) {
            tracing::warn!(guid = %guid, error = %e, "Failed to save permissions");
        }
        self.resend_own_instance(guid);
        Ok(())
    }

    /// Replace a player's roles, persist, and resend its instance.
    pub fn load_player_roles(&mut self, guid: &str, roles: &[String]) -> SyncResult<()> {
        let player = self.player_mut(guid)?;
        if let Err(e) = player.load_roles(roles) {
            tracing::warn!(guid = %guid, error = %e, "Failed to save roles");
        }
        self.resend_own_instance(guid);
        Ok(())
    }

    fn player_mut(&mut self, guid: &str) -> SyncResult<&mut PlayerInstance> {
        self.players
            .get_mut(guid)
            .ok_or_else(|| SyncError::UnknownPlayer {
                guid: guid.to_string(),
            })
    }

    fn resend_own_instance(&self, guid: &str) {
        if let Some(player) = self.players.get(guid) {
            self.send_to(
                guid,
                &ServerMessage::SetClientInstance {
                    guid: guid.to_string(),
                    player: player.to_payload(),
                },
            );
        }
    }

    // =========================================================================
    // REQUEST HANDLING
    // =========================================================================

    /// Decode and dispatch one frame from `sender`.
    ///
    /// Frames of another protocol version or that fail to decode are
    /// dropped without side effects.
    pub fn handle_frame(&mut self, sender: &str, frame: &[u8]) {
        match codec::decode::<ClientMessage>(frame, self.ctx.config.protocol_version) {
            Ok(message) => self.handle_message(sender, message),
            Err(e) => {
                let reason = match &e {
                    shared_types::MessageError::UnsupportedVersion { .. } => "version",
                    _ => "malformed",
                };
                gs_diagnostics::FRAMES_REJECTED
                    .with_label_values(&[reason])
                    .inc();
                tracing::warn!(guid = %sender, error = %e, "Dropping client frame");
            }
        }
    }

    /// Dispatch a decoded request.
    pub fn handle_message(&mut self, sender: &str, message: ClientMessage) {
        gs_diagnostics::MESSAGES_RECEIVED
            .with_label_values(&[message.kind()])
            .inc();
        tracing::debug!(guid = %sender, message_type = message.kind(), "Client request");

        match message {
            ClientMessage::RefreshPlayers => self.handle_refresh_players(sender),
            ClientMessage::UpdatePlayer { guid } => self.handle_update_player(sender, &guid),
            ClientMessage::UpdateRole { name, permissions } => {
                self.handle_update_role(sender, &name, permissions)
            }
        }
    }

    /// Send every connected player, freshly refreshed, to the requester.
    pub fn handle_refresh_players(&mut self, sender: &str) {
        let payloads: Vec<_> = self
            .players
            .iter_mut()
            .map(|player| {
                player.update();
                player.to_payload()
            })
            .collect();

        for payload in payloads {
            self.send_to(sender, &ServerMessage::UpdatePlayer(payload));
        }
    }

    /// Send one player to a requester holding `Admin.Player.Read`.
    pub fn handle_update_player(&mut self, sender: &str, target: &str) {
        if !self.has_permission(sender, PERM_PLAYER_READ) {
            audit_denied!("UpdatePlayer", guid = %sender, requested = %target, permission = PERM_PLAYER_READ);
            return;
        }

        let Some(player) = self.players.get_mut(target) else {
            tracing::debug!(guid = %sender, requested = %target, "UpdatePlayer for unknown player");
            return;
        };
        player.update();
        let payload = player.to_payload();

        self.send_to(sender, &ServerMessage::UpdatePlayer(payload));
    }

    /// Replace a role for a requester holding `Admin.Roles.Update`, then
    /// broadcast the new definition.
    pub fn handle_update_role(&mut self, sender: &str, name: &str, permissions: Vec<String>) {
        if !self.has_permission(sender, PERM_ROLES_UPDATE) {
            audit_denied!("UpdateRole", guid = %sender, role = %name, permission = PERM_ROLES_UPDATE);
            return;
        }

        let created = self.load_role(name, permissions);
        tracing::info!(guid = %sender, role = %name, created, "Role updated");
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    fn encode(&self, message: &ServerMessage) -> Option<Vec<u8>> {
        match codec::encode(message, self.ctx.config.protocol_version) {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::error!(message_type = message.kind(), error = %e, "Failed to encode message");
                None
            }
        }
    }

    fn send_to(&self, guid: &str, message: &ServerMessage) {
        let Some(frame) = self.encode(message) else {
            return;
        };
        match self.channel.send_to(guid, frame) {
            Ok(()) => metric_inc!(gs_diagnostics::MESSAGES_SENT, &[message.kind()]),
            Err(e) => {
                tracing::warn!(guid = %guid, message_type = message.kind(), error = %e, "Send failed")
            }
        }
    }

    fn broadcast(&self, message: &ServerMessage) {
        let Some(frame) = self.encode(message) else {
            return;
        };
        match self.channel.broadcast(frame) {
            Ok(()) => metric_inc!(gs_diagnostics::MESSAGES_SENT, &[message.kind()]),
            Err(e) => tracing::warn!(message_type = message.kind(), error = %e, "Broadcast failed"),
        }
    }
}
