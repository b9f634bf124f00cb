//! # Client Mirror
//!
//! The client side of the sync protocol: a read-only mirror of the players
//! and roles the server has sent. The mirror never decides access; its own
//! instance exists so UI modules can hide what the server would refuse.

use std::sync::Arc;

use gs_01_permissions::InMemoryRoleRegistry;
use gs_02_players::{GameClock, PlayerInstance, PlayerPayload, PlayerRegistry, SessionConfig, SessionContext};

use crate::errors::SyncResult;
use crate::ipc::{codec, ClientMessage, ServerMessage};
use crate::ports::{PermissionsListener, ServerChannel};

/// Client side of a session.
pub struct ClientMirror {
    ctx: SessionContext,
    roles: Arc<InMemoryRoleRegistry>,
    players: PlayerRegistry,
    own_guid: Option<String>,
    channel: Arc<dyn ServerChannel>,
    listeners: Vec<Arc<dyn PermissionsListener>>,
}

impl ClientMirror {
    pub fn new(
        config: SessionConfig,
        roles: Arc<InMemoryRoleRegistry>,
        clock: Arc<dyn GameClock>,
        channel: Arc<dyn ServerChannel>,
    ) -> Self {
        Self {
            ctx: SessionContext::client(roles.clone(), clock, config),
            roles,
            players: PlayerRegistry::new(),
            own_guid: None,
            channel,
            listeners: Vec::new(),
        }
    }

    /// Register a module to be told when permissions change.
    pub fn add_listener(&mut self, listener: Arc<dyn PermissionsListener>) {
        self.listeners.push(listener);
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn own_guid(&self) -> Option<&str> {
        self.own_guid.as_deref()
    }

    /// The mirror of this client's own player, once the server sent it.
    pub fn own_instance(&self) -> Option<&PlayerInstance> {
        self.own_guid
            .as_deref()
            .and_then(|guid| self.players.get(guid))
    }

    /// UI gate: whether the own instance appears to hold `permission`.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.own_instance()
            .is_some_and(|own| own.has_permission(permission))
    }

    pub fn player(&self, guid: &str) -> Option<&PlayerInstance> {
        self.players.get(guid)
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn roles(&self) -> &Arc<InMemoryRoleRegistry> {
        &self.roles
    }

    // =========================================================================
    // REQUESTS
    // =========================================================================

    /// Ask for every connected player. Sent once the module has loaded.
    pub fn request_refresh(&self) -> SyncResult<()> {
        self.send(&ClientMessage::RefreshPlayers)
    }

    /// Ask for one player's current state.
    pub fn request_player(&self, guid: &str) -> SyncResult<()> {
        self.send(&ClientMessage::UpdatePlayer {
            guid: guid.to_string(),
        })
    }

    /// Push a role definition to the server.
    pub fn push_role(&self, name: &str, permissions: Vec<String>) -> SyncResult<()> {
        self.send(&ClientMessage::UpdateRole {
            name: name.to_string(),
            permissions,
        })
    }

    fn send(&self, message: &ClientMessage) -> SyncResult<()> {
        let frame = codec::encode(message, self.ctx.config.protocol_version)?;
        self.channel.send(frame)?;
        gs_diagnostics::MESSAGES_SENT
            .with_label_values(&[message.kind()])
            .inc();
        Ok(())
    }

    // =========================================================================
    // MESSAGE HANDLING
    // =========================================================================

    /// Decode and apply one frame from the server.
    ///
    /// Frames that fail to decode are dropped.
    pub fn handle_frame(&mut self, frame: &[u8]) {
        match codec::decode::<ServerMessage>(frame, self.ctx.config.protocol_version) {
            Ok(message) => self.handle_message(message),
            Err(e) => tracing::warn!(error = %e, "Dropping server frame"),
        }
    }

    pub fn handle_message(&mut self, message: ServerMessage) {
        gs_diagnostics::MESSAGES_RECEIVED
            .with_label_values(&[message.kind()])
            .inc();

        match message {
            ServerMessage::UpdatePlayer(payload) => self.handle_update_player(payload),
            ServerMessage::SetClientInstance { guid, player } => {
                self.handle_set_client_instance(guid, player)
            }
            ServerMessage::RemoveClient { guid } => self.handle_remove_client(&guid),
            ServerMessage::UpdateRole { name, permissions } => {
                self.handle_update_role(&name, permissions)
            }
        }
    }

    /// Create or replace the mirror of one player.
    pub fn handle_update_player(&mut self, payload: PlayerPayload) {
        let guid = payload.guid().to_string();
        match self.players.get_mut(&guid) {
            Some(existing) => existing.apply_payload(payload),
            None => {
                self.players
                    .insert(PlayerInstance::from_payload(payload, self.ctx.clone()));
            }
        }
        tracing::trace!(guid = %guid, "Mirrored player");
    }

    /// Record the own instance and notify listeners.
    pub fn handle_set_client_instance(&mut self, guid: String, player: PlayerPayload) {
        self.handle_update_player(player);
        tracing::debug!(guid = %guid, "Own instance set");
        self.own_guid = Some(guid);
        self.notify();
    }

    pub fn handle_remove_client(&mut self, guid: &str) {
        if self.players.remove(guid).is_some() {
            tracing::debug!(guid = %guid, "Removed mirrored player");
        }
    }

    /// Replace a role definition and notify listeners.
    pub fn handle_update_role(&mut self, name: &str, permissions: Vec<String>) {
        self.roles.load_role(name, permissions);
        tracing::debug!(role = %name, "Role definition received");
        self.notify();
    }

    fn notify(&self) {
        let own = self.own_instance();
        for listener in &self.listeners {
            listener.on_permissions_updated(own);
        }
    }
}
