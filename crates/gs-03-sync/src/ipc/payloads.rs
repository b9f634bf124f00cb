//! Wire messages exchanged between the server and its clients.

use gs_02_players::PlayerPayload;
use serde::{Deserialize, Serialize};

/// Client → server requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// Ask for every connected player. Answered to the requester only.
    RefreshPlayers,

    /// Ask for one player. Requires `Admin.Player.Read`.
    UpdatePlayer { guid: String },

    /// Replace a role definition. Requires `Admin.Roles.Update`.
    UpdateRole {
        name: String,
        permissions: Vec<String>,
    },
}

impl ClientMessage {
    /// Label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::RefreshPlayers => "RefreshPlayers",
            ClientMessage::UpdatePlayer { .. } => "UpdatePlayer",
            ClientMessage::UpdateRole { .. } => "UpdateRole",
        }
    }
}

/// Server → client messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Full state of one player; creates or replaces the mirror.
    UpdatePlayer(PlayerPayload),

    /// Full state of the receiving client's own player.
    SetClientInstance { guid: String, player: PlayerPayload },

    /// A player left the session.
    RemoveClient { guid: String },

    /// A role definition, replacing any previous one of the same name.
    UpdateRole {
        name: String,
        permissions: Vec<String>,
    },
}

impl ServerMessage {
    /// Label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::UpdatePlayer(_) => "UpdatePlayer",
            ServerMessage::SetClientInstance { .. } => "SetClientInstance",
            ServerMessage::RemoveClient { .. } => "RemoveClient",
            ServerMessage::UpdateRole { .. } => "UpdateRole",
        }
    }
}
