//! # Vitals Snapshot
//!
//! Cached copy of a player's live state. The snapshot is the single source
//! for outbound synchronization; it is refreshed from the engine on a
//! throttle and replaced wholesale on a client mirror.

use serde::{Deserialize, Serialize};
use shared_types::{PlayerIdentity, Vector3};

/// Live state sampled from the engine entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vitals {
    pub position: Vector3,
    pub orientation: Vector3,

    pub health: f32,
    pub blood: f32,
    pub shock: f32,
    pub blood_type: i32,

    pub energy: f32,
    pub water: f32,
    pub heat_comfort: f32,
    pub wet: f32,
    pub tremor: f32,
    pub stamina: f32,

    pub life_span_state: i32,
    pub bloody_hands: bool,
    pub god_mode: bool,
    pub invisibility: bool,

    /// Network round trip in milliseconds, as the engine reports it.
    pub ping_max: i32,
    pub ping_min: i32,
    pub ping_avg: i32,
}

/// Full-state wire form of one player.
///
/// Every field is carried on every send; the receiver replaces all of its
/// state with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPayload {
    pub identity: PlayerIdentity,
    /// Serialized permission entries (`"<path> <TYPE>"`).
    pub permissions: Vec<String>,
    /// Role names in membership order.
    pub roles: Vec<String>,
    pub vitals: Vitals,
}

impl PlayerPayload {
    pub fn guid(&self) -> &str {
        &self.identity.guid
    }
}
