//! # Core Domain Entities
//!
//! Identity and spatial primitives used across the session crates.
//!
//! ## Clusters
//!
//! - **Identity**: `PlayerIdentity`, `Guid`, offline constants
//! - **Simulation**: `Vector3`, `Tick`

use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Stable per-player identifier assigned by the transport layer.
pub type Guid = String;

/// GUID used when the session runs without a multiplayer transport.
pub const OFFLINE_GUID: &str = "OFFLINE";

/// Platform identifier used when the session runs offline.
pub const OFFLINE_STEAM: &str = "OFFLINE";

/// Display name used when the session runs offline.
pub const OFFLINE_NAME: &str = "Offline";

/// The identity triple of a connected (or offline-registered) player.
///
/// Identity strings are established by the transport before they reach
/// this workspace; nothing here authenticates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PlayerIdentity {
    /// Stable identifier. Primary key for persistence and routing.
    pub guid: Guid,
    /// Platform (Steam64) identifier. Used as a legacy persistence key.
    pub steam64_id: String,
    /// Display name.
    pub name: String,
}

impl PlayerIdentity {
    /// Create an identity from its three parts.
    pub fn new(
        guid: impl Into<String>,
        steam64_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            guid: guid.into(),
            steam64_id: steam64_id.into(),
            name: name.into(),
        }
    }

    /// The identity used for offline administration.
    pub fn offline() -> Self {
        Self::new(OFFLINE_GUID, OFFLINE_STEAM, OFFLINE_NAME)
    }

    /// Returns true if this is the offline identity.
    pub fn is_offline(&self) -> bool {
        self.guid == OFFLINE_GUID
    }
}

impl std::fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.guid)
    }
}

// =============================================================================
// CLUSTER B: SIMULATION
// =============================================================================

/// Engine time in ticks (milliseconds of simulation time).
pub type Tick = u64;

/// A position or orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}
