//! # GS-02 Players
//!
//! Per-player state for a game session: identity, own permission tree,
//! role memberships and a throttled vitals snapshot, plus persistence.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Authority
//!
//! | Operation | Server | Client mirror |
//! |-----------|--------|---------------|
//! | `update` (vitals refresh) | throttled sample of the live entity | no-op |
//! | `save` / `load` | writes / reads the `PlayerStore` | no-op |
//! | `apply_payload` | n/a | replaces all state |
//!
//! ## Persistence
//!
//! ```text
//! permissions_dir/<guid>.txt        one "<path> <TYPE>" entry per line
//! players_dir/<guid>.json           { guid, name, roles }
//! ```
//!
//! Older permission records keyed by Steam64 id, or carrying a doubled
//! extension, are read once and migrated to the guid record.
//!
//! ## Module Structure
//!
//! ```text
//! gs-02-players/
//! ├── domain/     # PlayerInstance, Vitals, PlayerRegistry, persistence, errors
//! ├── ports/      # LiveEntity, GameClock, PlayerStore (outbound)
//! ├── adapters/   # FilePlayerStore, InMemoryPlayerStore, clocks
//! ├── context.rs  # SessionContext
//! └── config.rs   # SessionConfig
//! ```

#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod config;
pub mod context;
pub mod domain;
pub mod ports;

pub use adapters::{FilePlayerStore, InMemoryPlayerStore, ManualClock, MonotonicClock};
pub use config::{SessionConfig, DEFAULT_REFRESH_INTERVAL_TICKS};
pub use context::SessionContext;
pub use domain::{
    load_permissions, permission_record_name, permission_sources, retire_legacy, sanitize_id,
    ConfigError, LoadedPermissions, PermissionSource, PlayerError, PlayerInstance,
    PlayerPayload, PlayerRecord, PlayerRegistry, PlayerResult, StoreError, StoreResult, Vitals,
};
pub use ports::{GameClock, LiveEntity, PlayerStore};
