//! # GS-01 Permissions
//!
//! Hierarchical permission tree with role inheritance and explicit deny.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Resolution Policy
//!
//! | Node type | Meaning |
//! |-----------|---------|
//! | `ALLOW` | Grant; deeper INHERIT nodes inherit it |
//! | `DISALLOW` | Deny; halts resolution, beats any grant on the same path |
//! | `INHERIT` | No decision; defer to ancestors, then to roles |
//!
//! ```text
//! Admin            DISALLOW   ─┐
//! └── Player       INHERIT     │  HasPermission("Admin.Player.Read")
//!     └── Read     ALLOW       │  → not granted, DISALLOW
//!                             ─┘
//! ```
//!
//! A player's own tree is consulted first; only when it yields INHERIT are
//! the player's roles asked, through the [`RoleRegistry`] port.
//!
//! ## Module Structure
//!
//! ```text
//! gs-01-permissions/
//! ├── domain/     # PermissionNode, entries, Role, PermissionCatalog, errors
//! ├── ports/      # RoleRegistry (outbound)
//! └── adapters/   # InMemoryRoleRegistry
//! ```

#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryRoleRegistry;
pub use domain::{
    format_entry, split_path, PermissionCatalog, PermissionCheck, PermissionEntry,
    PermissionError, PermissionNode, PermissionResult, PermissionType, Role, EVERYONE_ROLE,
    ROOT_NAME, SEPARATOR,
};
pub use ports::RoleRegistry;

/// Permission required to request another player's snapshot.
pub const PERM_PLAYER_READ: &str = "Admin.Player.Read";

/// Permission required to push a role definition.
pub const PERM_ROLES_UPDATE: &str = "Admin.Roles.Update";
