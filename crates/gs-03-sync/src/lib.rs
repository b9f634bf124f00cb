//! # GS-03 Sync
//!
//! Server-authoritative synchronization of player state to clients.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Message Flow
//!
//! ```text
//! Client                                   Server
//!   │── RefreshPlayers ───────────────────▶│  every player, to requester only
//!   │◀──────────────── UpdatePlayer × N ───│
//!   │── UpdatePlayer { guid } ────────────▶│  needs Admin.Player.Read
//!   │◀──────────────────── UpdatePlayer ───│
//!   │── UpdateRole { name, perms } ───────▶│  needs Admin.Roles.Update
//!   │◀═══════════════ UpdateRole (all) ════│
//!
//! connect:     UpdateRole × roles, SetClientInstance   (to the new client)
//! disconnect:  RemoveClient                             (to all clients)
//! ```
//!
//! Every frame is a bincode-encoded `Envelope { version, payload }`. A frame
//! of another version, or one that does not decode, is dropped. Denied
//! requests are dropped silently and recorded in the audit log.
//!
//! ## Module Structure
//!
//! ```text
//! gs-03-sync/
//! ├── ipc/        # ClientMessage, ServerMessage, frame codec
//! ├── ports/      # ClientChannel, ServerChannel, PermissionsListener
//! ├── service/    # SessionServer, ClientMirror
//! └── adapters/   # Queued channels, in-process Loopback
//! ```

#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod errors;
pub mod ipc;
pub mod ports;
pub mod service;

pub use adapters::{Delivery, Loopback, QueuedClientChannel, QueuedServerChannel, Target};
pub use errors::{SyncError, SyncResult};
pub use ipc::{decode, encode, ClientMessage, ServerMessage};
pub use ports::{ClientChannel, PermissionsListener, ServerChannel};
pub use service::{ClientMirror, SessionServer};
