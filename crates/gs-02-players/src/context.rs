//! # Session Context
//!
//! The shared collaborators every player instance of a session holds.

use std::sync::Arc;

use gs_01_permissions::RoleRegistry;
use shared_types::Authority;

use crate::config::SessionConfig;
use crate::ports::{GameClock, PlayerStore};

/// Shared services of one session. Cheap to clone.
#[derive(Clone)]
pub struct SessionContext {
    pub authority: Authority,
    pub roles: Arc<dyn RoleRegistry>,
    pub clock: Arc<dyn GameClock>,
    /// Present only on the server; a mirror never persists.
    pub store: Option<Arc<dyn PlayerStore>>,
    pub config: Arc<SessionConfig>,
}

impl SessionContext {
    /// Context for the authoritative server, without persistence.
    pub fn server(
        roles: Arc<dyn RoleRegistry>,
        clock: Arc<dyn GameClock>,
        config: SessionConfig,
    ) -> Self {
        Self {
            authority: Authority::Server,
            roles,
            clock,
            store: None,
            config: Arc::new(config),
        }
    }

    /// Context for a client mirror.
    pub fn client(
        roles: Arc<dyn RoleRegistry>,
        clock: Arc<dyn GameClock>,
        config: SessionConfig,
    ) -> Self {
        Self {
            authority: Authority::Client,
            roles,
            clock,
            store: None,
            config: Arc::new(config),
        }
    }

    /// Attach a player store. Ignored on a client.
    pub fn with_store(mut self, store: Arc<dyn PlayerStore>) -> Self {
        if self.authority.is_server() {
            self.store = Some(store);
        }
        self
    }

    pub fn is_server(&self) -> bool {
        self.authority.is_server()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authority", &self.authority)
            .field("store", &self.store.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
