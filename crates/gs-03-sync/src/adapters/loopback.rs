//! In-process transport.
//!
//! Runs a server and any number of client mirrors in one process, for
//! offline sessions and end-to-end tests. Frames still go through the codec,
//! so the same bytes cross the boundary as over a network transport.

use std::collections::BTreeMap;
use std::sync::Arc;

use gs_01_permissions::InMemoryRoleRegistry;
use gs_02_players::{GameClock, LiveEntity, PlayerStore, SessionConfig};
use shared_types::PlayerIdentity;

use super::recording::{QueuedClientChannel, QueuedServerChannel, Target};
use crate::service::{ClientMirror, SessionServer};

struct ClientEndpoint {
    mirror: ClientMirror,
    outbound: Arc<QueuedServerChannel>,
}

/// A server wired to its clients through in-memory queues.
pub struct Loopback {
    config: SessionConfig,
    clock: Arc<dyn GameClock>,
    server: SessionServer,
    server_outbound: Arc<QueuedClientChannel>,
    clients: BTreeMap<String, ClientEndpoint>,
}

impl Loopback {
    pub fn new(config: SessionConfig, clock: Arc<dyn GameClock>) -> Self {
        let server_outbound = Arc::new(QueuedClientChannel::new());
        let server = SessionServer::new(
            config.clone(),
            Arc::new(InMemoryRoleRegistry::new()),
            clock.clone(),
            server_outbound.clone(),
        );
        Self {
            config,
            clock,
            server,
            server_outbound,
            clients: BTreeMap::new(),
        }
    }

    /// Persist server-side players through `store`.
    pub fn with_store(mut self, store: Arc<dyn PlayerStore>) -> Self {
        self.server = self.server.with_store(store);
        self
    }

    pub fn server(&self) -> &SessionServer {
        &self.server
    }

    pub fn server_mut(&mut self) -> &mut SessionServer {
        &mut self.server
    }

    pub fn client(&self, guid: &str) -> Option<&ClientMirror> {
        self.clients.get(guid).map(|c| &c.mirror)
    }

    pub fn client_mut(&mut self, guid: &str) -> Option<&mut ClientMirror> {
        self.clients.get_mut(guid).map(|c| &mut c.mirror)
    }

    /// Connect a player and its client mirror, then let the mirror ask for
    /// the player list as it would after loading.
    pub fn join(&mut self, identity: PlayerIdentity, entity: Option<Arc<dyn LiveEntity>>) {
        let guid = identity.guid.clone();
        let outbound = Arc::new(QueuedServerChannel::new());
        let mirror = ClientMirror::new(
            self.config.clone(),
            Arc::new(InMemoryRoleRegistry::new()),
            self.clock.clone(),
            outbound.clone(),
        );
        self.clients
            .insert(guid.clone(), ClientEndpoint { mirror, outbound });

        self.server.connect(identity, entity);
        self.pump();

        if let Some(endpoint) = self.clients.get(&guid) {
            if let Err(e) = endpoint.mirror.request_refresh() {
                tracing::warn!(guid = %guid, error = %e, "Refresh request failed");
            }
        }
        self.pump();
    }

    /// Disconnect a player and drop its client.
    pub fn leave(&mut self, guid: &str) {
        self.clients.remove(guid);
        self.server.disconnect(guid);
        self.pump();
    }

    /// Deliver queued frames in both directions until none are left.
    ///
    /// Returns the number of frames delivered.
    pub fn pump(&mut self) -> usize {
        let mut total = 0;
        loop {
            let mut delivered = 0;

            for delivery in self.server_outbound.take() {
                match &delivery.target {
                    Target::One(guid) => {
                        if let Some(endpoint) = self.clients.get_mut(guid) {
                            endpoint.mirror.handle_frame(&delivery.frame);
                        }
                    }
                    Target::All => {
                        for endpoint in self.clients.values_mut() {
                            endpoint.mirror.handle_frame(&delivery.frame);
                        }
                    }
                }
                delivered += 1;
            }

            for (guid, endpoint) in &self.clients {
                for frame in endpoint.outbound.take() {
                    self.server.handle_frame(guid, &frame);
                    delivered += 1;
                }
            }

            if delivered == 0 {
                return total;
            }
            total += delivered;
        }
    }
}
