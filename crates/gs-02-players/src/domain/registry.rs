//! # Player Registry
//!
//! The connected players of a session, keyed by guid. Iteration is in guid
//! order so broadcasts and refresh replies are deterministic.

use std::collections::BTreeMap;

use super::instance::PlayerInstance;

/// Connected player instances by guid.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: BTreeMap<String, PlayerInstance>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an instance, returning the one it replaced.
    pub fn insert(&mut self, instance: PlayerInstance) -> Option<PlayerInstance> {
        self.players.insert(instance.guid().to_string(), instance)
    }

    pub fn get(&self, guid: &str) -> Option<&PlayerInstance> {
        self.players.get(guid)
    }

    pub fn get_mut(&mut self, guid: &str) -> Option<&mut PlayerInstance> {
        self.players.get_mut(guid)
    }

    pub fn remove(&mut self, guid: &str) -> Option<PlayerInstance> {
        self.players.remove(guid)
    }

    pub fn contains(&self, guid: &str) -> bool {
        self.players.contains_key(guid)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn guids(&self) -> Vec<String> {
        self.players.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerInstance> {
        self.players.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlayerInstance> {
        self.players.values_mut()
    }

    /// Run the throttled refresh on every instance. Returns how many
    /// snapshots were refreshed.
    pub fn update_all(&mut self) -> usize {
        self.players
            .values_mut()
            .map(PlayerInstance::update)
            .filter(|refreshed| *refreshed)
            .count()
    }
}
