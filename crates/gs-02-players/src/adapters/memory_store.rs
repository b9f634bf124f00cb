use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::{PlayerRecord, StoreResult};
use crate::ports::PlayerStore;

/// In-memory player store for offline sessions and tests.
#[derive(Default)]
pub struct InMemoryPlayerStore {
    permissions: RwLock<HashMap<String, Vec<String>>>,
    records: RwLock<HashMap<String, PlayerRecord>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all stored permission records, sorted.
    pub fn permission_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.permissions.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl PlayerStore for InMemoryPlayerStore {
    fn read_permissions(&self, name: &str) -> StoreResult<Option<Vec<String>>> {
        Ok(self.permissions.read().get(name).cloned())
    }

    fn write_permissions(&self, name: &str, lines: &[String]) -> StoreResult<()> {
        self.permissions
            .write()
            .insert(name.to_string(), lines.to_vec());
        Ok(())
    }

    fn delete_permissions(&self, name: &str) -> StoreResult<bool> {
        Ok(self.permissions.write().remove(name).is_some())
    }

    fn load_record(&self, guid: &str) -> StoreResult<Option<PlayerRecord>> {
        Ok(self.records.read().get(guid).cloned())
    }

    fn save_record(&self, record: &PlayerRecord) -> StoreResult<()> {
        self.records
            .write()
            .insert(record.guid.clone(), record.clone());
        Ok(())
    }
}
