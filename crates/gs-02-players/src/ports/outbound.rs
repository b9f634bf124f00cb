//! Outbound (Driven) ports for the player crate.
//!
//! The engine and the disk are reached only through these traits.

use shared_types::Tick;

use crate::domain::{PlayerRecord, StoreResult, Vitals};

/// A live in-engine player entity.
///
/// Sampling must be cheap; it is called at most once per refresh interval
/// per player.
pub trait LiveEntity: Send + Sync {
    /// Read the entity's current state.
    fn sample(&self) -> Vitals;
}

/// Engine time source.
pub trait GameClock: Send + Sync {
    /// Current engine time in ticks.
    fn now(&self) -> Tick;
}

/// Persistent storage for permission records and player records.
///
/// Permission records are addressed by file name (sanitized id plus
/// extension); player records by guid.
pub trait PlayerStore: Send + Sync {
    /// Read a permission record.
    ///
    /// # Returns
    /// - `Ok(Some(lines))`: the record exists
    /// - `Ok(None)`: no such record
    fn read_permissions(&self, name: &str) -> StoreResult<Option<Vec<String>>>;

    /// Replace a permission record with `lines`.
    fn write_permissions(&self, name: &str, lines: &[String]) -> StoreResult<()>;

    /// Delete a permission record. Returns true if it existed.
    fn delete_permissions(&self, name: &str) -> StoreResult<bool>;

    /// Load a player record.
    fn load_record(&self, guid: &str) -> StoreResult<Option<PlayerRecord>>;

    /// Create or replace a player record.
    fn save_record(&self, record: &PlayerRecord) -> StoreResult<()>;
}

/// Fixed-state entity for testing.
#[cfg(test)]
pub struct MockEntity {
    pub vitals: parking_lot::Mutex<Vitals>,
    pub samples: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockEntity {
    pub fn new(vitals: Vitals) -> Self {
        Self {
            vitals: parking_lot::Mutex::new(vitals),
            samples: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn samples(&self) -> usize {
        self.samples.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl LiveEntity for MockEntity {
    fn sample(&self) -> Vitals {
        self.samples
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.vitals.lock()
    }
}
