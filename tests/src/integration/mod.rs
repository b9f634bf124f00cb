//! Cross-crate session flows.

pub mod flows;
pub mod persistence;

use std::sync::Arc;

use gs_02_players::{LiveEntity, Vitals};
use parking_lot::Mutex;

/// Engine entity whose state the test sets directly.
pub struct ScriptedEntity {
    vitals: Mutex<Vitals>,
}

impl ScriptedEntity {
    pub fn new(vitals: Vitals) -> Arc<Self> {
        Arc::new(Self {
            vitals: Mutex::new(vitals),
        })
    }

    pub fn set(&self, vitals: Vitals) {
        *self.vitals.lock() = vitals;
    }
}

impl LiveEntity for ScriptedEntity {
    fn sample(&self) -> Vitals {
        *self.vitals.lock()
    }
}
