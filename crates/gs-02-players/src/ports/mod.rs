//! Ports for the player crate.

pub mod outbound;

pub use outbound::{GameClock, LiveEntity, PlayerStore};

#[cfg(test)]
pub use outbound::MockEntity;
