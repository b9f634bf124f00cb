//! Adapters layer for the permission crate.

pub mod role_registry;

pub use role_registry::InMemoryRoleRegistry;
