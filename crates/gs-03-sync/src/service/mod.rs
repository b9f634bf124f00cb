//! Protocol endpoints.

pub mod client;
pub mod server;

pub use client::ClientMirror;
pub use server::SessionServer;
