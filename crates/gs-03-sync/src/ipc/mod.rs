//! Wire boundary: messages and frame codec.

pub mod codec;
pub mod payloads;

pub use codec::{decode, encode};
pub use payloads::{ClientMessage, ServerMessage};
