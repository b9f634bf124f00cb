//! # Domain Module
//!
//! Pure permission logic: the tree, entry codec, roles and the catalog.

pub mod catalog;
pub mod entry;
pub mod errors;
pub mod node;
pub mod role;
pub mod value_objects;

pub use catalog::*;
pub use entry::*;
pub use errors::*;
pub use node::*;
pub use role::*;
pub use value_objects::*;
