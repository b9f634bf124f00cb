//! # Game Session Test Suite
//!
//! Cross-crate tests that drive a whole session: a server, its client
//! mirrors, the loopback transport and a player store.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # connect, refresh, access control, roles, disconnect
//!     └── persistence.rs  # file store, legacy record migration, restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gs-tests
//! cargo test -p gs-tests integration::persistence::
//! ```

pub mod integration;
