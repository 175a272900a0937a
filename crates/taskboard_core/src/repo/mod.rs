//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract the board is mirrored into.
//! - Isolate SQLite and JSON details from the board store.
//!
//! # Invariants
//! - Board persistence never surfaces errors to the store; outcomes are
//!   reported as values.

pub mod board_repo;
pub mod kv_store;
