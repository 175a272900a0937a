//! Board domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one nested column/task shape for storage and presentation alike.
//!
//! # Invariants
//! - Every task is owned by exactly one column.
//! - Deletion is hard removal from the owning sequence.

pub mod board;
