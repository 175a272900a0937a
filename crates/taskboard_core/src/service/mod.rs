//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-session board and expose its mutation operations.
//! - Keep UI layers decoupled from storage details.

pub mod board_store;
