//! Core domain logic for the task board.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod db;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, DEFAULT_COLUMN_TITLES, DEFAULT_STORAGE_KEY};
pub use interaction::{can_remove_columns, drop_on_column, drop_payload, move_targets};
pub use interaction::{DragPayload, DropOutcome};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::board::{
    normalize_title, Board, BoardValidationError, Column, ColumnId, Task, TaskId, TaskMove,
};
pub use repo::board_repo::{BoardLoad, BoardRepository, LoadSource, SaveOutcome};
pub use repo::kv_store::{
    KvStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult, UnavailableKvStore,
};
pub use service::board_store::BoardStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
