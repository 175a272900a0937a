//! Board snapshot persistence adapter.
//!
//! # Responsibility
//! - Read/write the JSON board snapshot from one key-value slot.
//! - Report why a stored board was not used instead of masking it.
//!
//! # Invariants
//! - `load` and `save` never return errors to the caller.
//! - Snapshots are a flat JSON array of columns with nested tasks.
//! - A stored snapshot is only accepted after `Board::validate()` passes.

use crate::config::StoreConfig;
use crate::model::board::Board;
use crate::repo::kv_store::KvStore;
use log::{debug, error, info, warn};

/// Outcome of reading the board slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardLoad {
    /// A valid snapshot was read.
    Stored(Board),
    /// The slot has never been written.
    Missing,
    /// The slot holds text that is not a valid board.
    Corrupt(String),
    /// The store failed while reading.
    ReadFailed(String),
    /// No store exists in this environment.
    Unavailable,
}

/// Copyable summary of a `BoardLoad`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    Missing,
    Corrupt,
    ReadFailed,
    Unavailable,
}

impl LoadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Missing => "missing",
            Self::Corrupt => "corrupt",
            Self::ReadFailed => "read_failed",
            Self::Unavailable => "unavailable",
        }
    }
}

impl BoardLoad {
    pub fn source(&self) -> LoadSource {
        match self {
            Self::Stored(_) => LoadSource::Stored,
            Self::Missing => LoadSource::Missing,
            Self::Corrupt(_) => LoadSource::Corrupt,
            Self::ReadFailed(_) => LoadSource::ReadFailed,
            Self::Unavailable => LoadSource::Unavailable,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }

    /// Resolves to the stored board, or `fallback` for every other outcome.
    pub fn into_board_or(self, fallback: Board) -> Board {
        match self {
            Self::Stored(board) => board,
            _ => fallback,
        }
    }
}

/// Outcome of writing the board slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// No store exists in this environment.
    Skipped,
    /// The write was dropped; in-memory state stays authoritative.
    Failed(String),
}

/// Persistence adapter mirroring boards into one key-value slot.
pub struct BoardRepository<S: KvStore> {
    store: S,
    config: StoreConfig,
}

impl<S: KvStore> BoardRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, StoreConfig::default())
    }

    pub fn with_config(store: S, config: StoreConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Fresh seed board for this repository's configuration.
    pub fn default_board(&self) -> Board {
        self.config.seed_board()
    }

    /// Reads the board snapshot.
    ///
    /// Never fails; inspect the returned variant for the reason a stored
    /// board was not used.
    pub fn load(&self) -> BoardLoad {
        let key = self.config.storage_key.as_str();
        if !self.store.is_available() {
            debug!("event=board_load module=repo status=skip reason=store_unavailable key={key}");
            return BoardLoad::Unavailable;
        }

        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                info!("event=board_load module=repo status=ok source=missing key={key}");
                return BoardLoad::Missing;
            }
            Err(err) => {
                error!(
                    "event=board_load module=repo status=error error_code=read_failed key={} error={}",
                    key, err
                );
                return BoardLoad::ReadFailed(err.to_string());
            }
        };

        match parse_snapshot(&text) {
            Ok(board) => {
                info!(
                    "event=board_load module=repo status=ok source=stored key={} columns={} tasks={}",
                    key,
                    board.len(),
                    board.task_count()
                );
                BoardLoad::Stored(board)
            }
            Err(reason) => {
                warn!(
                    "event=board_load module=repo status=error error_code=corrupt_snapshot key={} bytes={} error={}",
                    key,
                    text.len(),
                    reason
                );
                BoardLoad::Corrupt(reason)
            }
        }
    }

    /// Reads the board snapshot, falling back to the seed board.
    pub fn load_or_default(&self) -> Board {
        self.load().into_board_or(self.default_board())
    }

    /// Writes the board snapshot. Failures are logged and dropped.
    pub fn save(&self, board: &Board) -> SaveOutcome {
        let key = self.config.storage_key.as_str();
        if !self.store.is_available() {
            return SaveOutcome::Skipped;
        }

        let text = match serde_json::to_string(board) {
            Ok(text) => text,
            Err(err) => {
                error!(
                    "event=board_save module=repo status=error error_code=serialize_failed key={} error={}",
                    key, err
                );
                return SaveOutcome::Failed(err.to_string());
            }
        };

        match self.store.set(key, &text) {
            Ok(()) => {
                debug!(
                    "event=board_save module=repo status=ok key={} bytes={}",
                    key,
                    text.len()
                );
                SaveOutcome::Written
            }
            Err(err) => {
                error!(
                    "event=board_save module=repo status=error error_code=write_failed key={} error={}",
                    key, err
                );
                SaveOutcome::Failed(err.to_string())
            }
        }
    }
}

fn parse_snapshot(text: &str) -> Result<Board, String> {
    let board: Board = serde_json::from_str(text).map_err(|err| err.to_string())?;
    board.validate().map_err(|err| err.to_string())?;
    Ok(board)
}
