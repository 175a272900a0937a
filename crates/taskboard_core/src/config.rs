//! Board store configuration.
//!
//! # Invariants
//! - `storage_key` names the single slot holding the board snapshot.
//! - `seed_columns` are used, in order, whenever no stored board is usable.

use crate::model::board::Board;

/// Slot name shared with boards saved by earlier releases.
pub const DEFAULT_STORAGE_KEY: &str = "taskManagementData";

/// Column titles of a freshly seeded board.
pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub seed_columns: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_columns: DEFAULT_COLUMN_TITLES
                .iter()
                .map(|title| (*title).to_string())
                .collect(),
        }
    }
}

impl StoreConfig {
    /// Keeps the default seed but stores the board under another slot.
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            ..Self::default()
        }
    }

    /// Board used when storage is empty, unavailable, or unreadable.
    pub fn seed_board(&self) -> Board {
        Board::seeded(self.seed_columns.iter().cloned())
    }
}
