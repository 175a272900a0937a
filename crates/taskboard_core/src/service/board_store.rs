//! Board state store.
//!
//! # Responsibility
//! - Hold the current board snapshot for one session.
//! - Apply mutations and mirror every changed snapshot to persistence.
//!
//! # Invariants
//! - Operations never fail; unknown ids and blank titles are no-ops.
//! - A no-op leaves the snapshot pointer untouched and writes nothing.
//! - Each change replaces the snapshot wholesale; handed-out snapshots
//!   never observe later mutations.

use crate::model::board::{Board, Column, ColumnId, Task, TaskId, TaskMove};
use crate::repo::board_repo::{BoardRepository, LoadSource, SaveOutcome};
use crate::repo::kv_store::KvStore;
use log::{debug, info};
use std::sync::Arc;

/// Single owner of the in-session board.
pub struct BoardStore<S: KvStore> {
    repo: BoardRepository<S>,
    board: Arc<Board>,
    load_source: LoadSource,
    last_save: Option<SaveOutcome>,
}

impl<S: KvStore> BoardStore<S> {
    /// Loads the board from `repo`, seeding the default board when nothing
    /// usable is stored.
    pub fn open(repo: BoardRepository<S>) -> Self {
        let load = repo.load();
        let load_source = load.source();
        let board = load.into_board_or(repo.default_board());
        info!(
            "event=store_open module=store status=ok source={} columns={} tasks={}",
            load_source.as_str(),
            board.len(),
            board.task_count()
        );

        Self {
            repo,
            board: Arc::new(board),
            load_source,
            last_save: None,
        }
    }

    /// Current snapshot. Cheap to clone and safe to hold across mutations.
    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Where the startup board came from.
    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// Result of the most recent persistence attempt, if any.
    pub fn last_save(&self) -> Option<&SaveOutcome> {
        self.last_save.as_ref()
    }

    pub fn repository(&self) -> &BoardRepository<S> {
        &self.repo
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.board.column(column_id)
    }

    pub fn locate_task(&self, task_id: &str) -> Option<(&Column, &Task)> {
        self.board.locate_task(task_id)
    }

    /// Appends a column. Blank titles are ignored.
    pub fn add_column(&mut self, title: &str) -> Option<ColumnId> {
        let mut next = Board::clone(&self.board);
        let Some(column_id) = next.add_column(title) else {
            debug!("event=board_mutation module=store op=add_column status=noop reason=blank_title");
            return None;
        };

        info!("event=board_mutation module=store op=add_column status=ok column_id={column_id}");
        self.commit(next);
        Some(column_id)
    }

    /// Removes a column and every task in it.
    pub fn delete_column(&mut self, column_id: &str) -> bool {
        if self.board.column(column_id).is_none() {
            debug!(
                "event=board_mutation module=store op=delete_column status=noop reason=column_not_found column_id={column_id}"
            );
            return false;
        }

        let mut next = Board::clone(&self.board);
        let Some(removed) = next.delete_column(column_id) else {
            return false;
        };
        info!(
            "event=board_mutation module=store op=delete_column status=ok column_id={} dropped_tasks={}",
            removed.id,
            removed.tasks.len()
        );
        self.commit(next);
        true
    }

    /// Appends a task to a column. Unknown columns and blank titles are
    /// ignored.
    pub fn add_task(&mut self, column_id: &str, title: &str, description: &str) -> Option<TaskId> {
        let mut next = Board::clone(&self.board);
        let Some(task_id) = next.add_task(column_id, title, description) else {
            debug!(
                "event=board_mutation module=store op=add_task status=noop column_id={column_id}"
            );
            return None;
        };

        info!(
            "event=board_mutation module=store op=add_task status=ok column_id={column_id} task_id={task_id}"
        );
        self.commit(next);
        Some(task_id)
    }

    /// Removes a task from whichever column holds it.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        if self.board.locate_task(task_id).is_none() {
            debug!(
                "event=board_mutation module=store op=delete_task status=noop reason=task_not_found task_id={task_id}"
            );
            return false;
        }

        let mut next = Board::clone(&self.board);
        let Some(removed) = next.delete_task(task_id) else {
            return false;
        };
        info!(
            "event=board_mutation module=store op=delete_task status=ok task_id={} column_id={}",
            removed.id, removed.column_id
        );
        self.commit(next);
        true
    }

    /// Moves a task to the end of another column.
    ///
    /// No-op when the task or target column is unknown, or when the task
    /// already lives in the target column.
    pub fn move_task(&mut self, task_id: &str, target_column_id: &str) -> Option<TaskMove> {
        let source_id = match self.board.locate_task(task_id) {
            Some((column, _)) => column.id.as_str(),
            None => {
                debug!(
                    "event=board_mutation module=store op=move_task status=noop reason=task_not_found task_id={task_id}"
                );
                return None;
            }
        };
        if source_id == target_column_id || self.board.column(target_column_id).is_none() {
            debug!(
                "event=board_mutation module=store op=move_task status=noop reason=invalid_target task_id={task_id} target_column_id={target_column_id}"
            );
            return None;
        }

        let mut next = Board::clone(&self.board);
        let moved = next.move_task(task_id, target_column_id)?;
        info!(
            "event=board_mutation module=store op=move_task status=ok task_id={} from_column_id={} to_column_id={}",
            moved.task_id, moved.from_column_id, moved.to_column_id
        );
        self.commit(next);
        Some(moved)
    }

    fn commit(&mut self, next: Board) {
        self.board = Arc::new(next);
        self.last_save = Some(self.repo.save(&self.board));
    }
}
