//! Board domain model.
//!
//! # Responsibility
//! - Define the task/column/board shapes shared by store, persistence and UI.
//! - Provide pure, in-place mutations used by the store to build snapshots.
//!
//! # Invariants
//! - A task appears in exactly one column's task sequence.
//! - `Task::column_id` always equals the id of the column holding the task.
//! - Column and task ids are unique across the board.
//! - Column and task titles are never blank.
//!
//! # See also
//! - `service::board_store` for the snapshot-producing controller.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Identifier of a column. Stored ids may be any string; new ids are UUIDs.
pub type ColumnId = String;

/// Identifier of a task. Stored ids may be any string; new ids are UUIDs.
pub type TaskId = String;

/// Titled, described unit of work belonging to exactly one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Mirrors the owning column. Rewritten on every move.
    pub column_id: ColumnId,
}

/// Named, ordered bucket of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates an empty column with a caller-provided id.
    pub fn with_id(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == task_id)
    }
}

/// Result of a successful task move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: TaskId,
    pub from_column_id: ColumnId,
    pub to_column_id: ColumnId,
}

/// Structural rule violated by a board value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardValidationError {
    DuplicateColumnId(ColumnId),
    DuplicateTaskId(TaskId),
    ColumnIdMismatch {
        task_id: TaskId,
        expected: ColumnId,
        found: ColumnId,
    },
    BlankColumnTitle(ColumnId),
    BlankTaskTitle(TaskId),
}

impl Display for BoardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateColumnId(id) => write!(f, "duplicate column id: {id}"),
            Self::DuplicateTaskId(id) => write!(f, "duplicate task id: {id}"),
            Self::ColumnIdMismatch {
                task_id,
                expected,
                found,
            } => write!(
                f,
                "task {task_id} is held by column {expected} but references column {found}"
            ),
            Self::BlankColumnTitle(id) => write!(f, "column {id} has a blank title"),
            Self::BlankTaskTitle(id) => write!(f, "task {id} has a blank title"),
        }
    }
}

impl Error for BoardValidationError {}

/// Ordered sequence of columns. Serialized as a flat JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Builds a board of empty columns with positional ids `"1"`, `"2"`, ...
    ///
    /// Positional ids match boards written before ids became UUIDs.
    pub fn seeded<I, T>(titles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let columns = titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| Column::with_id((index + 1).to_string(), title))
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    /// Finds a task by scanning all columns in board order.
    ///
    /// Returns the holding column together with the task.
    pub fn locate_task(&self, task_id: &str) -> Option<(&Column, &Task)> {
        self.columns.iter().find_map(|column| {
            column
                .tasks
                .iter()
                .find(|task| task.id == task_id)
                .map(|task| (column, task))
        })
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    /// Appends an empty column. Returns `None` for a blank title.
    pub fn add_column(&mut self, title: &str) -> Option<ColumnId> {
        let title = normalize_title(title)?;
        let id = new_id();
        self.columns.push(Column::with_id(id.clone(), title));
        Some(id)
    }

    /// Removes a column together with all of its tasks.
    pub fn delete_column(&mut self, column_id: &str) -> Option<Column> {
        let index = self.column_index(column_id)?;
        Some(self.columns.remove(index))
    }

    /// Appends a new task to the end of the named column.
    ///
    /// Returns `None` when the column is missing or the title is blank.
    pub fn add_task(&mut self, column_id: &str, title: &str, description: &str) -> Option<TaskId> {
        let title = normalize_title(title)?;
        let column = self.column_mut(column_id)?;
        let id = new_id();
        column.tasks.push(Task {
            id: id.clone(),
            title,
            description: description.to_string(),
            column_id: column.id.clone(),
        });
        Some(id)
    }

    /// Removes a task from whichever column holds it.
    pub fn delete_task(&mut self, task_id: &str) -> Option<Task> {
        let (column_index, task_index) = self.task_position(task_id)?;
        Some(self.columns[column_index].tasks.remove(task_index))
    }

    /// Moves a task to the end of the target column.
    ///
    /// Returns `None` (leaving the board untouched) when the task is missing,
    /// the target column is missing, or the task already lives in the target.
    pub fn move_task(&mut self, task_id: &str, target_column_id: &str) -> Option<TaskMove> {
        let (source_index, task_index) = self.task_position(task_id)?;
        let target_index = self.column_index(target_column_id)?;
        if source_index == target_index {
            return None;
        }

        let mut task = self.columns[source_index].tasks.remove(task_index);
        let from_column_id = std::mem::replace(
            &mut task.column_id,
            self.columns[target_index].id.clone(),
        );
        self.columns[target_index].tasks.push(task);

        Some(TaskMove {
            task_id: task_id.to_string(),
            from_column_id,
            to_column_id: self.columns[target_index].id.clone(),
        })
    }

    /// Checks structural rules that mutations maintain by construction.
    ///
    /// Boards read from storage are not built through mutations, so the
    /// persistence layer runs this before accepting them.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        let mut column_ids = HashSet::new();
        let mut task_ids = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(column.id.as_str()) {
                return Err(BoardValidationError::DuplicateColumnId(column.id.clone()));
            }
            if column.title.trim().is_empty() {
                return Err(BoardValidationError::BlankColumnTitle(column.id.clone()));
            }
            for task in &column.tasks {
                if !task_ids.insert(task.id.as_str()) {
                    return Err(BoardValidationError::DuplicateTaskId(task.id.clone()));
                }
                if task.column_id != column.id {
                    return Err(BoardValidationError::ColumnIdMismatch {
                        task_id: task.id.clone(),
                        expected: column.id.clone(),
                        found: task.column_id.clone(),
                    });
                }
                if task.title.trim().is_empty() {
                    return Err(BoardValidationError::BlankTaskTitle(task.id.clone()));
                }
            }
        }

        Ok(())
    }

    fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.id == column_id)
    }

    fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id == column_id)
    }

    fn task_position(&self, task_id: &str) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(column_index, column)| {
                column
                    .tasks
                    .iter()
                    .position(|task| task.id == task_id)
                    .map(|task_index| (column_index, task_index))
            })
    }
}

/// Trims a user-entered title. Returns `None` when nothing is left.
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
