//! Gesture-to-mutation glue for board front ends.
//!
//! # Responsibility
//! - Define the drag payload exchanged between drag source and drop target.
//! - Translate drops and move-menu picks into store mutations.
//!
//! # Invariants
//! - A drop only moves a task when the target differs from the source.
//! - Malformed payloads are ignored, never surfaced as errors.

use crate::model::board::{Board, Column, ColumnId, Task, TaskId, TaskMove};
use crate::repo::kv_store::KvStore;
use crate::service::board_store::BoardStore;
use log::debug;
use serde::{Deserialize, Serialize};

/// Payload attached to a task when a drag starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub task_id: TaskId,
    pub source_column_id: ColumnId,
}

impl DragPayload {
    pub fn for_task(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            source_column_id: task.column_id.clone(),
        }
    }

    /// Text form carried by the drag data transfer.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a drag data transfer. Returns `None` for foreign or partial
    /// payloads, including ones with empty ids.
    pub fn decode(text: &str) -> Option<Self> {
        let payload: Self = serde_json::from_str(text).ok()?;
        if payload.task_id.is_empty() || payload.source_column_id.is_empty() {
            return None;
        }
        Some(payload)
    }
}

/// What a drop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved(TaskMove),
    /// Dropped back onto the column it came from.
    SameColumn,
    /// Payload could not be decoded.
    Rejected,
    /// Payload was valid but the store ignored it (stale ids).
    Ignored,
}

/// Handles a drop of raw drag data onto `target_column_id`.
pub fn drop_on_column<S: KvStore>(
    store: &mut BoardStore<S>,
    payload_text: &str,
    target_column_id: &str,
) -> DropOutcome {
    let Some(payload) = DragPayload::decode(payload_text) else {
        debug!("event=task_drop module=interaction status=noop reason=bad_payload");
        return DropOutcome::Rejected;
    };
    drop_payload(store, &payload, target_column_id)
}

/// Handles an already decoded drag payload dropped onto `target_column_id`.
pub fn drop_payload<S: KvStore>(
    store: &mut BoardStore<S>,
    payload: &DragPayload,
    target_column_id: &str,
) -> DropOutcome {
    if payload.source_column_id == target_column_id {
        return DropOutcome::SameColumn;
    }
    match store.move_task(&payload.task_id, target_column_id) {
        Some(moved) => DropOutcome::Moved(moved),
        None => DropOutcome::Ignored,
    }
}

/// Columns offered in a task's "move to" menu, in board order.
///
/// Empty when the task is unknown.
pub fn move_targets<'b>(board: &'b Board, task_id: &str) -> Vec<&'b Column> {
    let Some((current, _)) = board.locate_task(task_id) else {
        return Vec::new();
    };
    board
        .columns()
        .iter()
        .filter(|column| column.id != current.id)
        .collect()
}

/// Whether front ends should offer column removal.
///
/// The last remaining column is kept so new tasks always have a home.
pub fn can_remove_columns(board: &Board) -> bool {
    board.len() > 1
}

#[cfg(test)]
mod tests {
    use super::DragPayload;

    #[test]
    fn decode_uses_camel_case_keys() {
        let payload = DragPayload::decode(r#"{"taskId":"t1","sourceColumnId":"2"}"#).unwrap();
        assert_eq!(payload.task_id, "t1");
        assert_eq!(payload.source_column_id, "2");
    }

    #[test]
    fn decode_rejects_partial_payloads() {
        assert!(DragPayload::decode(r#"{"taskId":"t1"}"#).is_none());
        assert!(DragPayload::decode(r#"{"taskId":"","sourceColumnId":"2"}"#).is_none());
        assert!(DragPayload::decode("plain text").is_none());
    }
}
