use serde_json::json;
use taskboard_core::{Board, BoardValidationError, Column, Task};

fn sample_board() -> Board {
    Board::seeded(["To Do", "In Progress", "Done"])
}

#[test]
fn seeded_board_uses_positional_ids() {
    let board = sample_board();

    let ids: Vec<&str> = board.columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert!(board.columns().iter().all(|c| c.tasks.is_empty()));
}

#[test]
fn add_column_trims_title_and_generates_unique_ids() {
    let mut board = sample_board();

    let first = board.add_column("  Backlog ").unwrap();
    let second = board.add_column("Backlog").unwrap();

    assert_ne!(first, second);
    assert_eq!(board.column(&first).unwrap().title, "Backlog");
    assert_eq!(board.len(), 5);
}

#[test]
fn add_task_appends_in_order_and_sets_column_id() {
    let mut board = sample_board();

    let a = board.add_task("1", "first", "").unwrap();
    let b = board.add_task("1", "second", "details").unwrap();

    let column = board.column("1").unwrap();
    let ids: Vec<&str> = column.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, [a.as_str(), b.as_str()]);
    assert!(column.tasks.iter().all(|t| t.column_id == "1"));
    assert_eq!(column.tasks[1].description, "details");
}

#[test]
fn add_task_rejects_blank_title_and_unknown_column() {
    let mut board = sample_board();

    assert!(board.add_task("1", "   ", "desc").is_none());
    assert!(board.add_task("missing", "title", "").is_none());
    assert_eq!(board, sample_board());
}

#[test]
fn move_task_appends_to_target_end() {
    let mut board = sample_board();
    let existing = board.add_task("2", "already there", "").unwrap();
    let moving = board.add_task("1", "mover", "").unwrap();

    let moved = board.move_task(&moving, "2").unwrap();

    assert_eq!(moved.from_column_id, "1");
    assert_eq!(moved.to_column_id, "2");
    let target = board.column("2").unwrap();
    assert_eq!(target.tasks[0].id, existing);
    assert_eq!(target.tasks[1].id, moving);
    assert_eq!(target.tasks[1].column_id, "2");
}

#[test]
fn move_task_to_same_column_is_rejected() {
    let mut board = sample_board();
    let task_id = board.add_task("1", "stay", "").unwrap();
    let before = board.clone();

    assert!(board.move_task(&task_id, "1").is_none());
    assert_eq!(board, before);
}

#[test]
fn delete_column_drops_its_tasks() {
    let mut board = sample_board();
    board.add_task("2", "gone", "").unwrap();
    let kept = board.add_task("1", "kept", "").unwrap();

    let removed = board.delete_column("2").unwrap();

    assert_eq!(removed.tasks.len(), 1);
    assert_eq!(board.task_count(), 1);
    assert!(board.locate_task(&kept).is_some());
    assert!(board
        .columns()
        .iter()
        .flat_map(|c| &c.tasks)
        .all(|t| t.column_id != "2"));
}

#[test]
fn board_serializes_as_flat_column_array() {
    let column = Column {
        id: "9".to_string(),
        title: "Review".to_string(),
        tasks: vec![Task {
            id: "t1".to_string(),
            title: "Write spec".to_string(),
            description: String::new(),
            column_id: "9".to_string(),
        }],
    };
    let board = Board::new(vec![Column::with_id("1", "To Do"), column]);

    let value = serde_json::to_value(&board).unwrap();
    assert_eq!(
        value,
        json!([
            { "id": "1", "title": "To Do", "tasks": [] },
            {
                "id": "9",
                "title": "Review",
                "tasks": [
                    { "id": "t1", "title": "Write spec", "description": "", "columnId": "9" }
                ]
            }
        ])
    );
}

#[test]
fn board_deserializes_legacy_snapshot_with_extra_fields() {
    let text = r#"[
        {"id":"1","title":"To Do","tasks":[
            {"id":"1700000000000","title":"a","description":"d","columnId":"1","status":"normal"}
        ]},
        {"id":"2","title":"Done","tasks":[]}
    ]"#;

    let board: Board = serde_json::from_str(text).unwrap();

    assert!(board.validate().is_ok());
    let (column, task) = board.locate_task("1700000000000").unwrap();
    assert_eq!(column.id, "1");
    assert_eq!(task.description, "d");
}

#[test]
fn validate_rejects_duplicate_column_ids() {
    let board = Board::new(vec![Column::with_id("1", "A"), Column::with_id("1", "B")]);

    assert_eq!(
        board.validate().unwrap_err(),
        BoardValidationError::DuplicateColumnId("1".to_string())
    );
}
