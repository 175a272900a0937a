use taskboard_core::{
    can_remove_columns, drop_on_column, drop_payload, move_targets, Board, BoardRepository,
    BoardStore, DragPayload, DropOutcome, MemoryKvStore,
};

fn store_with_task(kv: &MemoryKvStore) -> (BoardStore<&MemoryKvStore>, String) {
    let mut store = BoardStore::open(BoardRepository::new(kv));
    let task_id = store.add_task("1", "drag me", "").unwrap();
    (store, task_id)
}

#[test]
fn drag_payload_round_trips_through_text() {
    let kv = MemoryKvStore::new();
    let (store, task_id) = store_with_task(&kv);
    let (_, task) = store.locate_task(&task_id).unwrap();

    let text = DragPayload::for_task(task).encode().unwrap();

    assert!(text.contains("\"sourceColumnId\":\"1\""));
    assert_eq!(DragPayload::decode(&text), Some(DragPayload::for_task(task)));
}

#[test]
fn drop_on_other_column_moves_task() {
    let kv = MemoryKvStore::new();
    let (mut store, task_id) = store_with_task(&kv);
    let text = format!(r#"{{"taskId":"{task_id}","sourceColumnId":"1"}}"#);

    let outcome = drop_on_column(&mut store, &text, "3");

    match outcome {
        DropOutcome::Moved(moved) => assert_eq!(moved.to_column_id, "3"),
        other => panic!("unexpected drop outcome: {other:?}"),
    }
    assert_eq!(store.locate_task(&task_id).unwrap().0.id, "3");
}

#[test]
fn drop_on_source_column_does_nothing() {
    let kv = MemoryKvStore::new();
    let (mut store, task_id) = store_with_task(&kv);
    let writes = kv.write_count();
    let payload = DragPayload {
        task_id,
        source_column_id: "1".to_string(),
    };

    assert_eq!(drop_payload(&mut store, &payload, "1"), DropOutcome::SameColumn);
    assert_eq!(kv.write_count(), writes);
}

#[test]
fn malformed_or_stale_drops_are_ignored() {
    let kv = MemoryKvStore::new();
    let (mut store, _) = store_with_task(&kv);
    let before = store.snapshot();

    assert_eq!(drop_on_column(&mut store, "not json", "2"), DropOutcome::Rejected);
    let stale = r#"{"taskId":"gone","sourceColumnId":"1"}"#;
    assert_eq!(drop_on_column(&mut store, stale, "2"), DropOutcome::Ignored);

    assert_eq!(*store.board(), *before);
}

#[test]
fn move_targets_excludes_current_column() {
    let kv = MemoryKvStore::new();
    let (store, task_id) = store_with_task(&kv);

    let targets: Vec<&str> = move_targets(store.board(), &task_id)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();

    assert_eq!(targets, ["2", "3"]);
    assert!(move_targets(store.board(), "unknown").is_empty());
}

#[test]
fn column_removal_is_offered_only_with_several_columns() {
    assert!(can_remove_columns(&Board::seeded(["A", "B"])));
    assert!(!can_remove_columns(&Board::seeded(["A"])));
}
