mod support;

use predicates::str::contains;

use support::TestBoard;

#[test]
fn op_list_shows_journaled_mutations_newest_first() {
    let board = TestBoard::new();
    board.add_task(&["first"]);
    board.add_task(&["second"]);

    let value = board.json(&["op", "list"]);
    let records = value["data"].as_array().expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["command"].as_str(), Some("task add second"));
    assert_eq!(records[1]["command"].as_str(), Some("task add first"));

    let value = board.json(&["op", "list", "--limit", "1"]);
    assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
}

#[test]
fn undo_removes_the_created_task() {
    let board = TestBoard::new();
    let id = board.add_task(&["Oops"]);

    let value = board.json(&["undo"]);
    assert_eq!(value["command"].as_str(), Some("undo"));
    assert_eq!(
        value["data"]["removed_tasks"][0].as_str(),
        Some(id.as_str())
    );

    let value = board.json(&["task", "list"]);
    assert_eq!(value["data"].as_array().map(Vec::len), Some(0));
}

#[test]
fn undo_restores_a_moved_task() {
    let board = TestBoard::new();
    let id = board.add_task(&["Shuffle", "--status", "planned"]);
    board.json(&["task", "move", &id, "done"]);

    board.json(&["undo"]);
    let value = board.json(&["task", "list"]);
    assert_eq!(value["data"][0]["status"].as_str(), Some("planned"));
}

#[test]
fn undo_twice_redoes() {
    let board = TestBoard::new();
    board.add_task(&["Flip"]);

    board.json(&["undo"]);
    let value = board.json(&["task", "list"]);
    assert_eq!(value["data"].as_array().map(Vec::len), Some(0));

    board.json(&["undo"]);
    let value = board.json(&["task", "list"]);
    assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
}

#[test]
fn undo_specific_operation_by_id() {
    let board = TestBoard::new();
    let keep = board.add_task(&["keep"]);
    let drop = board.add_task(&["drop"]);

    let value = board.json(&["op", "list"]);
    let records = value["data"].as_array().expect("records");
    let target = records
        .iter()
        .find(|record| record["command"].as_str() == Some("task add drop"))
        .and_then(|record| record["op_id"].as_str())
        .expect("op id")
        .to_string();

    board.json(&["undo", "--op", &target]);
    let value = board.json(&["task", "list"]);
    let tasks = value["data"].as_array().expect("tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"].as_str(), Some(keep.as_str()));
    assert_ne!(tasks[0]["id"].as_str(), Some(drop.as_str()));
}

#[test]
fn undo_rejects_malformed_op_id() {
    let board = TestBoard::new();
    board.add_task(&["anything"]);
    board
        .cmd()
        .args(["undo", "--op", "not-a-uuid"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("invalid operation id"));
}

#[test]
fn undo_with_empty_log_fails() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["undo"])
        .assert()
        .failure()
        .code(4)
        .stderr(contains("no undoable operations"));
}
