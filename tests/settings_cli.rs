mod support;

use predicates::str::contains;

use support::TestBoard;

#[test]
fn settings_show_defaults() {
    let board = TestBoard::new();
    let value = board.json(&["settings", "show"]);
    assert_eq!(value["data"]["density"].as_str(), Some("cozy"));
    assert_eq!(value["data"]["show_done_column"].as_bool(), Some(true));
}

#[test]
fn settings_set_persists_changes() {
    let board = TestBoard::new();
    board.json(&[
        "settings",
        "set",
        "--density",
        "comfortable",
        "--show-done-column",
        "false",
    ]);

    let value = board.json(&["settings", "show"]);
    assert_eq!(value["data"]["density"].as_str(), Some("comfortable"));
    assert_eq!(value["data"]["show_done_column"].as_bool(), Some(false));
}

#[test]
fn settings_set_rejects_unknown_density() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["settings", "set", "--density", "dense"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown density"));
}

#[test]
fn settings_set_requires_a_change() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["settings", "set"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("nothing to change"));
}
