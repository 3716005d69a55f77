use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn pin_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pin").expect("Failed to find pin binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_empty_board() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    pin_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The board is empty."));
}

#[test]
fn test_cli_add_plan_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    pin_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "add",
            "Morning run",
            "--date",
            "2024-06-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("Morning run"));
}

#[test]
fn test_cli_plan_shows_on_board_as_virtual_card() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    pin_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "add",
            "Morning run",
            "--date",
            "2024-06-10",
        ])
        .assert()
        .success();

    pin_cmd()
        .args(["--database-file", db_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("plan-1"))
        .stdout(predicate::str::contains("Morning run"));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    pin_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_list_plans_with_range_filter() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    pin_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "add",
            "June plan",
            "--date",
            "2024-06-10",
        ])
        .assert()
        .success();
    pin_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "add",
            "July plan",
            "--date",
            "2024-07-10",
        ])
        .assert()
        .success();

    pin_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "list",
            "--from",
            "2024-07-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("July plan"))
        .stdout(predicate::str::contains("June plan").not());
}

#[test]
fn test_cli_complete_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    pin_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "add",
            "Finish taxes",
            "--date",
            "2024-06-10",
        ])
        .assert()
        .success();

    pin_cmd()
        .args(["--database-file", db_arg, "plan", "complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated plan with ID: 1"))
        .stdout(predicate::str::contains("Marked completed"));
}

#[test]
fn test_cli_add_card_and_show_board() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    pin_cmd()
        .args(["--database-file", db_arg, "card", "add", "Sketch UI"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created card with ID: 1"));

    pin_cmd()
        .args(["--database-file", db_arg, "board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inbox (1)"))
        .stdout(predicate::str::contains("Sketch UI"));
}

#[test]
fn test_cli_move_card_between_columns() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    pin_cmd()
        .args(["--database-file", db_arg, "card", "add", "Sketch UI"])
        .assert()
        .success();

    pin_cmd()
        .args([
            "--database-file",
            db_arg,
            "card",
            "move",
            "1",
            "in-progress",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("in-progress (1)"));
}

#[test]
fn test_cli_delete_card() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    pin_cmd()
        .args(["--database-file", db_arg, "card", "add", "Disposable"])
        .assert()
        .success();

    pin_cmd()
        .args(["--database-file", db_arg, "card", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted card 'Disposable' (ID: 1)"));

    pin_cmd()
        .args(["--database-file", db_arg, "board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The board is empty."));
}

#[test]
fn test_cli_unscheduling_virtual_card_promotes_it() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    pin_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "add",
            "Refactor importer",
            "--date",
            "2024-06-10",
        ])
        .assert()
        .success();

    // The output names the promoted card's real id, not the stale
    // plan-1 key
    pin_cmd()
        .args([
            "--database-file",
            db_arg,
            "card",
            "update",
            "plan-1",
            "--clear-schedule",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated card with ID: 1"))
        .stdout(predicate::str::contains("Updated card with ID: plan-1").not());

    // The plan is gone; the task survives as a real card
    pin_cmd()
        .args(["--database-file", db_arg, "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
    pin_cmd()
        .args(["--database-file", db_arg, "board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Refactor importer"))
        .stdout(predicate::str::contains("plan-1").not());
}

#[test]
fn test_cli_invalid_card_key_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    pin_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "card",
            "delete",
            "not-a-key",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid card key"));
}
