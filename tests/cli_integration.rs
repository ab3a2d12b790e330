use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        std::process::Command::new("git")
            .args(["init"])
            .current_dir(dir.path())
            .output()
            .expect("git init");
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sprintboard").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }
}

/// init + one project, returns the project id.
fn setup_project(env: &TestEnv) -> String {
    env.run_ok(&["init"]);
    let v = env.run_ok(&["project", "create", "Apollo"]);
    v["data"]["project"]["id"].as_str().unwrap().to_string()
}

/// init + project + in-progress sprint, returns (project_id, sprint_id).
fn setup_sprint(env: &TestEnv) -> (String, String) {
    let project = setup_project(env);
    let v = env.run_ok(&[
        "sprint", "create", &project, "Sprint 1", "--start", "2025-06-01", "--end", "2025-06-14",
    ]);
    let sprint = v["data"]["sprint"]["id"].as_str().unwrap().to_string();
    env.run_ok(&["sprint", "start", &sprint]);
    (project, sprint)
}

fn add_task(env: &TestEnv, sprint: &str, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["task", "add", sprint, title];
    args.extend_from_slice(extra);
    let v = env.run_ok(&args);
    v["data"]["task"]["id"].as_str().unwrap().to_string()
}

fn column_ids(board: &Value) -> Vec<String> {
    board["order"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap().to_string())
        .collect()
}

fn column_tasks(board: &Value, id: &str) -> Vec<String> {
    board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == id)
        .unwrap_or_else(|| panic!("no column {id}: {board}"))["task_ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap().to_string())
        .collect()
}

// ─── 1. init ───────────────────────────────────────────────────────

#[test]
fn test_init() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    let path = v["data"]["path"].as_str().unwrap();
    assert!(path.ends_with(".sprintboard/sprintboard.db"));
    assert!(PathBuf::from(path).exists());
}

#[test]
fn test_init_idempotent() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["init"]);
    assert!(v["data"]["path"].as_str().unwrap().contains("sprintboard.db"));
}

#[test]
fn test_init_required_before_commands() {
    let env = TestEnv::new();
    let v = env.run_err(&["project", "list"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
}

// ─── 2. projects ───────────────────────────────────────────────────

#[test]
fn test_project_crud() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);

    let v = env.run_ok(&[
        "project", "create", "Apollo", "--description", "moon", "--end-goal", "land",
    ]);
    let id = v["data"]["project"]["id"].as_str().unwrap().to_string();
    assert_eq!(v["data"]["project"]["title"], "Apollo");

    let v = env.run_ok(&["project", "list"]);
    assert_eq!(v["data"]["projects"].as_array().unwrap().len(), 1);

    let v = env.run_ok(&["project", "show", &id]);
    assert_eq!(v["data"]["project"]["description"], "moon");
    assert_eq!(v["data"]["project"]["end_goal"], "land");

    let v = env.run_ok(&["project", "delete", &id]);
    assert_eq!(v["data"]["deleted"]["title"], "Apollo");

    let v = env.run_ok(&["project", "list"]);
    assert_eq!(v["data"]["projects"].as_array().unwrap().len(), 0);
}

#[test]
fn test_project_not_found() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["project", "show", "nope"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
}

// ─── 3. sprints ────────────────────────────────────────────────────

#[test]
fn test_sprint_lifecycle() {
    let env = TestEnv::new();
    let project = setup_project(&env);

    let v = env.run_ok(&[
        "sprint", "create", &project, "Sprint 1", "--start", "2025-06-01", "--end", "2025-06-14",
    ]);
    let sprint = v["data"]["sprint"]["id"].as_str().unwrap().to_string();
    assert_eq!(v["data"]["sprint"]["status"], "planned");

    let v = env.run_ok(&["sprint", "start", &sprint]);
    assert_eq!(v["data"]["sprint"]["status"], "in-progress");

    let v = env.run_ok(&["sprint", "complete", &sprint, "--yes"]);
    assert_eq!(v["data"]["sprint"]["status"], "completed");
}

#[test]
fn test_completed_sprint_is_immutable() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    env.run_ok(&["sprint", "complete", &sprint, "--yes"]);

    let v = env.run_err(&["sprint", "start", &sprint]);
    assert_eq!(v["error"]["code"], "SPRINT_COMPLETED");
    let v = env.run_err(&["sprint", "complete", &sprint, "--yes"]);
    assert_eq!(v["error"]["code"], "SPRINT_COMPLETED");
}

#[test]
fn test_sprint_complete_declined_without_yes() {
    // JSON mode is non-interactive: the "open tasks remain" question is
    // answered no, leaving the sprint untouched.
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    add_task(&env, &sprint, "Open task", &[]);

    let v = env.run_ok(&["sprint", "complete", &sprint]);
    assert_eq!(v["data"]["completed"], false);
    let v = env.run_ok(&["sprint", "show", &sprint]);
    assert_eq!(v["data"]["sprint"]["status"], "in-progress");
}

#[test]
fn test_sprint_date_validation() {
    let env = TestEnv::new();
    let project = setup_project(&env);
    let v = env.run_err(&[
        "sprint", "create", &project, "Bad", "--start", "2025-06-14", "--end", "2025-06-01",
    ]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&[
        "sprint", "create", &project, "Bad", "--start", "junk", "--end", "2025-06-01",
    ]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

// ─── 4. tasks ──────────────────────────────────────────────────────

#[test]
fn test_task_crud() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);

    let id = add_task(
        &env,
        &sprint,
        "Implement login",
        &["--points", "5", "--priority", "high", "--assignee", "ada"],
    );

    let v = env.run_ok(&["task", "show", &id]);
    assert_eq!(v["data"]["task"]["status"], "todo");
    assert_eq!(v["data"]["task"]["story_points"], 5);
    assert_eq!(v["data"]["task"]["priority"], "high");
    assert_eq!(v["data"]["task"]["assigned_to"], "ada");

    let v = env.run_ok(&["task", "edit", &id, "--title", "Implement SSO"]);
    assert_eq!(v["data"]["task"]["title"], "Implement SSO");

    let v = env.run_ok(&["task", "list", &sprint]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 1);

    let v = env.run_ok(&["task", "delete", &id, "--yes"]);
    assert!(v["data"]["deleted"].is_object());
    let v = env.run_err(&["task", "show", &id]);
    assert_eq!(v["error"]["code"], "TASK_NOT_FOUND");
}

#[test]
fn test_task_delete_declined_without_yes() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let id = add_task(&env, &sprint, "Keep me", &[]);

    let v = env.run_ok(&["task", "delete", &id]);
    assert_eq!(v["data"]["deleted"], false);
    env.run_ok(&["task", "show", &id]);
}

#[test]
fn test_task_validation() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);

    let v = env.run_err(&["task", "add", &sprint, "T", "--priority", "urgent"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "add", &sprint, "T", "--status", "Not A Slug"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "add", "nope", "T"]);
    assert_eq!(v["error"]["code"], "SPRINT_NOT_FOUND");
}

// ─── 5. board derivation ───────────────────────────────────────────

#[test]
fn test_board_default_columns() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let v = env.run_ok(&["board", "show", &sprint]);
    assert_eq!(
        column_ids(&v["data"]["board"]),
        vec!["todo", "in-progress", "done"]
    );
}

#[test]
fn test_board_discovers_custom_status() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "One", &[]);
    let t2 = add_task(&env, &sprint, "Two", &["--status", "in-progress"]);
    let t3 = add_task(&env, &sprint, "Three", &["--status", "custom-qa"]);

    let v = env.run_ok(&["board", "show", &sprint]);
    let board = &v["data"]["board"];
    assert_eq!(
        column_ids(board),
        vec!["todo", "in-progress", "done", "custom-qa"]
    );
    assert_eq!(column_tasks(board, "todo"), vec![t1]);
    assert_eq!(column_tasks(board, "in-progress"), vec![t2]);
    assert!(column_tasks(board, "done").is_empty());
    assert_eq!(column_tasks(board, "custom-qa"), vec![t3]);
}

// ─── 6. board moves ────────────────────────────────────────────────

#[test]
fn test_board_move_persists_status() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "One", &[]);
    add_task(&env, &sprint, "Two", &[]);

    let v = env.run_ok(&["board", "move", &t1, "in-progress"]);
    assert_eq!(v["data"]["moved"]["status_changed"], true);
    assert_eq!(
        column_tasks(&v["data"]["board"], "in-progress"),
        vec![t1.clone()]
    );

    let v = env.run_ok(&["task", "show", &t1]);
    assert_eq!(v["data"]["task"]["status"], "in-progress");
}

#[test]
fn test_board_same_column_reorder_keeps_status() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "One", &[]);
    let t2 = add_task(&env, &sprint, "Two", &[]);

    let v = env.run_ok(&["board", "move", &t1, "todo", "--index", "1"]);
    assert_eq!(v["data"]["moved"]["status_changed"], false);
    assert_eq!(
        column_tasks(&v["data"]["board"], "todo"),
        vec![t2, t1.clone()]
    );

    let v = env.run_ok(&["task", "show", &t1]);
    assert_eq!(v["data"]["task"]["status"], "todo");
}

#[test]
fn test_board_move_unknown_column() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "One", &[]);
    let v = env.run_err(&["board", "move", &t1, "nope"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_last_done_move_completes_sprint_with_yes() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "Only", &[]);

    let v = env.run_ok(&["board", "move", &t1, "done", "--yes"]);
    assert_eq!(v["data"]["effects"]["sprint_completed"], true);
    let v = env.run_ok(&["sprint", "show", &sprint]);
    assert_eq!(v["data"]["sprint"]["status"], "completed");
}

#[test]
fn test_last_done_move_declined_leaves_sprint_open() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "Only", &[]);

    // JSON mode without --yes declines the completion prompt.
    let v = env.run_ok(&["board", "move", &t1, "done"]);
    assert_eq!(v["data"]["effects"]["sprint_completed"], false);
    let v = env.run_ok(&["sprint", "show", &sprint]);
    assert_eq!(v["data"]["sprint"]["status"], "in-progress");
    // The task move itself still persisted.
    let v = env.run_ok(&["task", "show", &t1]);
    assert_eq!(v["data"]["task"]["status"], "done");
}

#[test]
fn test_no_completion_prompt_while_tasks_remain() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "One", &[]);
    add_task(&env, &sprint, "Two", &[]);

    let v = env.run_ok(&["board", "move", &t1, "done", "--yes"]);
    assert_eq!(v["data"]["effects"]["sprint_completed"], false);
    let v = env.run_ok(&["sprint", "show", &sprint]);
    assert_eq!(v["data"]["sprint"]["status"], "in-progress");
}

// ─── 7. column lifecycle ───────────────────────────────────────────

#[test]
fn test_column_add_and_conflict() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);

    let v = env.run_ok(&["board", "column", "add", &sprint, "Code Review"]);
    assert_eq!(v["data"]["added"]["id"], "code-review");
    let ids = column_ids(&v["data"]["board"]);
    assert_eq!(ids.last().unwrap(), "code-review");

    let v = env.run_err(&["board", "column", "add", &sprint, "Done"]);
    assert_eq!(v["error"]["code"], "COLUMN_CONFLICT");
}

#[test]
fn test_default_columns_cannot_be_removed() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    for id in ["todo", "in-progress", "done"] {
        let v = env.run_err(&["board", "column", "remove", &sprint, id]);
        assert_eq!(v["error"]["code"], "DEFAULT_COLUMN");
    }
}

#[test]
fn test_non_empty_column_cannot_be_removed() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    add_task(&env, &sprint, "QA task", &["--status", "qa"]);

    let v = env.run_err(&["board", "column", "remove", &sprint, "qa"]);
    assert_eq!(v["error"]["code"], "COLUMN_NOT_EMPTY");
}

// ─── 8. burndown ───────────────────────────────────────────────────

#[test]
fn test_burndown_add_then_complete() {
    let env = TestEnv::new();
    let (project, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "Pointed", &["--points", "5"]);
    add_task(&env, &sprint, "Open", &[]);

    let v = env.run_ok(&["burndown", &project]);
    let points = v["data"]["burndown"].as_array().unwrap();
    assert_eq!(points.len(), 21);
    assert!(points.iter().all(|p| p["ideal"] == 5));
    assert!(points.iter().all(|p| p["actual"] == 0));

    env.run_ok(&["board", "move", &t1, "done"]);

    let v = env.run_ok(&["burndown", &project]);
    let points = v["data"]["burndown"].as_array().unwrap();
    assert_eq!(points[0]["actual"], 5);
    assert!(points[1..].iter().all(|p| p["actual"] == 0));
    assert!(points.iter().all(|p| p["ideal"] == 5));
}

#[test]
fn test_burndown_remove_on_task_delete() {
    let env = TestEnv::new();
    let (project, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "Pointed", &["--points", "3"]);

    env.run_ok(&["task", "delete", &t1, "--yes"]);

    let v = env.run_ok(&["burndown", &project]);
    let points = v["data"]["burndown"].as_array().unwrap();
    assert!(points.iter().all(|p| p["ideal"] == 0));
}

#[test]
fn test_burndown_fresh_series_is_zeroed() {
    let env = TestEnv::new();
    let project = setup_project(&env);
    let v = env.run_ok(&["burndown", &project]);
    let points = v["data"]["burndown"].as_array().unwrap();
    assert_eq!(points.len(), 21);
    assert!(points.iter().all(|p| p["ideal"] == 0 && p["actual"] == 0));
}

#[test]
fn test_unpointed_tasks_never_touch_burndown() {
    let env = TestEnv::new();
    let (project, sprint) = setup_sprint(&env);
    let t1 = add_task(&env, &sprint, "No points", &[]);
    env.run_ok(&["board", "move", &t1, "done"]);

    let v = env.run_ok(&["burndown", &project]);
    let points = v["data"]["burndown"].as_array().unwrap();
    assert!(points.iter().all(|p| p["ideal"] == 0 && p["actual"] == 0));
}

// ─── 9. backlog ────────────────────────────────────────────────────

#[test]
fn test_backlog_add_and_list() {
    let env = TestEnv::new();
    let project = setup_project(&env);

    let v = env.run_ok(&["backlog", "add", &project, "Someday", "--points", "8"]);
    let id = v["data"]["task"]["id"].as_str().unwrap().to_string();
    assert_eq!(v["data"]["task"]["status"], "backlog");
    assert_eq!(v["data"]["task"]["sprint_id"], "backlog");

    let v = env.run_ok(&["backlog", "list", &project]);
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], id);

    // Backlog tasks do not commit points to the burndown yet.
    let v = env.run_ok(&["burndown", &project]);
    assert!(v["data"]["burndown"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["ideal"] == 0));
}

#[test]
fn test_backlog_move_schedules_as_todo() {
    let env = TestEnv::new();
    let (project, sprint) = setup_sprint(&env);
    let v = env.run_ok(&["backlog", "add", &project, "Soon", "--points", "8"]);
    let id = v["data"]["task"]["id"].as_str().unwrap().to_string();

    let v = env.run_ok(&["backlog", "move", &id, &sprint]);
    assert_eq!(v["data"]["task"]["status"], "todo");
    assert_eq!(v["data"]["task"]["sprint_id"], sprint);

    let v = env.run_ok(&["backlog", "list", &project]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 0);

    // Scheduling committed the points.
    let v = env.run_ok(&["burndown", &project]);
    assert!(v["data"]["burndown"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["ideal"] == 8));
}

#[test]
fn test_backlog_move_to_completed_sprint_rejected() {
    let env = TestEnv::new();
    let (project, sprint) = setup_sprint(&env);
    env.run_ok(&["sprint", "complete", &sprint, "--yes"]);
    let v = env.run_ok(&["backlog", "add", &project, "Late"]);
    let id = v["data"]["task"]["id"].as_str().unwrap().to_string();

    let v = env.run_err(&["backlog", "move", &id, &sprint]);
    assert_eq!(v["error"]["code"], "SPRINT_COMPLETED");
}

#[test]
fn test_board_move_rejects_backlog_task() {
    let env = TestEnv::new();
    let project = setup_project(&env);
    let v = env.run_ok(&["backlog", "add", &project, "Unscheduled"]);
    let id = v["data"]["task"]["id"].as_str().unwrap().to_string();

    let v = env.run_err(&["board", "move", &id, "done"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

// ─── 10. text output (non-json) ────────────────────────────────────

#[test]
fn test_text_output_init() {
    let env = TestEnv::new();
    env.cmd()
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized sprintboard at"));
}

#[test]
fn test_text_output_project_list() {
    let env = TestEnv::new();
    env.cmd().args(["init"]).assert().success();
    env.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found"));
}

#[test]
fn test_text_output_error() {
    let env = TestEnv::new();
    env.cmd()
        .args(["project", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn test_text_output_board() {
    let env = TestEnv::new();
    let (_, sprint) = setup_sprint(&env);
    env.cmd()
        .args(["task", "add", &sprint, "Visible task"])
        .assert()
        .success();
    env.cmd()
        .args(["board", "show", &sprint])
        .assert()
        .success()
        .stdout(predicate::str::contains("TO DO (1)"))
        .stdout(predicate::str::contains("Visible task"));
}
