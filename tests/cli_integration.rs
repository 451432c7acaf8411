#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("stepify").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("STEPIFY_DB");
        cmd.env_remove("STEPIFY_LOG");
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

    fn load_task(&self, content: &str) -> Value {
        let p = self.dir.path().join("_task.json");
        fs::write(&p, content).expect("write task file");
        let output = self
            .cmd()
            .args(["task", "load", "--json"])
            .pipe_stdin(&p)
            .unwrap()
            .output()
            .expect("task load");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn create_task(&self, title: &str) -> String {
        let v = self.run_ok(&["task", "create", title]);
        v["data"]["task"]["id"].as_str().unwrap().to_string()
    }
}

fn setup() -> TestEnv {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env
}

// ─── 1. init ───────────────────────────────────────────────────────

#[test]
fn test_init() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    let path = v["data"]["path"].as_str().unwrap();
    assert!(path.ends_with(".stepify/stepify.db"));
    assert!(PathBuf::from(path).exists());
    let config = v["data"]["config"].as_str().unwrap();
    let written: Value = serde_json::from_str(&fs::read_to_string(config).unwrap()).unwrap();
    assert_eq!(written["soft_delete"], true);
}

#[test]
fn test_init_idempotent() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["init"]);
    assert!(v["data"]["path"].as_str().unwrap().contains("stepify.db"));
}

#[test]
fn test_init_required_before_commands() {
    let env = TestEnv::new();
    let v = env.run_err(&["task", "list"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
}

#[test]
fn test_workspace_found_from_subdirectory() {
    let env = setup();
    let id = env.create_task("Top level");
    let sub = env.dir.path().join("nested").join("deeper");
    fs::create_dir_all(&sub).unwrap();

    let output = env
        .cmd()
        .current_dir(&sub)
        .args(["task", "show", &id, "--json"])
        .output()
        .unwrap();
    let v: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["data"]["task"]["title"], "Top level");
}

#[test]
fn test_db_override() {
    let env = TestEnv::new();
    let db = env.dir.path().join("custom.db");
    let db = db.to_str().unwrap();
    env.run_ok(&["init", "--db", db]);
    env.run_ok(&["task", "create", "Elsewhere", "--db", db]);

    let v = env.run_ok(&["task", "list", "--db", db]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 1);
    assert!(PathBuf::from(db).exists());
}

// ─── 2. task create / list / show ──────────────────────────────────

#[test]
fn test_task_create_with_flags() {
    let env = setup();
    let v = env.run_ok(&[
        "task", "create", "Write report",
        "--description", "quarterly",
        "--status", "in_progress",
        "--priority", "high",
        "--due", "2024-06-01T12:00:00Z",
        "--micro", "outline",
        "--micro", "draft",
    ]);
    let task = &v["data"]["task"];
    assert_eq!(task["title"], "Write report");
    assert_eq!(task["description"], "quarterly");
    assert_eq!(task["status"], "IN_PROGRESS");
    assert_eq!(task["priority"], "HIGH");
    assert_eq!(task["dueDate"], "2024-06-01T12:00:00Z");
    let micro = task["microTasks"].as_array().unwrap();
    assert_eq!(micro.len(), 2);
    assert_eq!(micro[0]["title"], "outline");
    assert_eq!(micro[1]["title"], "draft");
    assert!(micro[0]["id"].is_string());
    assert!(micro[0]["createdAt"].is_string());
    assert_ne!(micro[0]["id"], micro[1]["id"]);
}

#[test]
fn test_task_load_from_stdin() {
    let env = setup();
    let v = env.load_task(
        &serde_json::json!({
            "title": "Launch",
            "priority": "URGENT",
            "microTasks": [
                {"title": "first", "order": 2},
                {"title": "second", "order": 1}
            ]
        })
        .to_string(),
    );
    assert_eq!(v["success"], true, "{v}");
    let micro = v["data"]["task"]["microTasks"].as_array().unwrap();
    assert_eq!(micro[0]["title"], "first");
    assert_eq!(micro[0]["order"], 2);
    assert_eq!(micro[1]["title"], "second");
}

#[test]
fn test_task_load_invalid_json() {
    let env = setup();
    let v = env.load_task("{ nope");
    assert_eq!(v["success"], false);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_task_create_blank_title() {
    let env = setup();
    let v = env.run_err(&["task", "create", "   "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_task_create_bad_status() {
    let env = setup();
    let v = env.run_err(&["task", "create", "x", "--status", "someday"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_ok(&["task", "list"]);
    assert!(v["data"]["tasks"].as_array().unwrap().is_empty());
}

#[test]
fn test_task_list_and_show() {
    let env = setup();
    let a = env.create_task("Alpha");
    let b = env.create_task("Beta");

    let v = env.run_ok(&["task", "list"]);
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"], a.as_str());
    assert_eq!(tasks[1]["id"], b.as_str());

    let v = env.run_ok(&["task", "show", &b]);
    assert_eq!(v["data"]["task"]["title"], "Beta");
}

#[test]
fn test_task_show_missing() {
    let env = setup();
    let v = env.run_err(&["task", "show", "01NOPE"]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
    assert_eq!(
        v["error"]["message"],
        "Task with ID: 01NOPE not found while searching"
    );
}

// ─── 3. task update ────────────────────────────────────────────────

#[test]
fn test_task_update_only_changes_given_flags() {
    let env = setup();
    let v = env.run_ok(&[
        "task", "create", "Keep", "--description", "original", "--status", "pending",
        "--priority", "low",
    ]);
    let id = v["data"]["task"]["id"].as_str().unwrap().to_string();

    let v = env.run_ok(&["task", "update", &id, "--priority", "high"]);
    let task = &v["data"]["task"];
    assert_eq!(task["title"], "Keep");
    assert_eq!(task["description"], "original");
    assert_eq!(task["status"], "PENDING");
    assert_eq!(task["priority"], "HIGH");
}

#[test]
fn test_task_update_clear_fields() {
    let env = setup();
    let v = env.run_ok(&[
        "task", "create", "Clearable", "--description", "text", "--status", "pending",
    ]);
    let id = v["data"]["task"]["id"].as_str().unwrap().to_string();

    let v = env.run_ok(&[
        "task", "update", &id, "--clear", "status", "--clear", "description",
        "--completed", "2024-01-02T03:04:05Z",
    ]);
    let task = &v["data"]["task"];
    assert_eq!(task["title"], "Clearable");
    assert!(task["status"].is_null());
    assert!(task["description"].is_null());
    assert_eq!(task["completedAt"], "2024-01-02T03:04:05Z");
}

#[test]
fn test_task_update_set_and_clear_conflict() {
    let env = setup();
    let id = env.create_task("Conflict");
    let v = env.run_err(&["task", "update", &id, "--status", "pending", "--clear", "status"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

// ─── 4. task delete ────────────────────────────────────────────────

#[test]
fn test_task_delete_hides_task() {
    let env = setup();
    let keep = env.create_task("Keep");
    let gone = env.create_task("Gone");

    env.run_ok(&["task", "delete", &gone]);

    let v = env.run_ok(&["task", "list"]);
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], keep.as_str());

    let v = env.run_err(&["task", "show", &gone]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
    let v = env.run_err(&["task", "update", &gone, "--title", "back"]);
    assert!(v["error"]["message"].as_str().unwrap().ends_with("while updating"));
    let v = env.run_err(&["task", "delete", &gone]);
    assert!(v["error"]["message"].as_str().unwrap().ends_with("while deleting"));
}

#[test]
fn test_physical_delete_config() {
    let env = setup();
    fs::write(
        env.dir.path().join(".stepify").join("config.json"),
        r#"{"soft_delete": false}"#,
    )
    .unwrap();
    let id = env.create_task("Temporary");
    env.run_ok(&["task", "delete", &id]);
    let v = env.run_err(&["task", "delete", &id]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
}

#[test]
fn test_bad_config_reported() {
    let env = setup();
    fs::write(env.dir.path().join(".stepify").join("config.json"), "{ broken").unwrap();
    let v = env.run_err(&["task", "list"]);
    assert_eq!(v["error"]["code"], "CONFIG_ERROR");
}

// ─── 5. embedded micro tasks ───────────────────────────────────────

#[test]
fn test_embedded_micro_lifecycle() {
    let env = setup();
    let v = env.run_ok(&["task", "create", "Parent", "--micro", "a", "--micro", "b"]);
    let task_id = v["data"]["task"]["id"].as_str().unwrap().to_string();
    let a = v["data"]["task"]["microTasks"][0]["id"].as_str().unwrap().to_string();
    let b = v["data"]["task"]["microTasks"][1]["id"].as_str().unwrap().to_string();

    let v = env.run_ok(&["task", "micro", "update", &task_id, &b, "--order", "5", "--title", " "]);
    let micro = v["data"]["task"]["microTasks"].as_array().unwrap();
    assert_eq!(micro[0]["id"], a.as_str());
    assert_eq!(micro[1]["id"], b.as_str());
    assert_eq!(micro[1]["order"], 5);
    assert_eq!(micro[1]["title"], "b");

    let v = env.run_ok(&["task", "micro", "remove", &task_id, &a]);
    let micro = v["data"]["task"]["microTasks"].as_array().unwrap();
    assert_eq!(micro.len(), 1);
    assert_eq!(micro[0]["id"], b.as_str());

    let v = env.run_ok(&["task", "micro", "add", &task_id, "c", "--status", "completed"]);
    let micro = v["data"]["task"]["microTasks"].as_array().unwrap();
    assert_eq!(micro.len(), 2);
    assert_eq!(micro[1]["title"], "c");
    assert_eq!(micro[1]["status"], "COMPLETED");
}

#[test]
fn test_embedded_micro_unknown_id() {
    let env = setup();
    let task_id = env.create_task("Parent");
    let v = env.run_err(&["task", "micro", "remove", &task_id, "ghost"]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
    assert_eq!(
        v["error"]["message"],
        "Micro task with ID: ghost not found while deleting microtask"
    );
}

// ─── 6. referenced micro tasks ─────────────────────────────────────

#[test]
fn test_referenced_micro_lifecycle() {
    let env = setup();
    let task_id = env.create_task("Owner");

    let v = env.run_ok(&["micro", "create", &task_id, "Check", "--order", "3"]);
    let micro = &v["data"]["microTask"];
    let micro_id = micro["id"].as_str().unwrap().to_string();
    assert_eq!(micro["taskId"], task_id.as_str());
    assert_eq!(micro["order"], 3);

    let v = env.run_ok(&["micro", "update", &micro_id, "--title", "Checked", "--status", "completed"]);
    assert_eq!(v["data"]["microTask"]["title"], "Checked");
    assert_eq!(v["data"]["microTask"]["status"], "COMPLETED");
    assert!(v["data"]["microTask"]["updatedAt"].is_string());

    let v = env.run_ok(&["micro", "list"]);
    assert_eq!(v["data"]["microTasks"].as_array().unwrap().len(), 1);

    env.run_ok(&["micro", "delete", &micro_id]);
    let v = env.run_ok(&["micro", "list"]);
    assert!(v["data"]["microTasks"].as_array().unwrap().is_empty());
    let v = env.run_err(&["micro", "show", &micro_id]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
}

#[test]
fn test_referenced_micro_requires_live_task() {
    let env = setup();
    let task_id = env.create_task("Short lived");
    env.run_ok(&["task", "delete", &task_id]);

    let v = env.run_err(&["micro", "create", &task_id, "Orphan"]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
    assert!(v["error"]["message"]
        .as_str()
        .unwrap()
        .ends_with("while creating microtask"));

    let v = env.run_ok(&["micro", "list"]);
    assert!(v["data"]["microTasks"].as_array().unwrap().is_empty());
}

// ─── 7. text output ────────────────────────────────────────────────

#[test]
fn test_text_output() {
    let env = setup();
    env.cmd()
        .args(["task", "create", "Plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task: Plain"));

    env.cmd()
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plain"));

    env.cmd()
        .args(["task", "show", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Task with ID: missing not found while searching"));
}

#[test]
fn test_empty_list_text() {
    let env = setup();
    env.cmd()
        .args(["micro", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No micro tasks found."));
}
