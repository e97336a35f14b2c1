#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn tollgate(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tollgate").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TOLLGATE_CONFIG")
        .env_remove("TOLLGATE_PUBLIC_URL")
        .env_remove("TOLLGATE_ACCOUNT_ID")
        .env_remove("TOLLGATE_NOTIFY_ENDPOINT")
        .env_remove("TOLLGATE_LOG_LEVEL")
        .env_remove("TOLLGATE_LOG_FORMAT");
    cmd
}

fn write(dir: &TempDir, name: &str, value: &Value) -> String {
    std::fs::write(dir.path().join(name), value.to_string()).unwrap();
    name.to_owned()
}

fn node(dir: &TempDir) -> String {
    write(
        dir,
        "node.json",
        &json!({
            "subject": "Deploy v2",
            "message": "Ship it?",
            "actions": [{"name": "Approve"}, {"name": "Decline"}]
        }),
    )
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// tollgate outputs
// ---------------------------------------------------------------------------

#[test]
fn outputs_lists_lanes_with_fallback_names() {
    let dir = TempDir::new().unwrap();
    let params = write(
        &dir,
        "node.json",
        &json!({"actions": [{"name": "Approve"}, {}, {"name": "Decline"}]}),
    );

    let output = tollgate(&dir).args(["outputs", &params]).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!([
            {"index": 0, "displayName": "Approve"},
            {"index": 1, "displayName": "Action 1"},
            {"index": 2, "displayName": "Decline"},
        ])
    );
}

#[test]
fn outputs_without_actions_is_empty() {
    let dir = TempDir::new().unwrap();
    let params = write(&dir, "node.json", &json!({}));
    let output = tollgate(&dir).args(["outputs", &params]).output().unwrap();
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn outputs_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    tollgate(&dir)
        .args(["outputs", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read nope.json"));
}

// ---------------------------------------------------------------------------
// tollgate run
// ---------------------------------------------------------------------------

#[test]
fn run_routes_decline_to_second_lane() {
    let dir = TempDir::new().unwrap();
    let params = node(&dir);
    let input = write(&dir, "items.json", &json!([{"ticket": 17}]));
    let callback = write(&dir, "cb.json", &json!({"action": "Decline", "reason": "risk"}));

    let output = tollgate(&dir)
        .args(["--account-id", "acct-42", "--public-url", "https://hooks.example.com"])
        .args(["run", &params, "--input", &input, "--callback", &callback])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report = stdout_json(&output);
    assert_eq!(report["acknowledgement"], "OK");
    assert_eq!(
        report["outputs"],
        json!([[], [{"json": {"action": "Decline", "reason": "risk"}, "paired_item": {"item": 0}}]])
    );
    assert_eq!(report["request"]["accountId"], "acct-42");
    assert_eq!(report["request"]["subject"], "Deploy v2");
    assert!(
        report["request"]["callbackAddress"]
            .as_str()
            .unwrap()
            .starts_with("https://hooks.example.com/webhook-waiting/")
    );
}

#[test]
fn run_reads_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tollgate.toml"),
        "account_id = \"from-file\"\npublic_url = \"https://cfg.example.com\"\n",
    )
    .unwrap();
    let params = node(&dir);
    let callback = write(&dir, "cb.json", &json!({"action": "Approve"}));

    let output = tollgate(&dir)
        .args(["run", &params, "--callback", &callback])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report = stdout_json(&output);
    assert_eq!(report["request"]["accountId"], "from-file");
    assert!(
        report["request"]["callbackAddress"]
            .as_str()
            .unwrap()
            .starts_with("https://cfg.example.com/webhook-waiting/")
    );
    assert_eq!(report["outputs"][1], json!([]));
}

#[test]
fn env_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tollgate.toml"), "account_id = \"from-file\"\n").unwrap();
    let params = node(&dir);
    let callback = write(&dir, "cb.json", &json!({"action": "Approve"}));

    let output = tollgate(&dir)
        .env("TOLLGATE_ACCOUNT_ID", "from-env")
        .args(["run", &params, "--callback", &callback])
        .output()
        .unwrap();

    assert_eq!(stdout_json(&output)["request"]["accountId"], "from-env");
}

#[test]
fn run_unknown_action_fails() {
    let dir = TempDir::new().unwrap();
    let params = node(&dir);
    let callback = write(&dir, "cb.json", &json!({"action": "Escalate"}));

    tollgate(&dir)
        .args(["--account-id", "acct", "run", &params, "--callback", &callback])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Escalate"));
}

#[test]
fn run_missing_action_fails() {
    let dir = TempDir::new().unwrap();
    let params = node(&dir);
    let callback = write(&dir, "cb.json", &json!({"note": "oops"}));

    tollgate(&dir)
        .args(["--account-id", "acct", "run", &params, "--callback", &callback])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no `action` field"));
}

#[test]
fn run_without_account_fails() {
    let dir = TempDir::new().unwrap();
    let params = node(&dir);
    let callback = write(&dir, "cb.json", &json!({"action": "Approve"}));

    tollgate(&dir)
        .args(["run", &params, "--callback", &callback])
        .assert()
        .failure()
        .stderr(predicate::str::contains("account_id"));
}
