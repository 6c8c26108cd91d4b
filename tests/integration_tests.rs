//! Integration tests for the dynaform CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a dynaform command with logging and color pinned down
fn dynaform() -> Command {
    let mut cmd = Command::cargo_bin("dynaform").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("DYNAFORM_LOG")
        .env_remove("DYNAFORM_DATABASE")
        .env_remove("DYNAFORM_ARRAY_MATCHING")
        .env_remove("DYNAFORM_FORMAT");
    cmd
}

/// Helper to create a test project in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    dynaform().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Helper to run a command in quiet mode and return the single id it prints
fn quiet_id(tmp: &TempDir, args: &[&str]) -> String {
    let output = dynaform()
        .current_dir(tmp.path())
        .arg("-q")
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Helper to create the Visitor template used throughout
fn create_visitor_template(tmp: &TempDir) -> String {
    quiet_id(
        tmp,
        &[
            "template",
            "new",
            "--name",
            "Visitor",
            "--field",
            "fullName:string:required",
            "--field",
            "age:number",
            "--field",
            "tags:array",
        ],
    )
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    dynaform()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("form template"))
        .stdout(predicate::str::contains("submit"));
}

#[test]
fn test_version_displays() {
    dynaform()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dynaform"));
}

#[test]
fn test_unknown_command_fails() {
    dynaform().arg("frobnicate").assert().failure();
}

#[test]
fn test_completions_bash() {
    dynaform()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dynaform"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_project_structure() {
    let tmp = TempDir::new().unwrap();
    dynaform()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized dynaform project"));

    assert!(tmp.path().join(".dynaform").is_dir());
    assert!(tmp.path().join(".dynaform/config.yaml").is_file());
    assert!(tmp.path().join(".dynaform/forms.db").is_file());
}

#[test]
fn test_init_twice_reports_existing() {
    let tmp = setup_test_project();
    dynaform()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_command_outside_project_fails() {
    let tmp = TempDir::new().unwrap();
    dynaform()
        .current_dir(tmp.path())
        .args(["template", "list"])
        .assert()
        .failure();
}

// ============================================================================
// Template Tests
// ============================================================================

#[test]
fn test_template_new_inline_fields() {
    let tmp = setup_test_project();
    dynaform()
        .current_dir(tmp.path())
        .args([
            "template",
            "new",
            "--name",
            "Visitor",
            "--field",
            "fullName:string:required",
            "--field",
            "age:number",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created form template TPL-"))
        .stdout(predicate::str::contains("2 field(s)"));
}

#[test]
fn test_template_new_from_yaml_file() {
    let tmp = setup_test_project();
    let definition = tmp.path().join("visitor.yaml");
    fs::write(
        &definition,
        r#"
name: Visitor
fields:
  - name: fullName
    type: string
    required: true
  - name: subscribed
    type: boolean
"#,
    )
    .unwrap();

    let id = quiet_id(&tmp, &["template", "new", "--file", definition.to_str().unwrap()]);
    assert!(id.starts_with("TPL-"));

    dynaform()
        .current_dir(tmp.path())
        .args(["template", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Visitor"))
        .stdout(predicate::str::contains("subscribed"))
        .stdout(predicate::str::contains("boolean"));
}

#[test]
fn test_template_new_rejects_unknown_type() {
    let tmp = setup_test_project();
    dynaform()
        .current_dir(tmp.path())
        .args(["template", "new", "--name", "Event", "--field", "when:date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid field type: date"));

    // Nothing was stored
    dynaform()
        .current_dir(tmp.path())
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No form templates found"));
}

#[test]
fn test_template_file_with_non_string_type() {
    let tmp = setup_test_project();
    let definition = tmp.path().join("odd.yaml");
    fs::write(
        &definition,
        "name: Odd\nfields:\n  - name: count\n    type: 1\n",
    )
    .unwrap();

    dynaform()
        .current_dir(tmp.path())
        .args(["template", "new", "--file", definition.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid field type: 1"));
}

#[test]
fn test_template_new_rejects_duplicate_field_names() {
    let tmp = setup_test_project();
    dynaform()
        .current_dir(tmp.path())
        .args([
            "template", "new", "--name", "Dup", "--field", "a:string", "--field", "a:number",
        ])
        .assert()
        .failure();
}

#[test]
fn test_template_show_json_envelope() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    let output = dynaform()
        .current_dir(tmp.path())
        .args(["template", "show", &id, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["message"], "Form template retrieved successfully");
    assert_eq!(parsed["data"]["id"], id.as_str());
    assert_eq!(parsed["data"]["name"], "Visitor");
    assert_eq!(parsed["data"]["fields"][0]["name"], "fullName");
    assert_eq!(parsed["data"]["fields"][0]["type"], "string");
    assert_eq!(parsed["data"]["fields"][0]["required"], true);
}

#[test]
fn test_template_show_unknown_id() {
    let tmp = setup_test_project();
    let missing = "TPL-01ARZ3NDEKTSV4RRFFQ69G5FAV";
    dynaform()
        .current_dir(tmp.path())
        .args(["template", "show", missing])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "Form template not found for ID: {missing}"
        )));
}

#[test]
fn test_template_show_malformed_id() {
    let tmp = setup_test_project();
    dynaform()
        .current_dir(tmp.path())
        .args(["template", "show", "not-an-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Form template not found").not());
}

#[test]
fn test_template_list_ids() {
    let tmp = setup_test_project();
    let first = create_visitor_template(&tmp);
    let second = quiet_id(&tmp, &["template", "new", "--name", "Empty", "--field", "note:string"]);

    dynaform()
        .current_dir(tmp.path())
        .args(["template", "list", "--format", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains(first.as_str()))
        .stdout(predicate::str::contains(second.as_str()));
}

// ============================================================================
// Submit Tests
// ============================================================================

#[test]
fn test_submit_valid_record() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    dynaform()
        .current_dir(tmp.path())
        .args(["submit", &id, "--data", r#"{"fullName": "Ana", "age": 30}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submitted SUB-"));
}

#[test]
fn test_submit_json_envelope_echoes_data() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    let output = dynaform()
        .current_dir(tmp.path())
        .args([
            "submit",
            &id,
            "--data",
            r#"{"fullName": "Ana", "age": 30}"#,
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["message"], "Form data submitted successfully");
    assert_eq!(parsed["data"]["template_id"], id.as_str());
    assert_eq!(parsed["data"]["data"]["fullName"], "Ana");
    assert_eq!(parsed["data"]["data"]["age"], 30);
}

#[test]
fn test_submit_extra_keys_rejected() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    dynaform()
        .current_dir(tmp.path())
        .args(["submit", &id, "--data", r#"{"fullName": "Ana", "extra": 1}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Extra keys found: extra"));
}

#[test]
fn test_submit_missing_required_field() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    dynaform()
        .current_dir(tmp.path())
        .args(["submit", &id, "--data", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required field: fullName"));
}

#[test]
fn test_submit_type_mismatch() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    dynaform()
        .current_dir(tmp.path())
        .args(["submit", &id, "--data", r#"{"fullName": "Ana", "age": "30"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid type for field age. Expected number",
        ));
}

#[test]
fn test_submit_array_field_sequence_mode() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    dynaform()
        .current_dir(tmp.path())
        .args(["submit", &id, "--data", r#"{"fullName": "Ana", "tags": ["a"]}"#])
        .assert()
        .success();
}

#[test]
fn test_submit_array_field_legacy_mode() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    dynaform()
        .current_dir(tmp.path())
        .env("DYNAFORM_ARRAY_MATCHING", "legacy")
        .args(["submit", &id, "--data", r#"{"fullName": "Ana", "tags": ["a"]}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid type for field tags. Expected array",
        ));
}

#[test]
fn test_submit_non_object_record_rejected() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    dynaform()
        .current_dir(tmp.path())
        .args(["submit", &id, "--data", "[1, 2]"])
        .assert()
        .failure();
}

#[test]
fn test_submit_unknown_template() {
    let tmp = setup_test_project();
    let missing = "TPL-01ARZ3NDEKTSV4RRFFQ69G5FAV";

    dynaform()
        .current_dir(tmp.path())
        .args(["submit", missing, "--data", r#"{"fullName": "Ana"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "Form template not found for ID: {missing}"
        )));
}

#[test]
fn test_submit_from_file() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);
    let record = tmp.path().join("record.json");
    fs::write(&record, r#"{"fullName": "Ana", "age": 41}"#).unwrap();

    let sub_id = quiet_id(&tmp, &["submit", &id, "--file", record.to_str().unwrap()]);
    assert!(sub_id.starts_with("SUB-"));
}

#[test]
fn test_submit_check_does_not_store() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);

    dynaform()
        .current_dir(tmp.path())
        .args(["submit", &id, "--check", "--data", r#"{"fullName": "Ana"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record is valid"));

    dynaform()
        .current_dir(tmp.path())
        .args(["submission", "list", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions found"));
}

// ============================================================================
// Submission Tests
// ============================================================================

#[test]
fn test_submission_show_and_list() {
    let tmp = setup_test_project();
    let id = create_visitor_template(&tmp);
    let sub_id = quiet_id(&tmp, &["submit", &id, "--data", r#"{"fullName": "Ana"}"#]);

    dynaform()
        .current_dir(tmp.path())
        .args(["submission", "show", &sub_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("fullName"))
        .stdout(predicate::str::contains("Ana"));

    dynaform()
        .current_dir(tmp.path())
        .args(["submission", "list", &id, "--format", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains(sub_id.as_str()));
}

#[test]
fn test_project_flag_from_other_directory() {
    let tmp = setup_test_project();
    let elsewhere = TempDir::new().unwrap();

    dynaform()
        .current_dir(elsewhere.path())
        .args(["--project", tmp.path().to_str().unwrap(), "template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No form templates found"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_malformed_project_config_is_reported() {
    let tmp = setup_test_project();
    fs::write(
        tmp.path().join(".dynaform/config.yaml"),
        "database: data/forms.db\narray_matching: legacyy\n",
    )
    .unwrap();

    dynaform()
        .current_dir(tmp.path())
        .args(["template", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.yaml"));
}

#[test]
fn test_project_config_database_is_honored() {
    let tmp = setup_test_project();
    fs::write(
        tmp.path().join(".dynaform/config.yaml"),
        "database: data/forms.db\narray_matching: legacy\n",
    )
    .unwrap();

    create_visitor_template(&tmp);
    assert!(tmp.path().join("data/forms.db").is_file());
}

#[test]
fn test_bad_array_matching_env_is_reported() {
    let tmp = setup_test_project();
    dynaform()
        .current_dir(tmp.path())
        .env("DYNAFORM_ARRAY_MATCHING", "legacyy")
        .args(["template", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DYNAFORM_ARRAY_MATCHING"));
}
