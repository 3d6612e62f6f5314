//! End-to-end tests for `confguard test`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const POLICY: &str = r#"
rules:
  - name: deny_privileged
    when:
      field: spec.privileged
      eq: true
    message: "privileged containers are not allowed"
  - name: warn_weather
    when:
      field: weather
      eq: bad
    message: "Found name '{{ name }}' and weather '{{ weather }}'"
"#;

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new(policy: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let policy_dir = dir.path().join("policy");
        fs::create_dir(&policy_dir).expect("create policy dir");
        fs::write(policy_dir.join("base.policy"), policy).expect("write policy");
        Self { dir }
    }

    fn policy_dir(&self) -> PathBuf {
        self.dir.path().join("policy")
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write input");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("confguard").unwrap();
        cmd.arg("test")
            .arg("--policy")
            .arg(self.policy_dir())
            .arg("--no-color");
        cmd
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}

#[test]
fn compliant_document_exits_zero() {
    let fixture = Fixture::new(POLICY);
    let file = fixture.write("ok.yaml", "spec:\n  privileged: false\n");

    fixture
        .cmd()
        .arg(arg(&file))
        .assert()
        .success()
        .stdout(predicate::str::contains("ok.yaml"))
        .stdout(predicate::str::contains("not allowed").not());
}

#[test]
fn failure_exits_one_with_the_message_under_the_header() {
    let fixture = Fixture::new(POLICY);
    let file = fixture.write("bad.yaml", "spec:\n  privileged: true\n");

    let assert = fixture.cmd().arg(arg(&file)).assert().code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains(arg(&file)));
    assert!(stdout.contains("  privileged containers are not allowed\n"));
}

#[test]
fn color_codes_are_emitted_unless_disabled() {
    let fixture = Fixture::new(POLICY);
    let file = fixture.write("bad.yaml", "spec:\n  privileged: true\n");

    let mut cmd = Command::cargo_bin("confguard").unwrap();
    cmd.arg("test").arg("--policy").arg(fixture.policy_dir());
    cmd.arg(arg(&file))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\u{1b}[31m"));
}

#[test]
fn combined_mode_finds_the_cross_file_warning() {
    let fixture = Fixture::new(POLICY);
    let first = fixture.write("a.yaml", "name: service\n");
    let second = fixture.write("b.yaml", "weather: bad\n");

    // Warnings alone keep the exit code at zero.
    fixture
        .cmd()
        .arg("--combine")
        .arg(arg(&first))
        .arg(arg(&second))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found name 'service' and weather 'bad'",
        ));
}

#[test]
fn combined_warning_fails_with_fail_on_warn() {
    let fixture = Fixture::new(POLICY);
    let first = fixture.write("a.yaml", "name: service\n");
    let second = fixture.write("b.yaml", "weather: bad\n");

    fixture
        .cmd()
        .arg("--combine")
        .arg("--fail-on-warn")
        .arg(arg(&first))
        .arg(arg(&second))
        .assert()
        .code(1);
}

#[test]
fn per_file_mode_does_not_cross_reference() {
    let fixture = Fixture::new(POLICY);
    let first = fixture.write("a.yaml", "name: service\n");
    let second = fixture.write("b.yaml", "weather: bad\n");

    fixture
        .cmd()
        .arg(arg(&first))
        .arg(arg(&second))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found name").not());
}

#[test]
fn only_the_violating_sub_document_reports() {
    let fixture = Fixture::new(POLICY);
    let file = fixture.write(
        "multi.yaml",
        "spec:\n  privileged: false\n---\nspec:\n  privileged: true\n",
    );

    let assert = fixture.cmd().arg(arg(&file)).assert().code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(
        stdout
            .matches("privileged containers are not allowed")
            .count(),
        1
    );
}

#[test]
fn stdin_input_has_no_header() {
    let fixture = Fixture::new(POLICY);

    let assert = fixture
        .cmd()
        .arg("-")
        .write_stdin("spec:\n  privileged: true\n")
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, "  privileged containers are not allowed\n");
}

#[test]
fn broken_rule_set_is_a_structural_error() {
    let fixture = Fixture::new("rules: [broken");
    let file = fixture.write("ok.yaml", "name: service\n");

    fixture
        .cmd()
        .arg(arg(&file))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("confguard error"));
}

#[test]
fn missing_input_file_is_a_structural_error() {
    let fixture = Fixture::new(POLICY);
    let missing = fixture.dir.path().join("missing.yaml");

    fixture
        .cmd()
        .arg(arg(&missing))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.yaml"));
}

#[test]
fn json_output_reports_verdict_and_sources() {
    let fixture = Fixture::new(POLICY);
    let file = fixture.write("bad.yaml", "spec:\n  privileged: true\n");

    let assert = fixture
        .cmd()
        .arg("--output")
        .arg("json")
        .arg(arg(&file))
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["sources"][0]["source"], arg(&file));
    assert_eq!(
        report["sources"][0]["failures"][0]["message"],
        "privileged containers are not allowed"
    );
}

#[test]
fn rules_in_another_namespace_are_undefined_under_the_default() {
    let policy = r#"
namespace: team
rules:
  - name: deny_everything
    when:
      field: name
      exists: true
    message: "denied by team policy"
"#;
    let fixture = Fixture::new(policy);
    let file = fixture.write("ok.yaml", "name: service\n");

    // Default namespace queries data.main.*; the team rule never fires.
    fixture.cmd().arg(arg(&file)).assert().success();

    // Selecting the namespace brings it in.
    fixture
        .cmd()
        .arg("--namespace")
        .arg("team")
        .arg(arg(&file))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("denied by team policy"));
}

#[test]
fn trace_flag_prints_the_evaluation_path() {
    let fixture = Fixture::new(POLICY);
    let file = fixture.write("ok.yaml", "spec:\n  privileged: false\n");

    fixture
        .cmd()
        .arg("--trace")
        .arg(arg(&file))
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter data.main.deny_privileged"));
}

#[test]
fn config_file_supplies_defaults() {
    let fixture = Fixture::new(POLICY);
    let file = fixture.write("a.yaml", "name: service\n");
    let second = fixture.write("b.yaml", "weather: bad\n");
    let config = fixture.write(
        "confguard.toml",
        &format!(
            "policy = {:?}\ncombine = true\nno_color = true\n",
            fixture.policy_dir().to_str().unwrap()
        ),
    );

    let mut cmd = Command::cargo_bin("confguard").unwrap();
    cmd.arg("--config")
        .arg(arg(&config))
        .arg("test")
        .arg(arg(&file))
        .arg(arg(&second))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found name 'service' and weather 'bad'",
        ));
}
