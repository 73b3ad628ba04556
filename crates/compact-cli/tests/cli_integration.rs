use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Binary isolated from any real config: cwd and HOME point at `root`.
fn compact_bin(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_compact"));
    cmd.current_dir(root)
        .env("HOME", root)
        .env("USERPROFILE", root)
        .env_remove("COMPACT_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn compact");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for compact")
}

#[test]
fn lines_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = compact_bin(dir.path());
    cmd.arg("lines");
    let output = run_with_stdin(cmd, "z\nxyz\na\na\naaa\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "z\nxyz\na\naaa\n");
}

#[test]
fn lines_from_files_span_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("one.txt"), "a\nb\n").unwrap();
    std::fs::write(dir.path().join("two.txt"), "b\na\n").unwrap();

    let output = compact_bin(dir.path())
        .args(["lines", "one.txt", "two.txt"])
        .output()
        .expect("failed to execute compact");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "a\nb\na\n");
}

#[test]
fn lines_count_flag() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = compact_bin(dir.path());
    cmd.args(["lines", "--count"]);
    let output = run_with_stdin(cmd, "x\nx\ny\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "      2 x\n      1 y\n");
}

#[test]
fn lines_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = compact_bin(dir.path());
    cmd.args(["lines", "--json"]);
    let output = run_with_stdin(cmd, "1\n1\n2\n");

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["lines"], serde_json::json!(["1", "2"]));
    assert_eq!(report["input_lines"], 3);
    assert_eq!(report["output_lines"], 2);
}

#[test]
fn local_config_applies() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".compact")).unwrap();
    std::fs::write(dir.path().join(".compact/config.toml"), "ignore_case = true\n").unwrap();

    let mut cmd = compact_bin(dir.path());
    cmd.arg("lines");
    let output = run_with_stdin(cmd, "Warn\nWARN\nok\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Warn\nok\n");
}

#[test]
fn no_count_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".compact")).unwrap();
    std::fs::write(dir.path().join(".compact/config.toml"), "count = true\n").unwrap();

    let mut cmd = compact_bin(dir.path());
    cmd.args(["lines", "--no-count"]);
    let output = run_with_stdin(cmd, "x\nx\ny\n");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "x\ny\n");

    // Last of `--count` / `--no-count` wins.
    let mut cmd = compact_bin(dir.path());
    cmd.args(["lines", "--no-count", "--count"]);
    let output = run_with_stdin(cmd, "x\nx\ny\n");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "      2 x\n      1 y\n"
    );
}

#[test]
fn bad_strategy_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = compact_bin(dir.path())
        .args(["lines", "--strategy", "hashset"])
        .output()
        .expect("failed to execute compact");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown strategy"),
        "Expected strategy error, got: {stderr}"
    );
}

#[test]
fn missing_file_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = compact_bin(dir.path())
        .args(["lines", "missing.txt"])
        .output()
        .expect("failed to execute compact");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("compact: reading missing.txt"),
        "Expected read error, got: {stderr}"
    );
}

#[test]
fn demo_prints_examples() {
    let dir = tempfile::tempdir().unwrap();
    let output = compact_bin(dir.path())
        .arg("demo")
        .output()
        .expect("failed to execute compact");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(r#"Compacted: ["z", "xyz", "a", "aaa"]"#),
        "got: {stdout}"
    );
    assert!(stdout.contains("Compacted: [1, 4]"), "got: {stdout}");
    assert!(
        stdout.contains("Is the compacted result an iterator? true"),
        "got: {stdout}"
    );
    assert!(stdout.contains("pairwise"), "got: {stdout}");
}

#[test]
fn config_shows_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = compact_bin(dir.path())
        .arg("config")
        .output()
        .expect("failed to execute compact");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Source: built-in defaults"), "got: {stdout}");
    assert!(stdout.contains("strategy = \"scan\""), "got: {stdout}");
}

#[test]
fn config_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("custom.toml"), "strategy = \"pairwise\"\n").unwrap();

    let output = compact_bin(dir.path())
        .args(["config", "--config", "custom.toml"])
        .output()
        .expect("failed to execute compact");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Source: explicit: custom.toml"), "got: {stdout}");
    assert!(stdout.contains("strategy = \"pairwise\""), "got: {stdout}");
}
