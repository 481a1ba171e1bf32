use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary in a fresh directory with an explicit, absent config file.
fn ttylog(args: &[&str]) -> (TempDir, Output) {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("settings.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_ttylog"))
        .current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("TTYLOG_PRINTER__LEVEL")
        .env_remove("TTYLOG_PRINTER__FALLBACK_WIDTH")
        .env_remove("TTYLOG_PRINTER__INDENT")
        .output()
        .expect("Failed to run ttylog");
    (temp_dir, output)
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_print_piped_uses_fallback_width() {
    let (_dir, output) = ttylog(&["print", "status", "key", "value", "key2", "value2"]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("🟢 status"));
    assert_eq!(lines[1], "            | key  | value  |");
    assert_eq!(lines[2], "            | key2 | value2 |");
}

#[test]
fn test_print_long_value_overflows_at_80_columns() {
    let long = "x".repeat(70);
    let (_dir, output) = ttylog(&["print", "wide", "k", &long, "a", "b"]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "            | k |");
    assert_eq!(lines[2], long);
    assert_eq!(lines[3], "            | a | b |");
}

#[test]
fn test_print_odd_fields_reports_and_succeeds() {
    let (_dir, output) = ttylog(&["print", "broken", "key", "value", "valuelessKey"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "tui print failed: expected even number of key-value pairs, got 3\n"
    );
}

#[test]
fn test_print_below_threshold_is_silent() {
    let (_dir, output) = ttylog(&[
        "print",
        "--threshold",
        "error",
        "--level",
        "warn",
        "hidden",
        "k",
        "v",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_print_level_icon() {
    let (_dir, output) = ttylog(&["print", "--level", "error", "boom", "code", "42"]);
    let stdout = stdout(&output);
    assert!(stdout.lines().next().unwrap().ends_with("❌ boom"));
}

#[test]
fn test_spin_done() {
    let (_dir, output) = ttylog(&["spin", "--seconds", "0.1", "--message", "fetching"]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    // piped output carries no cursor control
    assert!(!stdout.contains('\x1b'));
    assert!(stdout.ends_with("\r🟢 fetching ... done!\n"));
}

#[test]
fn test_spin_failed_exits_nonzero() {
    let (_dir, output) = ttylog(&["spin", "--seconds", "0.1", "--fail", "disk full"]);
    assert!(!output.status.success());
    assert!(stdout(&output).ends_with("\r❌ working ... failed: disk full\n"));
}

#[test]
fn test_presets_table() {
    let (_dir, output) = ttylog(&["presets"]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    assert!(stdout.starts_with("▶ spinner presets\n"));
    for name in [
        "hourglass",
        "dots",
        "pulse",
        "runner",
        "locking",
        "unlocking",
        "monkeys",
    ] {
        assert!(stdout.contains(name), "missing {name}");
    }
}

#[test]
fn test_init_and_config_commands() {
    let temp_dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ttylog"))
        .current_dir(temp_dir.path())
        .arg("init")
        .output()
        .expect("Failed to run init command");
    assert!(output.status.success());

    let config_path = temp_dir.path().join(".ttylog/settings.toml");
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("version = 1"));
    assert!(content.contains("[printer]"));

    // Second init without --force must fail
    let output = Command::new(env!("CARGO_BIN_EXE_ttylog"))
        .current_dir(temp_dir.path())
        .arg("init")
        .output()
        .unwrap();
    assert!(!output.status.success());

    std::fs::write(&config_path, "version = 2\n[printer]\nfallback_width = 120\n").unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_ttylog"))
        .current_dir(temp_dir.path())
        .arg("config")
        .env_remove("TTYLOG_PRINTER__FALLBACK_WIDTH")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("version = 2"));
    assert!(stdout.contains("fallback_width = 120"));
}

#[test]
fn test_env_overrides_threshold() {
    let temp_dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_ttylog"))
        .current_dir(temp_dir.path())
        .args(["--config", "absent.toml", "print", "quiet", "k", "v"])
        .env("TTYLOG_PRINTER__LEVEL", "error")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
