use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with config lookups isolated to `home`.
fn stmtx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stmtx").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn layouts_are_listed_in_priority_order() {
    let home = TempDir::new().unwrap();

    let output = stmtx(home.path()).arg("layouts").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let positions: Vec<usize> = [
        "banorte0",
        "citibanamex0",
        "banorte1",
        "citibanamex1",
        "banbajio",
        "bbva",
    ]
    .iter()
    .map(|name| stdout.find(name).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(stdout.contains("[settlement]"));
}

#[test]
fn extract_missing_file_fails() {
    let home = TempDir::new().unwrap();

    stmtx(home.path())
        .args(["extract", "/nonexistent/statement.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_corrupt_pdf_is_a_hard_error() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("broken.pdf");
    fs::write(&input, b"this is not a pdf").unwrap();

    stmtx(home.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PDF error"));
}

#[test]
fn extract_rejects_unknown_layout() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("statement.pdf");
    fs::write(&input, b"%PDF-1.4").unwrap();

    stmtx(home.path())
        .arg("extract")
        .arg(&input)
        .args(["--layout", "santander"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown layout: santander"));
}

#[test]
fn batch_without_matches_fails() {
    let home = TempDir::new().unwrap();
    let pattern = home.path().join("*.pdf");

    stmtx(home.path())
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn batch_records_failures_in_summary() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("in");
    let out_dir = home.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("enero.pdf"), b"garbage").unwrap();

    stmtx(home.path())
        .arg("batch")
        .arg(input_dir.join("*.pdf").to_str().unwrap())
        .arg("--output-dir")
        .arg(&out_dir)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,layout"));
    assert!(summary.contains("enero.pdf,error,"));
}

#[test]
fn config_init_get_and_set() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("stmtx.json");
    let config_arg = config.to_str().unwrap();

    stmtx(home.path())
        .args(["config", "init", "--output", config_arg])
        .assert()
        .success();
    assert!(config.exists());

    stmtx(home.path())
        .args(["config", "init", "--output", config_arg])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    stmtx(home.path())
        .args(["-c", config_arg, "config", "get", "grid.min_column_gap"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));

    stmtx(home.path())
        .args(["-c", config_arg, "config", "set", "extraction.layouts", r#"["bbva","banorte0"]"#])
        .assert()
        .success();

    stmtx(home.path())
        .args(["-c", config_arg, "layouts"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("bbva").and(predicate::str::contains("citibanamex1").not()),
        );

    stmtx(home.path())
        .args(["-c", config_arg, "config", "set", "extraction.layouts", r#"["hsbc"]"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown layout: hsbc"));
}

#[test]
fn config_path_points_into_config_dir() {
    let home = TempDir::new().unwrap();

    stmtx(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stmtx").and(predicate::str::contains("not created")));
}
