//! End-to-end tests for the `semver_stats` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn bin() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("semver_stats").unwrap()
}

#[test]
fn test_help() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--numeric-width"))
        .stdout(predicate::str::contains("--input-dir"));
}

#[test]
fn test_no_inputs_fails() {
    bin()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input files"));
}

#[test]
fn test_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("npm.csv");
    fs::write(
        &input,
        "Count,Version\n3,1.2.3-alpha.1+build.7\nv1.0.0\nnot.a.version\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    bin()
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Line count:               4"))
        .stdout(predicate::str::contains("Completed: 2 files processed, 0 failed."));

    let counts = fs::read_to_string(out.join("npm.counts.csv")).unwrap();
    assert!(counts.starts_with(
        "Char Count,Major,Minor,Patch,Prerelease,PrereleaseFields,Meta,MetaFields\n"
    ));
    assert!(counts.contains("\n1,3,3,3,0,3,0,3\n"));
    assert_eq!(
        fs::read_to_string(out.join("npm.badlines.txt")).unwrap(),
        "Count,Version\nnot.a.version\n"
    );
    assert_eq!(fs::read_to_string(out.join("npm.nearmiss.txt")).unwrap(), "1.0.0\n");
    assert!(out.join("npm.summary.txt").exists());

    // the near-miss file was run again and is clean
    let again = fs::read_to_string(out.join("npm.nearmiss.summary.txt")).unwrap();
    assert!(again.contains("Near misses ('v' prefix): 0 (0.00%)"));
    assert!(again.contains("Semver count:             1 (100.00%)"));
}

#[test]
fn test_input_dir_and_json_format() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "1.0.0\n2.0.0-rc.1\n").unwrap();
    fs::write(dir.path().join("b.txt"), "").unwrap();
    fs::write(dir.path().join("skip.log"), "1.0.0\n").unwrap();
    let out = dir.path().join("out");

    let output = bin()
        .arg("--input-dir")
        .arg(dir.path())
        .args(["--ext", "txt", "--format", "json"])
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = json.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["summary"]["with_prerelease"], 1);
    assert_eq!(reports[1]["summary"]["lines"], 0);
}

#[test]
fn test_input_dir_with_shared_stems() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("npm.csv"), "1.0.0\nbad-one\n").unwrap();
    fs::write(dir.path().join("npm.txt"), "2.0.0\nbad-two\n").unwrap();
    let out = dir.path().join("out");

    bin()
        .arg("--input-dir")
        .arg(dir.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: 2 files processed, 0 failed."));

    assert_eq!(fs::read_to_string(out.join("npm.csv.badlines.txt")).unwrap(), "bad-one\n");
    assert_eq!(fs::read_to_string(out.join("npm.txt.badlines.txt")).unwrap(), "bad-two\n");
}

#[test]
fn test_missing_file_reports_failure_but_processes_others() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.txt");
    fs::write(&good, "1.0.0\n").unwrap();

    bin()
        .arg(dir.path().join("missing.txt"))
        .arg(&good)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"))
        .stdout(predicate::str::contains("Completed: 1 files processed, 1 failed."));
    assert!(dir.path().join("good.counts.csv").exists());
}

#[test]
fn test_narrow_width_overflow_row() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wide.txt");
    fs::write(&input, "5,12345.0.0\n").unwrap();

    bin()
        .arg(&input)
        .args(["--numeric-width", "5", "--no-reprocess"])
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success();

    let counts = fs::read_to_string(dir.path().join("wide.counts.csv")).unwrap();
    assert!(counts.ends_with("Overflow,1,0,0,0,0,0,0\n"));
}
