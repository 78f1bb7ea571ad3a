use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const REFERENCE_REQUESTS: &str = "R001 5\nR002 3\nR003 1\nR004 1\n";

#[test]
fn reserve_writes_output_file_and_dumps_grid() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("requests.txt"), REFERENCE_REQUESTS)?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .args(["reserve", "requests.txt"])
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("Output.txt"))?;
    assert_eq!(
        output,
        "R001 A1, A2, A3, A4, A5\nR002 A9, A10, A11\nR003 A15\nR004 A19\n"
    );

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "[1, 1, 1, 1, 1, 3, 3, 3, 1, 1, 1, 3, 3, 3, 1, 3, 3, 3, 1, 3]"
    );
    assert_eq!(lines[1], format!("[{}]", vec!["3"; 20].join(", ")));
    assert!(lines.last().expect("output path line").ends_with("Output.txt"));

    Ok(())
}

#[test]
fn reserve_reports_rejections() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("requests.txt"),
        "R001 abc\nR002 101\nR003\nR004 2\n",
    )?;

    #[allow(deprecated)]
    Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .args(["reserve", "requests.txt", "--output", "out/results.txt", "--no-dump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[").not());

    let output = fs::read_to_string(dir.path().join("out/results.txt"))?;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "R001 Error: Malformed input.");
    assert_eq!(
        lines[1],
        "R002 No reservation made. Amount of seats requested exceeds available seats. "
    );
    assert_eq!(lines[2], "R003 Error: Malformed input.");
    assert_eq!(lines[3], "R004 A1, A2");

    Ok(())
}

#[test]
fn reserve_json_includes_summary_and_grid() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("requests.txt"), REFERENCE_REQUESTS)?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .args(["reserve", "requests.txt", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["summary"]["fulfilled"], 4);
    assert_eq!(value["summary"]["seats_reserved"], 10);
    assert_eq!(value["summary"]["seats_available"], 80);
    assert_eq!(value["grid"]["rows"], 10);
    assert_eq!(value["records"][1]["id"], "R002");
    assert!(value["output"]
        .as_str()
        .expect("output path")
        .ends_with("Output.txt"));

    Ok(())
}

#[test]
fn reserve_uses_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("seatplan.yml"),
        r#"
theater:
  rows: 3
  cols: 4
output:
  path: "results.txt"
  dump_grid: false
"#,
    )?;
    fs::write(dir.path().join("requests.txt"), "R001 2\nR002 1\nR003 1\n")?;

    #[allow(deprecated)]
    Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .args(["reserve", "requests.txt"])
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("results.txt"))?;
    assert_eq!(
        output,
        "R001 A1, A2\nR002 C1\nR003 No reservation made. Amount of seats requested exceeds available seats. \n"
    );

    Ok(())
}

#[test]
fn reserve_logs_batch_start() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("requests.txt"), REFERENCE_REQUESTS)?;

    #[allow(deprecated)]
    Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["reserve", "requests.txt", "--no-dump"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Processing 4 request lines (100 seats available)",
        ));

    Ok(())
}

#[test]
fn reserve_rejects_oversized_theater() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("seatplan.yml"),
        "theater:\n  rows: 100000\n  cols: 100000\n",
    )?;
    fs::write(dir.path().join("requests.txt"), REFERENCE_REQUESTS)?;

    #[allow(deprecated)]
    Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .args(["reserve", "requests.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid theater dimensions 100000x100000",
        ));

    Ok(())
}

#[test]
fn reserve_fails_on_missing_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    #[allow(deprecated)]
    Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .args(["reserve", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read request file"));

    Ok(())
}

#[test]
fn reserve_fails_on_explicit_missing_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("requests.txt"), REFERENCE_REQUESTS)?;

    #[allow(deprecated)]
    Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .args(["--config", "nope.yml", "reserve", "requests.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));

    Ok(())
}

#[test]
fn init_scaffolds_project() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    #[allow(deprecated)]
    Command::cargo_bin("seatplan")?
        .current_dir(dir.path())
        .args(["init", "theater"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seatplan initialized in theater\n"))
        .stdout(predicate::str::contains("\"").not());

    let root = dir.path().join("theater");
    assert!(root.join("seatplan.yml").exists());
    assert!(root.join("requests.txt").exists());

    #[allow(deprecated)]
    Command::cargo_bin("seatplan")?
        .current_dir(&root)
        .env_remove("RUST_LOG")
        .args(["reserve", "requests.txt", "--no-dump"])
        .assert()
        .success();
    assert!(root.join("Output.txt").exists());

    Ok(())
}
