//! Integration tests for the CLI commands

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

const RECEIPT_LINES: &str = "GREEN LEAF CAFE\nFlat White   4.75\nCroissant   3.20\nTOTAL   7.95\n";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn test_version_command() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("ocr-lines "));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("ocr-lines "));
}

#[test]
fn test_version_short_flag() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("-V");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("ocr-lines "));
}

#[test]
fn test_analyze_pairs_file() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("analyze").arg(fixture("receipt_pairs.json"));

    cmd.assert().success().stdout(RECEIPT_LINES);
}

#[test]
fn test_analyze_columnar_batch_skips_malformed_box() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("analyze").arg("--batch").arg(fixture("receipt_columns.json"));

    cmd.assert()
        .success()
        .stdout(RECEIPT_LINES)
        .stderr(predicate::str::contains("skipping malformed fragment"));
}

#[test]
fn test_analyze_json_output() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.args(["analyze", "--format", "json", "--separator", " | "])
        .arg(fixture("receipt_pairs.json"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["lines"][1], "Flat White | 4.75");
    assert_eq!(
        value["text"],
        "GREEN LEAF CAFE\nFlat White | 4.75\nCroissant | 3.20\nTOTAL | 7.95"
    );
}

#[test]
fn test_analyze_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("analyze")
        .write_stdin(r#"{"regions": [[0, 0, 10, 0, 10, 5, 0, 5]], "texts": ["Hello"], "confidences": [0.5]}"#);

    cmd.assert().success().stdout("Hello\n");
}

#[test]
fn test_analyze_empty_input_json() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.args(["analyze", "-f", "json", "-"]).write_stdin("[]");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("{\"text\":\"\",\"lines\":[]}\n"));
}

#[test]
fn test_analyze_unrecognized_shape_is_not_an_error() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("analyze").write_stdin(r#""just a string""#);

    cmd.assert().success().stdout("");
}

#[test]
fn test_analyze_invalid_json_fails() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("analyze").write_stdin("{not json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_analyze_missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.args(["analyze", "does-not-exist.json"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.json"));
}

const ITEM_AND_PRICE: &str =
    r#"{"regions": [[0, 5, 50, 15], [60, 12, 90, 22]], "texts": ["Item", "1.00"], "confidences": [0.9, 0.9]}"#;

#[test]
fn test_analyze_row_tolerance_flag() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.arg("analyze").write_stdin(ITEM_AND_PRICE);
    cmd.assert().success().stdout("Item\n1.00\n");

    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.args(["analyze", "--row-tolerance", "1.0"]).write_stdin(ITEM_AND_PRICE);
    cmd.assert().success().stdout("Item   1.00\n");
}

#[test]
fn test_rust_log_enables_debug_output() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.env("RUST_LOG", "debug").arg("analyze").write_stdin(ITEM_AND_PRICE);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("normalizing columnar detector output"));
}

#[test]
fn test_quiet_flag_wins_over_rust_log() {
    let mut cmd = cargo_bin_cmd!("ocr-lines");
    cmd.env("RUST_LOG", "debug")
        .args(["-q", "analyze"])
        .write_stdin(ITEM_AND_PRICE);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("normalizing").not());
}
