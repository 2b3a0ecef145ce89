use assert_cmd::Command;
use predicates::prelude::*;

fn ledger_cli() -> Command {
    Command::cargo_bin("ledger-cli").expect("binary should build")
}

#[test]
fn demo_reports_every_step_valid() {
    ledger_cli()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("== chain"))
        .stdout(predicate::str::contains("== concatenated"))
        .stdout(predicate::str::contains("== slice(1, 5)"))
        .stdout(predicate::str::contains("data block5"))
        .stdout(predicate::str::contains("broken").not());
}

#[test]
fn demo_json_emits_one_document_per_step() {
    let output = ledger_cli().args(["demo", "--json"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let docs: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0]["size"], 4);
    assert_eq!(docs[1]["size"], 6);
    assert_eq!(docs[2]["size"], 6);
    for doc in &docs {
        assert_eq!(doc["valid"], true);
        assert!(doc["broken_index"].is_null());
    }
}

#[test]
fn build_links_payloads() {
    let output = ledger_cli()
        .args([
            "build",
            "--data",
            "a",
            "--data",
            "b",
            "--nonce",
            "3",
            "--timestamp",
            "1600000000",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["size"], 3);
    assert_eq!(doc["valid"], true);
    let blocks = doc["blocks"].as_array().unwrap();
    assert_eq!(blocks[1]["data"], "a");
    assert_eq!(blocks[1]["timestamp"], 1_600_000_000i64);
    assert_eq!(blocks[1]["nonce"], 3);
    assert_eq!(blocks[1]["previous_hash"], blocks[0]["hash"]);
    assert_eq!(blocks[2]["previous_hash"], blocks[1]["hash"]);
}

#[test]
fn build_with_slice() {
    ledger_cli()
        .args([
            "build",
            "--data",
            "a",
            "--data",
            "b",
            "--data",
            "c",
            "--slice-start",
            "2",
            "--slice-count",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("== slice(2, 5)"))
        .stdout(predicate::str::contains("data b"))
        .stdout(predicate::str::contains("data c"))
        .stdout(predicate::str::contains("data a").not())
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn build_requires_data() {
    ledger_cli().arg("build").assert().failure();
}

#[test]
fn slice_start_requires_count() {
    ledger_cli()
        .args(["build", "--data", "a", "--slice-start", "1"])
        .assert()
        .failure();
}
