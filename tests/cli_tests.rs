//! Command-line tests for the stacks-dat binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_batch(root: &Path) {
    fs::write(
        root.join("tags.tsv"),
        "header\n0 1 10 x 0 + consensus 0 AAAAAAAAAA\n0 1 11 x 0 + consensus 0 CCCCCCCCCC\n",
    )
    .unwrap();
    fs::write(root.join("snps.tsv"), "header\n0 1 10 3 E 0.0 A G - -\n").unwrap();
    fs::create_dir(root.join("paired")).unwrap();
    fs::write(
        root.join("paired").join("10.fa"),
        ">r|S1\nAAGAAAAAAA\nAAAAAAAAAA\nA\n",
    )
    .unwrap();
}

fn stacks_dat(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stacks-dat").unwrap();
    cmd.current_dir(root);
    cmd
}

#[test]
fn test_convert_writes_records() {
    let dir = TempDir::new().unwrap();
    write_batch(dir.path());

    stacks_dat(dir.path())
        .args([
            "convert",
            "--catalog",
            "tags.tsv",
            "--snps",
            "snps.tsv",
            "--reads",
            "paired",
            "--output",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records written: 1"))
        .stderr(
            predicate::str::contains("skipping observation")
                .and(predicate::str::contains("locus=10"))
                .and(predicate::str::contains("position=3"))
                .and(predicate::str::contains("read_len=1")),
        );

    let record = fs::read_to_string(dir.path().join("out").join("outfile_10.mod.dat")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&record).unwrap();
    assert_eq!(value[0]["counts"]["S1"]["G"], 1);
    assert_eq!(value[0]["counts"]["S1"]["A"], 1);
    assert!(!dir.path().join("out").join("outfile_11.mod.dat").exists());
}

#[test]
fn test_convert_json_summary() {
    let dir = TempDir::new().unwrap();
    write_batch(dir.path());

    let output = stacks_dat(dir.path())
        .args([
            "--format", "json", "convert", "--catalog", "tags.tsv", "--snps", "snps.tsv",
            "--reads", "paired", "--output", "out", "--threads", "2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["loci"], 2);
    assert_eq!(summary["variable_loci"], 1);
    assert_eq!(summary["counting"]["reads"], 3);
    assert_eq!(summary["counting"]["skipped"], 1);
    assert_eq!(summary["output"]["written"], 1);
}

#[test]
fn test_convert_refuses_existing_output() {
    let dir = TempDir::new().unwrap();
    write_batch(dir.path());
    fs::create_dir(dir.path().join("out")).unwrap();

    stacks_dat(dir.path())
        .args([
            "convert", "--catalog", "tags.tsv", "--snps", "snps.tsv", "--reads", "paired",
            "--output", "out",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_convert_missing_inputs_fails() {
    let dir = TempDir::new().unwrap();

    stacks_dat(dir.path())
        .arg("convert")
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch_1.catalog.tags.tsv"));
}

#[test]
fn test_inspect_tsv() {
    let dir = TempDir::new().unwrap();
    write_batch(dir.path());

    stacks_dat(dir.path())
        .args([
            "inspect", "--catalog", "tags.tsv", "--snps", "snps.tsv", "--reads", "paired",
            "--format", "tsv", "--all",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("locus\tconsensus_length\tsnps\tsamples\tobservations"))
        .stdout(predicate::str::contains("10\t10\t1\t1\t2"))
        .stdout(predicate::str::contains("11\t10\t0\t0\t0"));

    // inspect never writes records
    assert!(!dir.path().join("stack_dat").exists());
}

#[test]
fn test_zero_threads_rejected() {
    let dir = TempDir::new().unwrap();

    stacks_dat(dir.path())
        .args(["convert", "--threads", "0"])
        .assert()
        .failure();
}
