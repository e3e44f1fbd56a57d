//! Integration tests for the sepa-transfers CLI.
//!
//! These tests run the actual binary against temporary CSV files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Write CSV content to a temporary file
fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Run the binary with the given input file and return stdout
fn run_preview(file: &NamedTempFile) -> String {
    let mut cmd = Command::cargo_bin("sepa-transfers").unwrap();
    let assert = cmd.arg(file.path()).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_preview_with_identifications() {
    let file = csv_file(
        "amount,iban,name,identification,creditor_type,bic\n\
         12.34,DE89370400440532013000,Jane Doe,INV-001,individual,COBADEFFXXX\n\
         500,FR7630006000011234567890189,Société X,INV-002,,\n",
    );

    let output = run_preview(&file);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "INV-001,INV-001,individual,Jane Doe,DE89370400440532013000,COBADEFFXXX,EUR,12.34,"
    );
    assert_eq!(
        lines[2],
        "INV-002,INV-002,company,Societe X,FR7630006000011234567890189,,EUR,5.00,"
    );
}

#[test]
fn test_generated_identifications_are_distinct() {
    let file = csv_file(
        "amount,iban,name\n\
         1.00,DE89370400440532013000,A\n\
         2.00,DE89370400440532013000,B\n",
    );

    let output = run_preview(&file);
    let ids: Vec<&str> = output
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();

    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| id.len() == 20));
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_invalid_rows_are_skipped() {
    let file = csv_file(
        "amount,iban,name,identification,creditor_type\n\
         oops,DE89370400440532013000,A,INV-1,company\n\
         3.00,DE89370400440532013000,B,INV-2,bogus\n\
         4.00,DE89370400440532013000,C,INV-3,company\n",
    );

    let output = run_preview(&file);
    assert_eq!(output.lines().count(), 2);
    assert!(output.contains("INV-3,INV-3,company,C"));
}

#[test]
fn test_default_currency_from_environment() {
    let file = csv_file("amount,iban,name,identification\n1.00,CH9300762011623852957,A,X\n");

    Command::cargo_bin("sepa-transfers")
        .unwrap()
        .env("SEPA_DEFAULT_CURRENCY", "CHF")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(",CHF,1.00,"));
}

#[test]
fn test_major_amounts_skipped_without_exact_arithmetic() {
    let file = csv_file(
        "amount,iban,name,identification\n\
         1.00,DE89370400440532013000,A,X1\n\
         100,DE89370400440532013000,B,X2\n",
    );

    Command::cargo_bin("sepa-transfers")
        .unwrap()
        .env("SEPA_EXACT_ARITHMETIC", "false")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("X2,X2").and(predicate::str::contains("X1,X1").not()));
}

#[test]
fn test_missing_argument() {
    let mut cmd = Command::cargo_bin("sepa-transfers").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file argument"));
}

#[test]
fn test_nonexistent_file() {
    let mut cmd = Command::cargo_bin("sepa-transfers").unwrap();
    cmd.arg("nonexistent_file.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_invalid_configuration_fails() {
    let file = csv_file("amount,iban,name\n1.00,DE89370400440532013000,A\n");

    Command::cargo_bin("sepa-transfers")
        .unwrap()
        .env("SEPA_IDENTIFICATION", "random")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown identification strategy"));
}
