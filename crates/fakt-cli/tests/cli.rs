use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("fakt")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("regions"));
}

#[test]
fn process_requires_usage() {
    Command::cargo_bin("fakt")
        .unwrap()
        .args(["process", "invoice.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--usage"));
}

#[test]
fn process_reports_missing_input() {
    Command::cargo_bin("fakt")
        .unwrap()
        .args(["process", "no-such-invoice.pdf", "--usage", "600"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn regions_reports_missing_input() {
    Command::cargo_bin("fakt")
        .unwrap()
        .args(["regions", "no-such-invoice.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
