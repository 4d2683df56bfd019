// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn check_accepts_conventional_name() {
    spool()
        .args(["check", "logs/app-20240131_2.clef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (day rolling)"));
}

#[test]
fn check_uses_rolling_flag() {
    spool()
        .args(["check", "app-2024013115.clef", "--rolling", "hour"])
        .assert()
        .success();

    spool()
        .args(["check", "app-2024013115.clef"])
        .assert()
        .failure();
}

#[test]
fn check_rejects_bad_date() {
    spool()
        .args(["check", "app-notadate.clef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("app-notadate.clef"));
}

#[test]
fn check_reads_interval_from_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("spool.toml"), "rolling_interval = \"month\"\n").unwrap();

    spool_in(&temp)
        .args(["check", "app-202401.clef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("month rolling"));
}

#[test]
fn config_prints_merged_settings() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("spool.toml"), "batch_posting_limit = 5\n").unwrap();

    spool_in(&temp)
        .args(["config", "--rolling", "hour", "--max-bytes", "1024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("batch_posting_limit = 5"))
        .stdout(predicate::str::contains("rolling_interval = \"hour\""))
        .stdout(predicate::str::contains("event_body_limit_bytes = 1024"));
}

#[test]
fn config_rejects_unknown_keys() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("spool.toml"), "bogus = 1\n").unwrap();

    spool_in(&temp)
        .args(["config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}

#[test]
fn explicit_config_must_exist() {
    spool()
        .args(["config", "--config", "/nonexistent/spool.toml"])
        .assert()
        .failure();
}
