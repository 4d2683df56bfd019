// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// A `spool` command isolated from the caller's environment.
pub fn spool() -> Command {
    let mut cmd = cargo_bin_cmd!("spool");
    cmd.env_remove("SPOOL_CONFIG")
        .env_remove("SPOOL_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// A `spool` command running inside `temp`.
pub fn spool_in(temp: &TempDir) -> Command {
    let mut cmd = spool();
    cmd.current_dir(temp.path());
    cmd
}

/// One CLEF line with the given message template.
pub fn event(template: &str) -> String {
    format!(r#"{{"@t":"2024-01-31T10:00:00Z","@mt":"{template}"}}"#)
}

/// Writes `lines` to `name` in `temp`, each followed by `\n`.
pub fn write_lines(temp: &TempDir, name: &str, lines: &[String]) -> PathBuf {
    let path = temp.path().join(name);
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Appends raw text to an existing file.
pub fn append(path: &Path, text: &str) {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(text.as_bytes()).unwrap();
}

/// Stdout of a successful command as a string.
pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}
