// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::clef::{ClefEvents, DecodePolicy};
use crate::error::Error;
use crate::payload::RawLines;
use crate::rolling::RollingInterval;
use crate::scanner::UTF8_BOM;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn raw_reader() -> BatchReader<RawLines> {
    BatchReader::new(RawLines).with_terminator(LineTerminator::Lf)
}

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn append(path: &Path, content: &str) {
    let mut file = std::fs::OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

#[test]
fn reads_all_lines_up_to_limit() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-20240131.clef", b"a\nb\nc\n");

    let batch = raw_reader()
        .read_batch(&Limits::new(2), &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert_eq!(batch.payload, vec!["a", "b"]);
    assert_eq!(batch.count, 2);
    assert_eq!(batch.checkpoint, Checkpoint::new(&path, 4));

    let next = raw_reader()
        .read_batch(&Limits::new(2), &batch.checkpoint, 0)
        .unwrap();
    assert_eq!(next.payload, vec!["c"]);
    assert_eq!(next.count, 1);
    assert_eq!(next.checkpoint.offset, 6);
}

#[test]
fn count_so_far_reduces_remaining_budget() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-20240131.clef", b"a\nb\nc\n");

    let batch = raw_reader()
        .read_batch(&Limits::new(3), &Checkpoint::start_of(&path), 2)
        .unwrap();
    assert_eq!(batch.payload, vec!["a"]);
    assert_eq!(batch.count, 3);
}

#[test]
fn exhausted_budget_reads_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-20240131.clef", b"a\n");
    let start = Checkpoint::start_of(&path);

    let batch = raw_reader().read_batch(&Limits::new(3), &start, 3).unwrap();
    assert!(batch.payload.is_empty());
    assert_eq!(batch.checkpoint, start);
    assert_eq!(batch.count, 3);
}

#[test]
fn rereading_without_new_bytes_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-20240131.clef", b"{\"a\":1}\n");

    let first = raw_reader()
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert_eq!(first.payload.len(), 1);

    for _ in 0..2 {
        let again = raw_reader()
            .read_batch(&Limits::new(10), &first.checkpoint, 0)
            .unwrap();
        assert!(again.payload.is_empty());
        assert_eq!(again.count, 0);
        assert_eq!(again.checkpoint, first.checkpoint);
    }
}

#[test]
fn oversized_lines_are_counted_but_dropped() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "app-20240131.clef",
        b"short\nthis one is too long\nok\nanother long line\nfine\n",
    );
    let limits = Limits::new(5).with_max_record_bytes(Some(10));

    let batch = raw_reader()
        .read_batch(&limits, &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert_eq!(batch.count, 5);
    assert_eq!(batch.payload, vec!["short", "ok", "fine"]);
    assert_eq!(
        batch.checkpoint.offset,
        std::fs::metadata(&path).unwrap().len()
    );
}

#[test]
fn dropped_line_spends_budget_and_is_never_reread() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-20240131.clef", b"way too long\nok\n");
    let limits = Limits::new(1).with_max_record_bytes(Some(5));

    let first = raw_reader()
        .read_batch(&limits, &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert!(first.payload.is_empty());
    assert_eq!(first.count, 1);
    assert_eq!(first.checkpoint.offset, 13);

    let second = raw_reader().read_batch(&limits, &first.checkpoint, 0).unwrap();
    assert_eq!(second.payload, vec!["ok"]);
}

#[test]
fn size_limit_uses_encoded_bytes() {
    let dir = TempDir::new().unwrap();
    // Four characters, eight bytes.
    let path = write_file(&dir, "app-20240131.clef", "\u{e9}\u{e9}\u{e9}\u{e9}\nabcd\n".as_bytes());
    let limits = Limits::new(10).with_max_record_bytes(Some(4));

    let batch = raw_reader()
        .read_batch(&limits, &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert_eq!(batch.payload, vec!["abcd"]);
    assert_eq!(batch.count, 2);
}

#[test]
fn partial_tail_line_waits_for_terminator() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-20240131.clef", b"{\"a\":1}\n{\"b\":2");

    let first = raw_reader()
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert_eq!(first.payload, vec!["{\"a\":1}"]);
    assert_eq!(first.checkpoint.offset, 8);

    let idle = raw_reader()
        .read_batch(&Limits::new(10), &first.checkpoint, 0)
        .unwrap();
    assert!(idle.payload.is_empty());
    assert_eq!(idle.checkpoint.offset, 8);

    append(&path, "}\n");
    let completed = raw_reader()
        .read_batch(&Limits::new(10), &idle.checkpoint, 0)
        .unwrap();
    assert_eq!(completed.payload, vec!["{\"b\":2}"]);
}

#[test]
fn successive_batches_over_growing_file_lose_and_repeat_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-20240131.clef", b"");
    let limits = Limits::new(3);
    let mut checkpoint = Checkpoint::start_of(&path);
    let mut seen = Vec::new();
    let mut expected = Vec::new();

    for round in 0..5 {
        for i in 0..round + 1 {
            let line = format!("{{\"round\":{round},\"i\":{i},\"m\":\"\u{00fc}\"}}");
            append(&path, &format!("{line}\n"));
            expected.push(line);
        }

        let batch = raw_reader().read_batch(&limits, &checkpoint, 0).unwrap();
        assert!(batch.checkpoint.offset >= checkpoint.offset);
        assert!(batch.checkpoint.offset <= std::fs::metadata(&path).unwrap().len());
        seen.extend(batch.payload);
        checkpoint = batch.checkpoint;
    }

    loop {
        let batch = raw_reader().read_batch(&limits, &checkpoint, 0).unwrap();
        if batch.count == 0 {
            break;
        }
        seen.extend(batch.payload);
        checkpoint = batch.checkpoint;
    }

    assert_eq!(seen, expected);
    assert_eq!(checkpoint.offset, std::fs::metadata(&path).unwrap().len());
}

#[test]
fn bom_is_skipped_exactly_once() {
    let dir = TempDir::new().unwrap();
    let mut content = UTF8_BOM.to_vec();
    content.extend_from_slice(b"{\"a\":1}\n{\"b\":2}\n");
    let with_bom = write_file(&dir, "bom-20240131.clef", &content);
    let plain = write_file(&dir, "plain-20240131.clef", b"{\"a\":1}\n{\"b\":2}\n");

    let first = raw_reader()
        .read_batch(&Limits::new(1), &Checkpoint::start_of(&with_bom), 0)
        .unwrap();
    let plain_first = raw_reader()
        .read_batch(&Limits::new(1), &Checkpoint::start_of(&plain), 0)
        .unwrap();
    assert_eq!(first.payload, plain_first.payload);
    assert_eq!(first.checkpoint.offset, plain_first.checkpoint.offset + 3);

    let second = raw_reader()
        .read_batch(&Limits::new(10), &first.checkpoint, 0)
        .unwrap();
    assert_eq!(second.payload, vec!["{\"b\":2}"]);
    assert_eq!(second.checkpoint.offset, content.len() as u64);
}

#[test]
fn crlf_files_advance_by_two_byte_terminator() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-20240131.clef", b"a\r\nb\r\n");
    let reader = BatchReader::new(RawLines).with_terminator(LineTerminator::CrLf);

    let batch = reader
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert_eq!(batch.payload, vec!["a", "b"]);
    assert_eq!(batch.checkpoint.offset, 6);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app-20240131.clef");

    let err = raw_reader()
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn bad_file_name_fails_before_reading() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app-notadate.clef", b"{\"@t\":\"2024-01-31T10:00:00Z\"}\n");
    let reader = BatchReader::new(ClefEvents::new(RollingInterval::Day))
        .with_terminator(LineTerminator::Lf);

    let err = reader
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap_err();
    assert!(matches!(err, Error::FileName { .. }));
}

#[test]
fn bad_file_name_is_reported_even_when_file_is_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app-notadate.clef");
    let reader = BatchReader::new(ClefEvents::new(RollingInterval::Day));

    let err = reader
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap_err();
    assert!(matches!(err, Error::FileName { .. }));
}

#[test]
fn clef_batch_decodes_events() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "app-20240131.clef",
        b"{\"@t\":\"2024-01-31T10:00:00Z\",\"@mt\":\"one\"}\n{\"@t\":\"2024-01-31T10:00:01Z\",\"@mt\":\"two\",\"@l\":\"Error\"}\n",
    );
    let reader = BatchReader::new(ClefEvents::new(RollingInterval::Day))
        .with_terminator(LineTerminator::Lf);

    let batch = reader
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert_eq!(batch.payload.len(), 2);
    assert_eq!(batch.payload[1].message_template.as_deref(), Some("two"));
    assert_eq!(batch.payload[1].level, crate::clef::Level::Error);
}

#[test]
fn clef_decode_failure_aborts_batch() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "app-20240131.clef",
        b"{\"@t\":\"2024-01-31T10:00:00Z\"}\nnot an event\n",
    );
    let reader = BatchReader::new(ClefEvents::new(RollingInterval::Day))
        .with_terminator(LineTerminator::Lf);

    let err = reader
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn clef_skip_policy_advances_past_bad_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "app-20240131.clef",
        b"{\"@t\":\"2024-01-31T10:00:00Z\"}\nnot an event\n{\"@t\":\"2024-01-31T10:00:02Z\"}\n",
    );
    let builder = ClefEvents::new(RollingInterval::Day).with_decode_policy(DecodePolicy::Skip);
    let reader = BatchReader::new(builder).with_terminator(LineTerminator::Lf);

    let batch = reader
        .read_batch(&Limits::new(10), &Checkpoint::start_of(&path), 0)
        .unwrap();
    assert_eq!(batch.payload.len(), 2);
    assert_eq!(batch.count, 3);
    assert_eq!(
        batch.checkpoint.offset,
        std::fs::metadata(&path).unwrap().len()
    );
}

#[test]
fn no_payload_is_empty() {
    assert!(raw_reader().no_payload().is_empty());
}
