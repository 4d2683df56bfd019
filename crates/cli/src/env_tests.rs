// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::SPOOL_LOG, "SPOOL_LOG");
    assert_eq!(vars::SPOOL_CONFIG, "SPOOL_CONFIG");
    assert_eq!(vars::NO_COLOR, "NO_COLOR");
}

#[test]
fn test_log_filter_ignores_blank() {
    std::env::set_var("SPOOL_LOG", "  ");
    assert!(log_filter().is_none());
    std::env::set_var("SPOOL_LOG", "spool=debug");
    assert_eq!(log_filter().as_deref(), Some("spool=debug"));
    std::env::remove_var("SPOOL_LOG");
    assert!(log_filter().is_none());
}

#[test]
fn test_no_color() {
    std::env::set_var("NO_COLOR", "1");
    assert!(no_color());
    std::env::remove_var("NO_COLOR");
    assert!(!no_color());
}
