// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn noop_denies_everything() {
    let pc = NoOpParentalControl;
    assert!(!pc.check_time_restrictions());
    assert!(!pc.check_usage_limit());
    assert_eq!(pc.get_remaining_time(), 0);
}

#[test]
fn permissive_tracks_usage_against_daily_limit() {
    let pc = PermissiveParentalControl::new(10);
    assert!(pc.check_usage_limit());
    assert_eq!(pc.get_remaining_time(), 10);
    pc.update_usage(7.0);
    assert_eq!(pc.get_remaining_time(), 3);
    assert!(pc.check_usage_limit());
    pc.update_usage(5.0);
    assert!(!pc.check_usage_limit());
    assert_eq!(pc.get_remaining_time(), 0);
}

#[test]
fn permissive_passes_input_through() {
    let pc = PermissiveParentalControl::default();
    let (rewritten, reason) = pc.filter_input("hello");
    assert_eq!(rewritten.as_deref(), Some("hello"));
    assert_eq!(reason, "allowed");
}
