// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn noop_passes_text_through() {
    let filter = NoOpContentFilter;
    assert_eq!(filter.sanitize_content("hello", "5-8"), "hello");
}

#[test]
fn fake_filter_redacts_denylisted_words() {
    let filter = FakeContentFilter::new(vec!["scary".to_string()]);
    assert_eq!(filter.sanitize_content("a scary story", "5-8"), "a *** story");
}

#[test]
fn fake_filter_scores_by_word_count() {
    let filter = FakeContentFilter::default();
    let value = filter.evaluate_educational_value("one two three four");
    assert_eq!(value.educational_value, 0.2);
}
