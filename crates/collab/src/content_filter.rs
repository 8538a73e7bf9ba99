// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content filter collaborator implementations. Sanitization against a real
//! denylist/allowlist and scoring against a real educational taxonomy are
//! deployment-specific and out of scope; these adapters provide the trait's
//! contract with pass-through and trivially-scored behavior.

use vap_core::{ContentFilter, EducationalValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpContentFilter;

impl ContentFilter for NoOpContentFilter {
    fn sanitize_content(&self, text: &str, _age_group: &str) -> String {
        text.to_string()
    }

    fn evaluate_educational_value(&self, _text: &str) -> EducationalValue {
        EducationalValue {
            educational_value: 0.0,
            topics: Vec::new(),
        }
    }
}

/// Deterministic fake: strips a fixed denylist of words and reports a word
/// count proportional "educational value" so tests can assert on it without
/// depending on a real NLP model.
#[derive(Clone)]
pub struct FakeContentFilter {
    denylist: Vec<String>,
}

impl FakeContentFilter {
    pub fn new(denylist: Vec<String>) -> Self {
        Self { denylist }
    }
}

impl Default for FakeContentFilter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ContentFilter for FakeContentFilter {
    fn sanitize_content(&self, text: &str, _age_group: &str) -> String {
        let mut sanitized = text.to_string();
        for word in &self.denylist {
            sanitized = sanitized.replace(word.as_str(), "***");
        }
        sanitized
    }

    fn evaluate_educational_value(&self, text: &str) -> EducationalValue {
        let word_count = text.split_whitespace().count();
        EducationalValue {
            educational_value: (word_count as f64 / 20.0).min(1.0),
            topics: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "content_filter_tests.rs"]
mod tests;
