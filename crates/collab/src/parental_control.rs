// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parental control collaborator implementations. The original system's
//! equivalent loads per-child time-window and daily-minutes config from a
//! JSON file and a denylist of words to strip from recognized speech before
//! it reaches any model. Configuring and loading that JSON file is a
//! deployment concern outside this crate's scope; `PermissiveParentalControl`
//! is the always-allow stand-in and the trait is the extension point a real
//! deployment would implement against.

use parking_lot::Mutex;
use vap_core::ParentalControl;

/// Discards every request as disallowed; a conservative default for a
/// deployment that hasn't configured parental controls yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpParentalControl;

impl ParentalControl for NoOpParentalControl {
    fn check_time_restrictions(&self) -> bool {
        false
    }

    fn check_usage_limit(&self) -> bool {
        false
    }

    fn get_remaining_time(&self) -> i64 {
        0
    }

    fn update_usage(&self, _minutes: f64) {}

    fn filter_input(&self, _text: &str) -> (Option<String>, String) {
        (None, "parental control not configured".to_string())
    }
}

/// Always allows, tracking accumulated usage minutes in memory. Suitable for
/// tests and for local development without a configured ruleset.
pub struct PermissiveParentalControl {
    daily_limit_minutes: i64,
    used_minutes: Mutex<f64>,
}

impl PermissiveParentalControl {
    pub fn new(daily_limit_minutes: i64) -> Self {
        Self {
            daily_limit_minutes,
            used_minutes: Mutex::new(0.0),
        }
    }
}

impl Default for PermissiveParentalControl {
    fn default() -> Self {
        Self::new(120)
    }
}

impl ParentalControl for PermissiveParentalControl {
    fn check_time_restrictions(&self) -> bool {
        true
    }

    fn check_usage_limit(&self) -> bool {
        *self.used_minutes.lock() < self.daily_limit_minutes as f64
    }

    fn get_remaining_time(&self) -> i64 {
        (self.daily_limit_minutes as f64 - *self.used_minutes.lock()).max(0.0) as i64
    }

    fn update_usage(&self, minutes: f64) {
        *self.used_minutes.lock() += minutes;
    }

    fn filter_input(&self, text: &str) -> (Option<String>, String) {
        (Some(text.to_string()), "allowed".to_string())
    }
}

#[cfg(test)]
#[path = "parental_control_tests.rs"]
mod tests;
