// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Generic atomic file persistence, used by the cache collaborator to
//! survive restarts without depending on a database.

mod snapshot;

pub use snapshot::{load, save_atomic, SnapshotError};
