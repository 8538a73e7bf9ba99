// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generic atomic JSON file persistence, used by the cache collaborator's
//! file-backed adapter to survive process restarts.
//!
//! Writes go to a `.tmp` sibling and are then renamed into place, so a
//! crash mid-write can never leave a half-written file at the real path.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `value` to `path` atomically: write to `path.tmp`, `sync_all`,
/// then rename over `path`.
pub fn save_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, value)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load and deserialize `path`. Returns `Ok(None)` if the file doesn't
/// exist; a corrupt file is left in place and reported as an error rather
/// than silently discarded, since (unlike the daemon WAL this pattern was
/// lifted from) there's no replay log to fall back on here.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SnapshotError> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(Some(serde_json::from_reader(reader)?))
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
