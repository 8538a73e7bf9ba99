// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cache collaborator implementations.
//!
//! [`InMemoryCache`] is the in-process fake used by tests and whenever a
//! `cache_file` isn't configured. [`FileCache`] persists to a JSON file with
//! per-entry TTL expiry, the way the original system's `CacheManager` did,
//! and writes atomically (write to a `.tmp` sibling, then rename) the way
//! this workspace's storage layer persists snapshots.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use vap_core::Cache;
use vap_storage::{load, save_atomic};

/// Plain in-memory cache with no expiry. Suitable for tests and for runs
/// that don't configure a `cache_file`.
#[derive(Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for InMemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    data: Value,
    timestamp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// File-backed cache with a time-to-live per entry (default 24h, matching
/// the original `CacheManager`). Reads the whole file on construction and
/// rewrites it atomically on every mutation; fine for the modest entry
/// counts a voice pipeline accumulates, not meant for high write volume.
pub struct FileCache {
    path: PathBuf,
    ttl_secs: u64,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl FileCache {
    pub const DEFAULT_TTL_SECS: u64 = 86_400;

    pub fn open(path: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        let path = path.into();
        let loaded: HashMap<String, CacheEntry> =
            load(&path).ok().flatten().unwrap_or_default();
        let now = now_secs();
        let fresh: HashMap<String, CacheEntry> = loaded
            .into_iter()
            .filter(|(_, entry)| now.saturating_sub(entry.timestamp) < ttl_secs)
            .collect();
        let cache = Self {
            path,
            ttl_secs,
            entries: Mutex::new(fresh),
        };
        cache.save();
        cache
    }

    fn save(&self) {
        let entries = self.entries.lock();
        if let Err(err) = save_atomic(&self.path, &*entries) {
            warn!(path = %self.path.display(), error = %err, "failed to write cache file");
        }
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = now_secs();
        let entries = self.entries.lock();
        let entry = entries.get(key)?;
        if now.saturating_sub(entry.timestamp) < self.ttl_secs {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    fn set(&self, key: &str, value: Value) {
        {
            let mut entries = self.entries.lock();
            entries.insert(
                key.to_string(),
                CacheEntry {
                    data: value,
                    timestamp: now_secs(),
                },
            );
        }
        self.save();
    }

    fn clear(&self) {
        self.entries.lock().clear();
        self.save();
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
