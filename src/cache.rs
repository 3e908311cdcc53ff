//! The bounded run-cache.
//!
//! A flat directory of fetched binaries keyed by base name, at most one entry
//! per name. Eviction approximates LRU by file access time so recently *run*
//! but long-fetched binaries survive; where the filesystem does not track
//! atime, the per-entry fallback is the modification time.

use std::path::PathBuf;
use std::time::SystemTime;

use log::{debug, warn};

use crate::config::Config;
use crate::error::{BinError, Result};
use crate::util;

/// Canonical on-disk location of a cache entry.
pub fn entry_path(config: &Config, name: &str) -> PathBuf {
    config.cache_dir.join(util::base_name(name))
}

/// Creates the cache and staging directories if missing.
pub fn ensure_dirs(config: &Config) -> Result<()> {
    let staging = config.staging_dir();
    std::fs::create_dir_all(&staging).map_err(|e| BinError::local_io(&staging, e))
}

/// Looks a binary up by base name. A hit requires the entry to exist and be
/// executable; anything else is treated as a miss.
pub fn lookup(config: &Config, name: &str) -> Option<PathBuf> {
    let path = entry_path(config, name);
    if util::is_executable(&path) {
        Some(path)
    } else {
        None
    }
}

/// Removes the oldest-accessed entries when the cache has grown past its
/// bound. Runs opportunistically after writes and after every `run`; failures
/// are logged, never fatal.
pub fn evict(config: &Config) {
    let mut entries = match entries_by_access_time(config) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cache eviction skipped: {e}");
            return;
        }
    };
    if entries.len() <= config.max_cache_size {
        return;
    }
    entries.sort_by_key(|(_, accessed)| *accessed);
    for (path, _) in entries.iter().take(config.binaries_to_delete) {
        match std::fs::remove_file(path) {
            Ok(()) => debug!("evicted {}", path.display()),
            Err(e) => warn!("could not evict {}: {e}", path.display()),
        }
    }
}

/// Cache entries with their last access time. Subdirectories (the staging
/// area) are not entries. Missing directory reads as empty.
fn entries_by_access_time(config: &Config) -> std::io::Result<Vec<(PathBuf, SystemTime)>> {
    if !config.cache_dir.exists() {
        return Ok(Vec::new());
    }
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(&config.cache_dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let accessed = metadata.accessed().or_else(|_| metadata.modified())?;
        entries.push((entry.path(), accessed));
    }
    Ok(entries)
}
