//! Run-from-cache execution.
//!
//! Resolves a name to an executable (system PATH in transparent mode, then
//! the run-cache, then a fetch into the cache), executes it with inherited
//! standard streams, and hands the child's exit code back for the process
//! exit path. The cache is opportunistically evicted after every run.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::config::Config;
use crate::error::{BinError, Result};
use crate::fetch::{self, Progress};
use crate::{cache, repo, util};

/// Exit code when the child could not start or was killed by a signal.
pub const RUN_FAILURE_CODE: i32 = 1;

/// Mutually exclusive run behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Normal,
    /// Prints resolution transitions.
    Verbose,
    /// Suppresses transitions and the progress bar.
    Silent,
    /// Prefers a same-named binary on the system PATH, bypassing cache and fetch.
    Transparent,
}

/// Resolves and executes a binary, returning the exit code the tool itself
/// should exit with. Required for shell-pipeline composability: the tool's
/// exit code equals the child's.
pub fn run(config: &Config, name: &str, args: &[String], mode: RunMode) -> Result<i32> {
    let base = util::base_name(name);

    if mode == RunMode::Transparent {
        if let Ok(system) = which::which(&base) {
            debug!("transparent mode: executing {} from PATH", system.display());
            let code = execute(&system, args)?;
            cache::evict(config);
            return Ok(code);
        }
        debug!("'{base}' not found on PATH, falling back to the cache");
    }

    let binary = match cache::lookup(config, &base) {
        Some(cached) => {
            if mode == RunMode::Verbose {
                println!("running '{base}' from cache");
            }
            cached
        }
        None => {
            if mode != RunMode::Silent {
                println!("'{base}' is not cached, fetching it...");
            }
            fetch_into_cache(config, &base, mode)?
        }
    };

    let code = execute(&binary, args)?;
    cache::evict(config);
    Ok(code)
}

fn fetch_into_cache(config: &Config, base: &str, mode: RunMode) -> Result<PathBuf> {
    cache::ensure_dirs(config)?;
    let url = repo::find_url(config, base)?;
    let dest = cache::entry_path(config, base);
    let progress = if mode == RunMode::Silent {
        Progress::Hidden
    } else {
        Progress::Auto
    };
    fetch::fetch_binary(config, &url, &dest, progress)?;
    if mode == RunMode::Verbose {
        println!("cached '{base}' at {}", dest.display());
    }
    Ok(dest)
}

/// Executes the binary with inherited stdio and waits. Signal-killed children
/// map to the fixed failure code.
fn execute(path: &Path, args: &[String]) -> Result<i32> {
    let status = Command::new(path)
        .args(args)
        .status()
        .map_err(|e| BinError::local_io(path, e))?;
    Ok(status.code().unwrap_or(RUN_FAILURE_CODE))
}
