//! Batch installation and removal.

use std::path::PathBuf;

use colored::Colorize;
use log::debug;

use crate::config::Config;
use crate::error::{BinError, Result};
use crate::fetch::{self, Progress};
use crate::{batch, cache, interrupt, repo, util};

/// Final tally of one install batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    /// (binary name, failure message) per failed target.
    pub failed: Vec<(String, String)>,
    pub interrupted: bool,
}

impl BatchSummary {
    /// Process exit code for a batch over `targets` names. Multi-target
    /// batches tolerate partial failure (failures are in the tally), but a
    /// single-target install that failed is a single-item error and must
    /// reach the shell, as must an interrupted batch.
    pub fn exit_code(&self, targets: usize) -> i32 {
        if self.interrupted || (targets == 1 && !self.failed.is_empty()) {
            1
        } else {
            0
        }
    }
}

/// Installs a batch of binaries into the install directory, one worker per
/// name. Per-item progress lines print in the order the names were given,
/// regardless of which download finishes first. Every target is attempted;
/// per-item failures are collected and reported after the tally, never
/// aborting the batch.
pub fn install_batch(config: &Config, names: &[String], silent: bool, use_cache: bool) -> BatchSummary {
    // Interleaved bars are useless; only a single quiet-less target gets one.
    let progress = if silent || names.len() > 1 {
        Progress::Hidden
    } else {
        Progress::Auto
    };

    let mut summary = BatchSummary::default();
    batch::run_ordered(
        names,
        |_index, name| {
            if interrupt::requested() {
                return Err(BinError::Interrupted);
            }
            install_one(config, name, use_cache, progress)
        },
        |_index, name, outcome: Result<PathBuf>| match outcome {
            Ok(dest) => {
                summary.succeeded += 1;
                if !silent {
                    println!("{} {} -> {}", "installed".green(), name, dest.display());
                }
            }
            Err(e) => {
                if !silent {
                    println!("{} {}", "failed".red(), name);
                }
                summary.failed.push((name.to_string(), e.to_string()));
            }
        },
    );
    summary.interrupted = interrupt::requested();

    if summary.interrupted {
        eprintln!("{}", "interrupted; installation aborted".yellow());
        return summary;
    }
    println!(
        "{} installed, {} failed",
        summary.succeeded.to_string().green(),
        summary.failed.len().to_string().red()
    );
    for (name, message) in &summary.failed {
        eprintln!("{}: {message}", name.red());
    }
    summary
}

/// Installs one binary: cache hit → copy into place, miss → resolve a URL and
/// fetch straight to the destination.
fn install_one(config: &Config, name: &str, use_cache: bool, progress: Progress) -> Result<PathBuf> {
    std::fs::create_dir_all(&config.install_dir)
        .map_err(|e| BinError::local_io(&config.install_dir, e))?;
    let dest = util::install_path(&config.install_dir, name);

    if use_cache {
        if let Some(cached) = cache::lookup(config, name) {
            debug!("using cached copy {}", cached.display());
            util::copy_executable(&cached, &dest)?;
            return Ok(dest);
        }
    }

    let url = repo::find_url(config, name)?;
    fetch::fetch_binary(config, &url, &dest, progress)?;
    Ok(dest)
}

/// Deletes binaries from the install directory. An absent name warns on
/// stderr and moves on; nothing here is fatal.
pub fn remove(config: &Config, names: &[String]) {
    for name in names {
        let base = util::base_name(name);
        let path = util::install_path(&config.install_dir, &base);
        match std::fs::remove_file(&path) {
            Ok(()) => println!("'{base}' removed from {}", config.install_dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!(
                    "{} '{base}' does not exist in {}",
                    "warning:".yellow(),
                    config.install_dir.display()
                );
            }
            Err(e) => {
                eprintln!(
                    "{} failed to remove '{base}' from {}: {e}",
                    "error:".red(),
                    config.install_dir.display()
                );
            }
        }
    }
}

/// Names of the binaries currently present in the install directory.
pub fn installed_binaries(config: &Config) -> Result<Vec<String>> {
    util::list_dir_files(&config.install_dir)
}
