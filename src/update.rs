//! Checksum-diff driven batch updates.
//!
//! A candidate is reinstalled when its local SHA-256 digest differs from the
//! remote-declared one; digest comparison is an exact hex string match and a
//! mismatch is the sole re-fetch trigger. There is no version ordering: the
//! remote copy is authoritative, so a remote artifact reverted to an older
//! digest reverts the local copy on the next update.

use std::collections::HashMap;

use colored::Colorize;
use log::{debug, warn};

use crate::config::Config;
use crate::error::{BinError, Result};
use crate::fetch::{self, Progress};
use crate::metadata::{self, BinaryMetadataRecord};
use crate::{batch, install, interrupt, repo, util};

/// Per-candidate outcome. A digest mismatch is a unit of work, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated,
    UpToDate,
    /// No remote digest declared; the file is not ours to manage.
    SkippedUntracked,
    /// Listed for update but missing locally.
    SkippedMissing,
}

/// Final tally of one update pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub updated: usize,
    pub up_to_date: usize,
    pub skipped: usize,
    pub errored: usize,
    pub checked: usize,
}

/// Updates the named binaries, or every installed binary known to the
/// metadata when `names` is empty. Untracked local files are left untouched.
/// Candidates run in parallel with the same ordered-output discipline as
/// installation; the pass is idempotent when nothing changed remotely.
pub fn update(config: &Config, names: &[String]) -> Result<UpdateSummary> {
    let records = metadata::for_arch(metadata::fetch_records(config)?, &config.arch);
    let by_name: HashMap<&str, &BinaryMetadataRecord> =
        records.iter().map(|r| (r.name.as_str(), r)).collect();

    let candidates: Vec<String> = if names.is_empty() {
        install::installed_binaries(config)?
            .into_iter()
            .filter(|name| {
                let known = by_name.contains_key(name.as_str());
                if !known {
                    debug!("'{name}' does not come from our repositories, leaving it alone");
                }
                known
            })
            .collect()
    } else {
        names.iter().map(|n| util::base_name(n)).collect()
    };

    let mut summary = UpdateSummary::default();
    batch::run_ordered(
        &candidates,
        |_index, name| {
            if interrupt::requested() {
                return Err(BinError::Interrupted);
            }
            update_one(config, name, by_name.get(name).copied())
        },
        |_index, name, outcome: Result<UpdateStatus>| {
            summary.checked += 1;
            match outcome {
                Ok(UpdateStatus::Updated) => {
                    summary.updated += 1;
                    println!("{} {name}", "updated".green());
                }
                Ok(UpdateStatus::UpToDate) => {
                    summary.up_to_date += 1;
                    println!("{name} is up to date");
                }
                Ok(UpdateStatus::SkippedUntracked) => {
                    summary.skipped += 1;
                    println!("skipped {name}: not tracked by the repositories");
                }
                Ok(UpdateStatus::SkippedMissing) => {
                    summary.skipped += 1;
                    warn!("skipped '{name}': not present in {}", config.install_dir.display());
                    println!("skipped {name}: not installed");
                }
                Err(e) => {
                    summary.errored += 1;
                    eprintln!("{} updating {name}: {e}", "error".red());
                }
            }
        },
    );

    if interrupt::requested() {
        eprintln!("{}", "interrupted; update aborted".yellow());
        return Ok(summary);
    }
    println!(
        "{} updated, {} up to date, {} skipped, {} errored, {} checked",
        summary.updated.to_string().green(),
        summary.up_to_date,
        summary.skipped,
        summary.errored.to_string().red(),
        summary.checked
    );
    Ok(summary)
}

fn update_one(
    config: &Config,
    name: &str,
    record: Option<&BinaryMetadataRecord>,
) -> Result<UpdateStatus> {
    let Some(record) = record else {
        return Ok(UpdateStatus::SkippedUntracked);
    };
    let remote_digest = record.sha256.trim();
    if remote_digest.is_empty() {
        return Ok(UpdateStatus::SkippedUntracked);
    }

    let local = util::install_path(&config.install_dir, name);
    if !local.exists() {
        return Ok(UpdateStatus::SkippedMissing);
    }

    let local_digest = util::sha256_file(&local)?;
    if local_digest == remote_digest {
        return Ok(UpdateStatus::UpToDate);
    }

    // Forced reinstall, bypassing the run-cache.
    let url = repo::find_url(config, name)?;
    fetch::fetch_binary(config, &url, &local, Progress::Hidden)?;
    Ok(UpdateStatus::Updated)
}
