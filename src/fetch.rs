//! Interruption-safe atomic downloads.
//!
//! Bytes are streamed into a staging file under the cache's scratch directory
//! and only relocated to the destination once complete, so readers never see
//! a partial binary. The staging file is removed on every exit path, success,
//! failure, or cancellation alike.

use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{BinError, Result};
use crate::{interrupt, util};

/// Whether a fetch reports progress to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Determinate bar when the content length is known, spinner otherwise.
    Auto,
    /// No progress output, e.g. for `--silent` or batch workers.
    Hidden,
}

/// Downloads `url` to `dest`, setting the executable bit.
///
/// The fetcher is stateless and reentrant per distinct destination;
/// serializing duplicate requests for one destination is the caller's
/// responsibility. Cancellation is observed at read-loop granularity.
pub fn fetch_binary(config: &Config, url: &str, dest: &Path, progress: Progress) -> Result<()> {
    let staging_dir = config.staging_dir();
    std::fs::create_dir_all(&staging_dir).map_err(|e| BinError::local_io(&staging_dir, e))?;

    if interrupt::requested() {
        return Err(BinError::Interrupted);
    }

    let client = reqwest::blocking::Client::new();
    let mut response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(BinError::Remote {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let bar = progress_bar(config, progress, response.content_length());

    // Dropping the NamedTempFile removes the staging file, whatever path we
    // leave this function on.
    let mut staging =
        NamedTempFile::new_in(&staging_dir).map_err(|e| BinError::local_io(&staging_dir, e))?;

    let mut buf = [0u8; 64 * 1024];
    loop {
        if interrupt::requested() {
            bar.finish_and_clear();
            return Err(BinError::Interrupted);
        }
        let n = response.read(&mut buf).map_err(|e| BinError::Transfer {
            url: url.to_string(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        staging
            .write_all(&buf[..n])
            .map_err(|e| BinError::local_io(staging.path(), e))?;
        bar.inc(n as u64);
    }
    bar.finish_and_clear();

    staging
        .flush()
        .map_err(|e| BinError::local_io(staging.path(), e))?;
    util::set_executable(staging.path())?;
    commit(staging, dest)?;
    debug!("fetched {url} -> {}", dest.display());
    Ok(())
}

/// Relocates the completed staging file to its destination. The destination
/// may pre-exist, so it is removed first; a rename that cannot cross the
/// filesystem boundary falls back to a copy, with the staging file cleaned up
/// on drop.
fn commit(staging: NamedTempFile, dest: &Path) -> Result<()> {
    if dest.exists() {
        std::fs::remove_file(dest).map_err(|e| BinError::local_io(dest, e))?;
    }
    match staging.persist(dest) {
        Ok(_) => Ok(()),
        Err(persist_err) => {
            let staging = persist_err.file;
            std::fs::copy(staging.path(), dest).map_err(|e| BinError::local_io(dest, e))?;
            Ok(())
        }
    }
}

fn progress_bar(config: &Config, progress: Progress, content_length: Option<u64>) -> ProgressBar {
    if !config.show_progress || progress == Progress::Hidden {
        return ProgressBar::hidden();
    }
    match content_length {
        Some(total) => {
            let style = ProgressStyle::with_template(
                "[{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
            ProgressBar::new(total).with_style(style)
        }
        None => {
            let bar = ProgressBar::new_spinner().with_message("downloading...");
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        }
    }
}
