//! Repository probing: resolving a binary name to the first repository URL
//! that confirms its existence.

use log::debug;

use crate::config::Config;
use crate::error::{BinError, Result};

/// Resolves a binary name to a download URL by probing each repository in
/// priority order with a HEAD request. Avoids pulling a full metadata
/// document just to find a URL.
///
/// # Errors
///
/// `BinError::NotFound` when every repository answered but none hosts the
/// binary, `BinError::Network` when a probe could not be issued at all.
pub fn find_url(config: &Config, name: &str) -> Result<String> {
    let client = reqwest::blocking::Client::new();
    for repository in &config.repositories {
        let url = format!("{repository}{name}");
        debug!("probing {url}");
        let response = client.head(&url).send()?;
        if response.status().is_success() {
            return Ok(url);
        }
    }
    Err(BinError::NotFound(name.to_string()))
}
