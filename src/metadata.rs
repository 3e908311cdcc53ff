//! Remote metadata documents.
//!
//! Each metadata URL serves a JSON document with a `packages` array of
//! per-binary records. Records are fetched fresh per invocation and never
//! persisted; the update engine only compares their declared checksums
//! in memory.

use serde::Deserialize;

use crate::config::Config;
use crate::error::{BinError, Result};

/// Remote-declared attributes of one binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BinaryMetadataRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub size: String,
    #[serde(default, alias = "sha")]
    pub sha256: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Deserialize)]
struct MetadataDocument {
    #[serde(default)]
    packages: Vec<BinaryMetadataRecord>,
}

/// Names that are metadata noise rather than runnable binaries.
const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".7z", ".bz2", ".gz", ".json", ".md", ".txt", ".tar", ".zip",
];
const EXCLUDED_SUFFIXES: &[&str] = &["_dir"];
const EXCLUDED_NAMES: &[&str] = &["robotstxt"];

/// Fetches and parses every configured metadata document. Records for other
/// architectures are kept; callers filter with [`for_arch`] where it matters.
pub fn fetch_records(config: &Config) -> Result<Vec<BinaryMetadataRecord>> {
    let client = reqwest::blocking::Client::new();
    let mut records = Vec::new();
    for url in &config.metadata_urls {
        let response = client.get(url).send()?;
        if !response.status().is_success() {
            return Err(BinError::Remote {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        let body = response.text()?;
        records.extend(parse_document(url, &body)?);
    }
    Ok(records)
}

/// Parses one metadata document body.
pub fn parse_document(url: &str, body: &str) -> Result<Vec<BinaryMetadataRecord>> {
    let document: MetadataDocument =
        serde_json::from_str(body).map_err(|e| BinError::RemoteFormat {
            url: url.to_string(),
            source: e,
        })?;
    Ok(document.packages)
}

/// Keeps the records matching the validated architecture. Records that do not
/// declare an architecture are assumed portable.
pub fn for_arch(records: Vec<BinaryMetadataRecord>, arch: &str) -> Vec<BinaryMetadataRecord> {
    records
        .into_iter()
        .filter(|r| r.architecture.is_empty() || r.architecture == arch)
        .collect()
}

/// All records known for the validated architecture, with archive/doc noise
/// filtered out, sorted and deduplicated by name. Both the plain and the
/// described listing go through here so they agree on what counts as a
/// binary.
pub fn known_records(config: &Config) -> Result<Vec<BinaryMetadataRecord>> {
    let records = for_arch(fetch_records(config)?, &config.arch);
    Ok(binary_records(records))
}

/// Names of [`known_records`].
pub fn known_names(config: &Config) -> Result<Vec<String>> {
    Ok(known_records(config)?.into_iter().map(|r| r.name).collect())
}

fn binary_records(records: Vec<BinaryMetadataRecord>) -> Vec<BinaryMetadataRecord> {
    let mut records: Vec<_> = records
        .into_iter()
        .filter(|r| is_binary_name(&r.name))
        .collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records.dedup_by(|a, b| a.name == b.name);
    records
}

fn is_binary_name(name: &str) -> bool {
    if name.is_empty() || EXCLUDED_NAMES.contains(&name) {
        return false;
    }
    let lower = name.to_lowercase();
    if EXCLUDED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return false;
    }
    !EXCLUDED_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

/// Outcome of an exact-name metadata lookup.
pub enum InfoLookup {
    Found(BinaryMetadataRecord),
    /// The name exists in the metadata, but only for other architectures.
    WrongArch,
    Missing,
}

/// Looks one binary up by exact name for the validated architecture.
pub fn find_record(config: &Config, name: &str) -> Result<InfoLookup> {
    let records = fetch_records(config)?;
    let mut wrong_arch = false;
    for record in records {
        if record.name != name {
            continue;
        }
        if record.architecture.is_empty() || record.architecture == config.arch {
            return Ok(InfoLookup::Found(record));
        }
        wrong_arch = true;
    }
    Ok(if wrong_arch {
        InfoLookup::WrongArch
    } else {
        InfoLookup::Missing
    })
}

/// Case-insensitive substring search over name and description.
pub fn search(records: &[BinaryMetadataRecord], term: &str) -> Vec<BinaryMetadataRecord> {
    let term = term.to_lowercase();
    let mut hits: Vec<BinaryMetadataRecord> = records
        .iter()
        .filter(|r| {
            is_binary_name(&r.name)
                && format!("{}{}", r.name, r.description)
                    .to_lowercase()
                    .contains(&term)
        })
        .cloned()
        .collect();
    hits.sort_by(|a, b| a.name.cmp(&b.name));
    hits.dedup_by(|a, b| a.name == b.name);
    hits
}
