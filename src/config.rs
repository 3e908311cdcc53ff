use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use directories::{BaseDirs, ProjectDirs};

/// Default upper bound on run-cache entries before eviction kicks in.
pub const MAX_CACHE_SIZE: usize = 10;
/// How many of the oldest-accessed entries one eviction pass removes.
pub const BINARIES_TO_DELETE: usize = 5;

/// Runtime configuration, built once at startup and passed by reference into
/// every component. Repository order is priority order: the first repository
/// that answers a probe wins.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URLs serving raw binaries at name-suffixed paths, highest priority first.
    pub repositories: Vec<String>,
    /// URLs of JSON metadata documents enumerating known binaries.
    pub metadata_urls: Vec<String>,
    /// Architecture tag that metadata records are matched against.
    pub arch: String,
    /// Persistent directory that `install` places binaries into.
    pub install_dir: PathBuf,
    /// Bounded, evictable directory used by `run`.
    pub cache_dir: PathBuf,
    pub max_cache_size: usize,
    pub binaries_to_delete: usize,
    /// Progress bars are suppressed when false.
    pub show_progress: bool,
    /// Long descriptions are truncated to the terminal width when true.
    pub truncate_output: bool,
}

impl Config {
    /// Builds the configuration from the host architecture and environment.
    ///
    /// Recognized environment variables:
    /// - `INSTALL_DIR` – install directory override
    /// - `BINFETCH_CACHE_DIR` – cache directory override
    /// - `BINFETCH_REPOS` / `BINFETCH_METADATA_URLS` – comma-separated URL overrides
    /// - `BINFETCH_NO_PROGRESS` – disable progress bars
    /// - `BINFETCH_NO_TRUNCATION` – print full descriptions
    pub fn from_env() -> Result<Config> {
        let (mut repositories, mut metadata_urls, arch) = arch_defaults()?;

        if let Some(list) = env_list("BINFETCH_REPOS") {
            repositories = list;
        }
        if let Some(list) = env_list("BINFETCH_METADATA_URLS") {
            metadata_urls = list;
        }

        let install_dir = match std::env::var_os("INSTALL_DIR") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_install_dir()?,
        };
        let cache_dir = match std::env::var_os("BINFETCH_CACHE_DIR") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_cache_dir()?,
        };

        Ok(Config {
            repositories,
            metadata_urls,
            arch,
            install_dir,
            cache_dir,
            max_cache_size: MAX_CACHE_SIZE,
            binaries_to_delete: BINARIES_TO_DELETE,
            show_progress: std::env::var_os("BINFETCH_NO_PROGRESS").is_none(),
            truncate_output: std::env::var_os("BINFETCH_NO_TRUNCATION").is_none(),
        })
    }

    /// Scratch directory for in-flight downloads. Lives under the cache
    /// directory but its contents never count as cache entries.
    pub fn staging_dir(&self) -> PathBuf {
        self.cache_dir.join("staging")
    }
}

/// Built-in repository and metadata locations per supported architecture.
fn arch_defaults() -> Result<(Vec<String>, Vec<String>, String)> {
    match std::env::consts::ARCH {
        "x86_64" => Ok((
            vec![
                "https://bin.ajam.dev/x86_64_Linux/".to_string(),
                "https://bin.ajam.dev/x86_64_Linux/Baseutils/".to_string(),
            ],
            vec![
                "https://raw.githubusercontent.com/metis-os/hysp-pkgs/main/data/metadata.json"
                    .to_string(),
            ],
            "x86_64".to_string(),
        )),
        "aarch64" => Ok((
            vec![
                "https://bin.ajam.dev/aarch64_arm64_Linux/".to_string(),
                "https://bin.ajam.dev/aarch64_arm64_Linux/Baseutils/".to_string(),
            ],
            vec![
                "https://raw.githubusercontent.com/metis-os/hysp-pkgs/main/data/metadata.json"
                    .to_string(),
            ],
            "aarch64".to_string(),
        )),
        other => bail!("unsupported architecture: {other}"),
    }
}

fn env_list(var: &str) -> Option<Vec<String>> {
    let raw = std::env::var(var).ok()?;
    let list: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if list.is_empty() { None } else { Some(list) }
}

fn default_install_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().ok_or_else(|| anyhow!("could not determine home directory"))?;
    Ok(base.home_dir().join(".local").join("bin"))
}

fn default_cache_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("org", "binfetch", "binfetch")
        .ok_or_else(|| anyhow!("could not determine project directories"))?;
    Ok(proj.cache_dir().to_path_buf())
}
