use std::path::PathBuf;

/// Errors produced by the binfetch core.
///
/// Per-item batch failures are recovered locally by the orchestrators and
/// reported in the final tally; single-item operations (`run`, a lone
/// `install`) let these surface to the process exit path.
#[derive(Debug, thiserror::Error)]
pub enum BinError {
    /// The binary is not hosted by any configured repository.
    #[error("'{0}' was not found in any configured repository")]
    NotFound(String),

    /// A repository or metadata host answered with a non-success status.
    #[error("{url} answered HTTP status {status}")]
    Remote { url: String, status: u16 },

    /// A metadata document could not be parsed.
    #[error("malformed metadata from {url}: {source}")]
    RemoteFormat {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request or probe could not be issued at all.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// An in-flight transfer broke mid-stream.
    #[error("transfer from {url} failed: {source}")]
    Transfer {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Create/copy/rename/chmod failure on the local filesystem.
    #[error("{}: {source}", .path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The user cancelled the operation mid-transfer.
    #[error("interrupted")]
    Interrupted,
}

impl BinError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BinError::LocalIo {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = BinError> = std::result::Result<T, E>;
