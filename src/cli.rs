use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    #[command(subcommand)]
    pub(crate) command: BinfetchCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum BinfetchCommand {
    /// Installs binaries into the install directory. Partial failures are
    /// reported but do not fail the batch
    #[command(visible_alias = "add")]
    Install {
        /// Suppress per-item progress output
        #[clap(long)]
        silent: bool,
        #[clap(required = true)]
        names: Vec<String>,
    },
    /// Removes binaries from the install directory
    #[command(visible_alias = "del")]
    Remove {
        #[clap(required = true)]
        names: Vec<String>,
    },
    /// Re-downloads installed binaries whose checksum drifted from the remote
    /// copy. Defaults to every installed binary known to the repositories
    Update {
        names: Vec<String>,
    },
    /// Runs a binary from the cache, fetching it first if needed. The exit
    /// code of the child is propagated
    Run {
        /// Print resolution transitions
        #[clap(long, conflicts_with_all = ["silent", "transparent"])]
        verbose: bool,
        /// Suppress transitions and the progress bar
        #[clap(long, conflicts_with = "transparent")]
        silent: bool,
        /// Prefer a same-named binary on the system PATH
        #[clap(long)]
        transparent: bool,
        name: String,
        #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Shows metadata for a binary, or lists installed binaries with no name
    Info {
        name: Option<String>,
    },
    /// Searches known binaries by name and description
    Search {
        /// Maximum number of results to print
        #[clap(short = 'l', long, default_value_t = 90)]
        limit: usize,
        term: String,
    },
    /// Lists all binary names known to the repositories
    List {
        /// Include descriptions
        #[clap(short = 'd', long)]
        described: bool,
    },
}
