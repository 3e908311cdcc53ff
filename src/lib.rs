//! # Binfetch Core Library
//!
//! This crate contains the core logic and building blocks of the `binfetch` tool – a
//! command-line downloader/runner for statically linked binaries hosted in plain HTTP
//! repositories and described by JSON metadata documents.
//!
//! `binfetch` resolves a binary name to a download URL, installs binaries into a flat
//! user-writable directory, keeps a bounded run-cache for transiently used binaries,
//! and can batch-update installed binaries whose checksum drifted from the remote copy.
//! No system package manager, no elevated privileges.
//!
//! This library is built for the `binfetch` CLI, but you can also reuse it as a backend
//! in other tools.
//!
//! ## Modules Overview
//! - [`config`] – The runtime configuration object (repositories, directories, limits)
//! - [`error`] – The error taxonomy shared by all components
//! - [`repo`] – Resolving a binary name to the first repository that hosts it
//! - [`fetch`] – Interruption-safe, atomic downloads with optional progress output
//! - [`cache`] – The bounded run-cache and its access-time based eviction
//! - [`metadata`] – Remote JSON metadata documents (list, search, info, update input)
//! - [`batch`] – Thread-per-item execution with deterministically ordered output
//! - [`install`] – Batch installation and removal of binaries
//! - [`update`] – Checksum-diff driven batch updates
//! - [`run`] – Run-from-cache (or PATH) execution with exit code propagation
//! - [`interrupt`] – Process-wide cooperative cancellation
//! - [`util`] – Shared helpers (hashing, permissions, output shaping)

pub mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod interrupt;
pub mod metadata;
pub mod repo;
pub mod run;
pub mod update;
pub mod util;

pub use config::Config;
pub use error::BinError;
pub use install::{BatchSummary, install_batch};
pub use metadata::BinaryMetadataRecord;
pub use run::RunMode;
pub use update::UpdateSummary;
