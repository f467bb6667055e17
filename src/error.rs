//! Error types for `fixver`.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by port trait methods.
///
/// Ports stay adapter-agnostic: live, recording, and replaying adapters all
/// report failures through this one type.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a `fixver` run.
#[derive(Debug, Error)]
pub enum Error {
    /// Tracker credentials are required but not present in the environment.
    #[error("Set JIRA_USER and JIRA_PASSWORD in the environment to authenticate")]
    MissingCredentials,

    /// A settings file could not be read or parsed.
    #[error("Invalid config {path}: {message}")]
    Config {
        /// The settings file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// A fixup, exclude, or whitelist input file could not be read or parsed.
    #[error("Invalid input file {path}: {message}")]
    Input {
        /// The input file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The issue tracker rejected or failed a request.
    #[error("Issue tracker error: {0}")]
    Tracker(PortError),

    /// Reading commit history failed.
    #[error("Git error: {0}")]
    Git(PortError),

    /// Reading from or writing to the local cache failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// The confirmation prompt could not be shown or read.
    #[error("Confirmation failed: {0}")]
    Prompt(PortError),

    /// The operator declined the confirmation prompt.
    #[error("Cancelled, no changes were sent")]
    Cancelled,

    /// The command line could not be parsed.
    #[error("{0}")]
    Usage(String),

    /// The log subscriber could not be installed.
    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    /// Local I/O failure (change log, runtime setup).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
