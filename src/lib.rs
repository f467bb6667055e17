//! Core library entry for the `fixver` CLI.
//!
//! `fixver` keeps JIRA fix versions honest against git history: `validate`
//! reconciles the commits of a revision range with the issues labelled for a
//! release, and `update` applies a release-label edit to a set of issues.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod inputs;
pub mod labels;
pub mod logging;
pub mod ports;
pub mod reconcile;
pub mod tracker;

use clap::Parser;

pub use commands::Outcome;
pub use error::{Error, Result};

/// Run the CLI with the provided arguments.
///
/// Logging is left to the caller.
///
/// # Errors
///
/// Returns an error when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)
        .map_err(|err| Error::Usage(err.to_string()))?;
    commands::dispatch(&cli)
}
