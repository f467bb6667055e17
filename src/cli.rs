//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI parser for `fixver`.
#[derive(Debug, Parser)]
#[command(
    name = "fixver",
    version,
    about = "Reconcile JIRA fix versions with git history"
)]
pub struct Cli {
    /// Increase log detail (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file (YAML).
    #[arg(long, env = "FIXVER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add the target release label to issues fixed in earlier releases.
    ///
    /// Dry run unless --force is given.
    Update {
        /// Send the updates to JIRA after confirmation.
        #[arg(short, long)]
        force: bool,

        /// Write the before/after fix versions of each issue to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File of issue keys to leave untouched, one per line.
        #[arg(short, long)]
        excludes: Option<PathBuf>,
    },

    /// Compare the issues labelled with a fix version against git history.
    Validate {
        /// Repository to read history from.
        #[arg(long, default_value = ".")]
        source_dir: PathBuf,

        /// Start of the history range.
        #[arg(long)]
        start_ref: String,

        /// End of the history range.
        #[arg(long, default_value = "HEAD")]
        end_ref: String,

        /// Ref whose history is excluded from the range.
        #[arg(long)]
        exclude_ref: Option<String>,

        /// Release label to validate.
        #[arg(long)]
        fix_version: String,

        /// JSON file of commit fixups and ignores.
        #[arg(long, default_value = "fixups.json")]
        fixups: PathBuf,

        /// File of issue keys known not to need a commit, one per line.
        #[arg(long)]
        whitelist_jiras: Option<PathBuf>,

        /// Save fetched commits and issues to this directory.
        #[arg(long, conflicts_with = "load_cache")]
        save_cache: Option<PathBuf>,

        /// Answer git and JIRA calls from a directory written by --save-cache.
        #[arg(long)]
        load_cache: Option<PathBuf>,
    },
}
