//! Local cache of fetched commits and issues, stored as YAML cassettes.
//!
//! `--save-cache` records every commit-source and tracker call of a run;
//! `--load-cache` answers the same calls from disk without git or network.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
