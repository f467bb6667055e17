//! Command dispatch and handlers.

pub mod update;
pub mod validate;

use std::process::ExitCode;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::Result;
use crate::ports::RevisionRange;

use self::update::UpdateOptions;
use self::validate::ValidateOptions;

/// Result of a command that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Success,
    /// `validate` found at least one discrepancy.
    Discrepancy,
}

impl Outcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Discrepancy => ExitCode::FAILURE,
        }
    }
}

/// Dispatch a parsed command to its handler.
///
/// Settings are loaded once and a current-thread runtime is built to drive
/// tracker calls.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or the selected command fails.
pub fn dispatch(cli: &Cli) -> Result<Outcome> {
    let settings = Settings::load(cli.config.as_deref())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match &cli.command {
        Command::Update {
            force,
            output,
            excludes,
        } => {
            let options = UpdateOptions {
                force: *force,
                output: output.clone(),
                excludes: excludes.clone(),
            };
            update::run(&runtime, &settings, &options)?;
            Ok(Outcome::Success)
        }
        Command::Validate {
            source_dir,
            start_ref,
            end_ref,
            exclude_ref,
            fix_version,
            fixups,
            whitelist_jiras,
            save_cache,
            load_cache,
        } => {
            let options = ValidateOptions {
                range: RevisionRange {
                    repo: source_dir.clone(),
                    start: start_ref.clone(),
                    end: end_ref.clone(),
                    exclude: exclude_ref.clone(),
                },
                fix_version: fix_version.clone(),
                fixups: fixups.clone(),
                whitelist: whitelist_jiras.clone(),
                save_cache: save_cache.clone(),
                load_cache: load_cache.clone(),
            };
            let discrepancy = validate::run(&runtime, &settings, &options)?;
            let outcome = if discrepancy {
                Outcome::Discrepancy
            } else {
                Outcome::Success
            };
            Ok(outcome)
        }
    }
}
