//! Binary entrypoint for the `fixver` CLI.

use std::process::ExitCode;

use clap::Parser;
use fixver::cli::Cli;

fn main() -> ExitCode {
    // Usage errors and --help exit here through clap.
    let cli = Cli::parse();

    if let Err(err) = fixver::logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("{err}");
    }

    match fixver::commands::dispatch(&cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
