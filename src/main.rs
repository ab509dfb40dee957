//! Branchtidy: keep a local git repository's branches in step with its remote.
//!
//! This is the main entry point for the `branchtidy` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod aliases;
mod branches;
mod cleanup;
mod cli;
mod commands;
mod config;
mod error;
mod exit_codes;
mod report;
mod sync;
mod vcs;

#[cfg(test)]
mod test_support;

use cli::Cli;
use env_logger::Env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG still overrides the level chosen here.
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
