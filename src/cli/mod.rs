//! CLI argument parsing for branchtidy.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Branchtidy: keep a local git repository's branches in step with its remote.
///
/// Deletes local branches that have no remote tracking (and, with --force,
/// branches whose remote has been deleted), switches back to the trunk
/// safely, and lists configured git aliases.
#[derive(Parser, Debug)]
#[command(name = "branchtidy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log every git invocation to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from this file instead of `.branchtidy.yaml` at the repository root.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for branchtidy.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured git aliases with a short description.
    #[command(name = "print_aliases", alias = "print-aliases")]
    PrintAliases,

    /// Delete stale local branches.
    ///
    /// Switches to the trunk, prunes remote-tracking refs, deletes branches
    /// with no remote tracking, then returns to the original branch if it
    /// still exists.
    Cleanup(CleanupArgs),

    /// Check out the trunk and pull it.
    ///
    /// Stops without changing anything if the working tree has uncommitted
    /// changes to tracked files.
    #[command(name = "switch_to_main", alias = "switch-to-main")]
    SwitchToMain,
}

/// Arguments for the `cleanup` command.
#[derive(Parser, Debug)]
pub struct CleanupArgs {
    /// Also delete branches whose remote branch no longer exists.
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
