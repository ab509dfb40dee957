//! Command implementations for branchtidy.
//!
//! This module resolves the repository, loads configuration and picks an
//! output sink, then routes each CLI command to its handler.

mod cleanup;
mod print_aliases;
mod switch_to_main;

use crate::cli::{Cli, Command};
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{Result, TidyError};
use crate::report::{ConsoleSink, JsonSink, ReportSink};
use crate::vcs::GitCli;
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Resolved state shared by every command.
pub(crate) struct CommandContext {
    /// Backend rooted at the invocation directory.
    pub git: GitCli,
    pub config: Config,
}

impl CommandContext {
    /// Resolve the context for a command run from `cwd`.
    ///
    /// Outside a repository only an explicit `--config` file is read; the
    /// repository check itself is left to the commands that need one.
    fn resolve(cwd: &Path, config_path: Option<&Path>) -> Result<Self> {
        let probe = GitCli::new(cwd, Config::default().remote);
        let repo_root = probe.repo_root().ok();

        let config = match (config_path, &repo_root) {
            (Some(path), _) => Config::load(path)?,
            (None, Some(root)) => Config::load_or_default(root.join(DEFAULT_CONFIG_FILE))?,
            (None, None) => Config::default(),
        };
        debug!("repository root: {:?}", repo_root);
        debug!("effective config:\n{}", config.to_yaml()?);

        Ok(Self {
            git: GitCli::new(cwd, config.remote.clone()),
            config,
        })
    }
}

/// Dispatch a command to its implementation, writing results to stdout.
///
/// This is the main entry point for command execution.
pub fn dispatch(cli: Cli) -> Result<()> {
    let cwd = current_dir()?;
    let stdout = std::io::stdout();
    run(cli, &cwd, stdout.lock())
}

/// Run `cli` from `cwd`, rendering to `out`.
pub(crate) fn run<W: Write>(cli: Cli, cwd: &Path, out: W) -> Result<()> {
    let ctx = CommandContext::resolve(cwd, cli.config.as_deref())?;
    let mut sink = make_sink(cli.json, out);

    match cli.command {
        Command::PrintAliases => print_aliases::cmd_print_aliases(&ctx, sink.as_mut()),
        Command::Cleanup(args) => cleanup::cmd_cleanup(&ctx, args, sink.as_mut()),
        Command::SwitchToMain => switch_to_main::cmd_switch_to_main(&ctx, sink.as_mut()),
    }
}

fn make_sink<'a, W: Write + 'a>(json: bool, out: W) -> Box<dyn ReportSink + 'a> {
    if json {
        Box::new(JsonSink::new(out))
    } else {
        Box::new(ConsoleSink::new(out))
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        TidyError::Environment(format!("failed to read current directory: {}", e))
    })
}
