//! `git` subprocess backend.
//!
//! Runs git in a fixed working directory with captured stdout/stderr.
//! All repository access in the binary goes through [`GitCli`].

use super::{CommandOutput, VcsBackend};
use crate::error::{Result, TidyError};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// [`VcsBackend`] implementation that invokes the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    cwd: PathBuf,
    remote: String,
}

impl GitCli {
    /// Create a backend rooted at `cwd` that fetches from `remote`.
    pub fn new<P: AsRef<Path>>(cwd: P, remote: impl Into<String>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            remote: remote.into(),
        }
    }

    /// Top-level directory of the repository containing the working directory.
    pub fn repo_root(&self) -> Result<PathBuf> {
        let output = self.run(&["rev-parse", "--show-toplevel"])?;
        if output.success() {
            Ok(PathBuf::from(output.stdout.trim()))
        } else {
            Err(TidyError::NotARepository)
        }
    }

    /// The `git` invocation for `args`.
    ///
    /// Runs under the C locale: listing annotations such as `gone` and
    /// porcelain output are matched as untranslated text.
    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new("git");
        command
            .current_dir(&self.cwd)
            .env("LC_ALL", "C")
            .args(args);
        command
    }

    /// Run git with `args`, capturing its output whatever the exit status.
    ///
    /// Fails only if the process cannot be spawned.
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        debug!("running git {} in {}", args.join(" "), self.cwd.display());

        let output = self
            .command(args)
            .output()
            .map_err(|e| {
                TidyError::Environment(format!(
                    "failed to execute git {}: {} (is git installed?)",
                    args.first().unwrap_or(&""),
                    e
                ))
            })?;

        let captured = from_output(&output);
        debug!(
            "git {} exited with {}",
            args.first().unwrap_or(&""),
            captured.exit_code
        );
        Ok(captured)
    }
}

fn from_output(output: &Output) -> CommandOutput {
    CommandOutput {
        exit_code: output.status.code().unwrap_or(-1),
        // Leading whitespace is significant in `git branch` and `git status` output.
        stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

impl VcsBackend for GitCli {
    fn is_repository(&self) -> Result<bool> {
        Ok(self.run(&["rev-parse", "--git-dir"])?.success())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let output = self.run(&["branch", "--show-current"])?;
        if !output.success() {
            return Err(TidyError::Git {
                command: "branch --show-current".to_string(),
                detail: output.diagnostic(),
            });
        }
        let name = output.stdout.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    fn list_branches_verbose(&self) -> Result<CommandOutput> {
        self.run(&["branch", "-vv", "--no-color"])
    }

    fn fetch_prune(&self) -> Result<CommandOutput> {
        self.run(&["fetch", "--prune", &self.remote])
    }

    fn checkout(&self, branch: &str) -> Result<CommandOutput> {
        self.run(&["checkout", branch])
    }

    fn pull(&self) -> Result<CommandOutput> {
        self.run(&["pull"])
    }

    fn status(&self) -> Result<CommandOutput> {
        self.run(&["status", "--porcelain", "--untracked-files=no"])
    }

    fn delete_branch_forced(&self, branch: &str) -> Result<CommandOutput> {
        self.run(&["branch", "-D", branch])
    }

    fn branch_exists(&self, branch: &str) -> Result<bool> {
        let reference = format!("refs/heads/{}", branch);
        Ok(self
            .run(&["rev-parse", "--verify", "--quiet", &reference])?
            .success())
    }

    fn list_remotes(&self) -> Result<CommandOutput> {
        self.run(&["remote"])
    }

    fn list_aliases(&self) -> Result<CommandOutput> {
        self.run(&["config", "--get-regexp", r"^alias\."])
    }
}
