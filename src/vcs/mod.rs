//! Version-control backend abstraction.
//!
//! Everything branchtidy knows about a repository comes through the
//! [`VcsBackend`] trait. The production implementation, [`GitCli`], shells
//! out to `git`; tests substitute a scripted double that returns canned
//! text and exit codes.
//!
//! A primitive returns `Err` only when the backend could not be invoked at
//! all. A non-zero exit status is ordinary data carried in [`CommandOutput`],
//! because callers differ in whether a given failure is fatal.

mod git;

pub use git::GitCli;

use crate::error::Result;

/// Captured result of one backend invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code (`-1` if terminated by a signal).
    pub exit_code: i32,
    /// Standard output, with trailing whitespace removed.
    pub stdout: String,
    /// Standard error (trimmed).
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// The text worth showing a user when this invocation failed.
    ///
    /// Prefers stderr; falls back to stdout (git prints some failures there),
    /// then to the bare exit code.
    pub fn diagnostic(&self) -> String {
        if !self.stderr.is_empty() {
            self.stderr.clone()
        } else if !self.stdout.trim().is_empty() {
            self.stdout.trim().to_string()
        } else {
            format!("exit code {}", self.exit_code)
        }
    }
}

/// Primitive repository operations used by the classifier, the deletion
/// engine, the sync controller and the cleanup orchestrator.
///
/// Calls block until the backend finishes; there is no timeout.
pub trait VcsBackend {
    /// Whether the working directory is inside a repository.
    fn is_repository(&self) -> Result<bool>;

    /// Name of the checked-out branch, or `None` when HEAD is detached.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Verbose branch listing with tracking annotations (`git branch -vv`).
    fn list_branches_verbose(&self) -> Result<CommandOutput>;

    /// Fetch from the remote, pruning remote-tracking refs that no longer exist.
    fn fetch_prune(&self) -> Result<CommandOutput>;

    fn checkout(&self, branch: &str) -> Result<CommandOutput>;

    fn pull(&self) -> Result<CommandOutput>;

    /// Porcelain status of tracked paths.
    fn status(&self) -> Result<CommandOutput>;

    /// Delete a local branch regardless of merge status.
    fn delete_branch_forced(&self, branch: &str) -> Result<CommandOutput>;

    /// Whether a local branch with this name exists.
    fn branch_exists(&self, branch: &str) -> Result<bool>;

    /// Configured remote names, one per line (`git remote`).
    fn list_remotes(&self) -> Result<CommandOutput>;

    /// Configured command aliases as `alias.<name> <value>` lines.
    fn list_aliases(&self) -> Result<CommandOutput>;
}
