use crate::error::Result;
use crate::vcs::{CommandOutput, VcsBackend};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub(crate) fn create_test_repo() -> TempDir {
    create_repo(false)
}

/// Repository whose `origin` remote points back at itself, so fetch works offline.
pub(crate) fn create_test_repo_with_remote() -> TempDir {
    create_repo(true)
}

fn create_repo(add_origin_remote: bool) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    if add_origin_remote {
        let path_str = path.to_string_lossy().to_string();
        git(path, &["remote", "add", "origin", &path_str]);
    }

    temp_dir
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

impl CommandOutput {
    /// A successful invocation with the given stdout.
    pub(crate) fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed invocation with the given exit code and stderr.
    pub(crate) fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// In-memory [`VcsBackend`] double.
///
/// Keeps a small model of local branches so listings reflect earlier
/// checkouts and deletions. Every primitive call is recorded in order.
pub(crate) struct ScriptedBackend {
    is_repo: bool,
    branches: RefCell<Vec<(String, String)>>,
    current: RefCell<Option<String>>,
    listing_override: Option<CommandOutput>,
    fetch: CommandOutput,
    pull: CommandOutput,
    statuses: RefCell<VecDeque<CommandOutput>>,
    failing_checkouts: HashMap<String, String>,
    failing_deletes: HashMap<String, String>,
    vanishing: HashSet<String>,
    remotes: CommandOutput,
    aliases: CommandOutput,
    calls: RefCell<Vec<String>>,
}

impl ScriptedBackend {
    /// A repository with only `main`, checked out, and everything succeeding.
    pub(crate) fn new() -> Self {
        Self {
            is_repo: true,
            branches: RefCell::new(vec![("main".to_string(), "[origin/main]".to_string())]),
            current: RefCell::new(Some("main".to_string())),
            listing_override: None,
            fetch: CommandOutput::ok(""),
            pull: CommandOutput::ok("Already up to date."),
            statuses: RefCell::new(VecDeque::new()),
            failing_checkouts: HashMap::new(),
            failing_deletes: HashMap::new(),
            vanishing: HashSet::new(),
            remotes: CommandOutput::ok("origin"),
            aliases: CommandOutput::failed(1, ""),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn not_a_repository(mut self) -> Self {
        self.is_repo = false;
        self
    }

    /// Add a local branch; `annotation` is the tracking text, e.g. `[origin/x: gone]`.
    pub(crate) fn branch(self, name: &str, annotation: &str) -> Self {
        self.branches
            .borrow_mut()
            .push((name.to_string(), annotation.to_string()));
        self
    }

    pub(crate) fn on(self, name: &str) -> Self {
        *self.current.borrow_mut() = Some(name.to_string());
        self
    }

    pub(crate) fn detached(self) -> Self {
        *self.current.borrow_mut() = None;
        self
    }

    /// Return this text for every listing instead of rendering the model.
    pub(crate) fn listing(mut self, output: CommandOutput) -> Self {
        self.listing_override = Some(output);
        self
    }

    pub(crate) fn fetch_fails(mut self, stderr: &str) -> Self {
        self.fetch = CommandOutput::failed(1, stderr);
        self
    }

    pub(crate) fn pull_fails(mut self, stderr: &str) -> Self {
        self.pull = CommandOutput::failed(1, stderr);
        self
    }

    /// Queue a status result. The last queued status repeats.
    pub(crate) fn status(self, porcelain: &str) -> Self {
        self.statuses
            .borrow_mut()
            .push_back(CommandOutput::ok(porcelain));
        self
    }

    pub(crate) fn checkout_fails(mut self, name: &str, stderr: &str) -> Self {
        self.failing_checkouts
            .insert(name.to_string(), stderr.to_string());
        self
    }

    pub(crate) fn delete_fails(mut self, name: &str, stderr: &str) -> Self {
        self.failing_deletes
            .insert(name.to_string(), stderr.to_string());
        self
    }

    /// The branch disappears during its delete call, which still reports failure.
    pub(crate) fn vanishes_on_delete(mut self, name: &str) -> Self {
        self.vanishing.insert(name.to_string());
        self
    }

    /// Output of the remote listing (default: just `origin`).
    pub(crate) fn remotes(mut self, output: CommandOutput) -> Self {
        self.remotes = output;
        self
    }

    pub(crate) fn aliases(mut self, output: CommandOutput) -> Self {
        self.aliases = output;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }

    pub(crate) fn current(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    pub(crate) fn branch_names(&self) -> Vec<String> {
        self.branches
            .borrow()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn render_listing(&self) -> String {
        let current = self.current.borrow();
        let mut lines = Vec::new();
        if current.is_none() {
            lines.push("* (HEAD detached at 1a2b3c4) 1a2b3c4 detached work".to_string());
        }
        for (name, annotation) in self.branches.borrow().iter() {
            let marker = if current.as_deref() == Some(name.as_str()) {
                '*'
            } else {
                ' '
            };
            let annotation = if annotation.is_empty() {
                String::new()
            } else {
                format!("{} ", annotation)
            };
            lines.push(format!("{} {} 1a2b3c4 {}commit on {}", marker, name, annotation, name));
        }
        lines.join("\n")
    }
}

impl VcsBackend for ScriptedBackend {
    fn is_repository(&self) -> Result<bool> {
        self.record("is_repository".to_string());
        Ok(self.is_repo)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        self.record("current_branch".to_string());
        Ok(self.current.borrow().clone())
    }

    fn list_branches_verbose(&self) -> Result<CommandOutput> {
        self.record("list_branches".to_string());
        Ok(match &self.listing_override {
            Some(output) => output.clone(),
            None => CommandOutput::ok(self.render_listing()),
        })
    }

    fn fetch_prune(&self) -> Result<CommandOutput> {
        self.record("fetch_prune".to_string());
        Ok(self.fetch.clone())
    }

    fn checkout(&self, branch: &str) -> Result<CommandOutput> {
        self.record(format!("checkout {}", branch));
        if let Some(stderr) = self.failing_checkouts.get(branch) {
            return Ok(CommandOutput::failed(1, stderr.clone()));
        }
        if !self.branches.borrow().iter().any(|(name, _)| name == branch) {
            return Ok(CommandOutput::failed(
                1,
                format!(
                    "error: pathspec '{}' did not match any file(s) known to git",
                    branch
                ),
            ));
        }
        *self.current.borrow_mut() = Some(branch.to_string());
        Ok(CommandOutput {
            exit_code: 0,
            stdout: String::new(),
            stderr: format!("Switched to branch '{}'", branch),
        })
    }

    fn pull(&self) -> Result<CommandOutput> {
        self.record("pull".to_string());
        Ok(self.pull.clone())
    }

    fn status(&self) -> Result<CommandOutput> {
        self.record("status".to_string());
        let mut statuses = self.statuses.borrow_mut();
        let output = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        Ok(output.unwrap_or_else(|| CommandOutput::ok("")))
    }

    fn delete_branch_forced(&self, branch: &str) -> Result<CommandOutput> {
        self.record(format!("delete {}", branch));
        if self.vanishing.contains(branch) {
            self.branches.borrow_mut().retain(|(name, _)| name != branch);
            return Ok(CommandOutput::failed(
                1,
                format!("error: branch '{}' not found", branch),
            ));
        }
        if let Some(stderr) = self.failing_deletes.get(branch) {
            return Ok(CommandOutput::failed(1, stderr.clone()));
        }
        let mut branches = self.branches.borrow_mut();
        let before = branches.len();
        branches.retain(|(name, _)| name != branch);
        if branches.len() == before {
            return Ok(CommandOutput::failed(
                1,
                format!("error: branch '{}' not found", branch),
            ));
        }
        Ok(CommandOutput::ok(format!(
            "Deleted branch {} (was 1a2b3c4).",
            branch
        )))
    }

    fn branch_exists(&self, branch: &str) -> Result<bool> {
        self.record(format!("branch_exists {}", branch));
        Ok(self.branches.borrow().iter().any(|(name, _)| name == branch))
    }

    fn list_remotes(&self) -> Result<CommandOutput> {
        self.record("list_remotes".to_string());
        Ok(self.remotes.clone())
    }

    fn list_aliases(&self) -> Result<CommandOutput> {
        self.record("list_aliases".to_string());
        Ok(self.aliases.clone())
    }
}
