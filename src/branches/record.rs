//! Parsing of verbose branch listings into [`BranchSet`] snapshots.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Tracking annotation following the branch name, optionally after the
/// abbreviated commit id and a linked-worktree path:
/// `feature 1a2b3c4 (/path/wt) [origin/feature: ahead 1] subject`.
static TRACKING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9a-f]{4,64}\s+)?(?:\([^)]*\)\s+)?\[([^\]:]+)(?::\s*([^\]]*))?\]")
        .expect("tracking annotation pattern is valid")
});

/// One local branch as seen in a single listing snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub name: String,
    pub is_current: bool,
    /// The branch follows a `<remote>/<branch>` ref of a known remote.
    pub has_remote_tracking: bool,
    /// The followed remote ref no longer exists.
    pub remote_is_gone: bool,
    /// Upstream ref text from the annotation, e.g. `origin/feature`.
    pub upstream: Option<String>,
}

impl BranchRecord {
    /// Parse one listing line. Returns `None` for blank lines, lines without
    /// a name token, and detached-HEAD pseudo entries.
    ///
    /// An upstream counts as remote tracking only when it starts with one of
    /// `remotes` followed by `/`; `[feature/base]` is a local upstream unless
    /// `feature` is a remote.
    pub fn parse_line<S: AsRef<str>>(line: &str, remotes: &[S]) -> Option<Self> {
        let trimmed = line.trim_start();
        let (is_current, rest) = match trimmed.chars().next() {
            Some('*') => (true, &trimmed[1..]),
            // Checked out in a linked worktree.
            Some('+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let rest = rest.trim_start();
        let name = rest.split_whitespace().next()?;
        if name.starts_with('(') {
            return None;
        }

        let after_name = rest[name.len()..].trim_start();
        let (upstream, status) = match TRACKING.captures(after_name) {
            Some(caps) => (
                caps.get(1).map(|m| m.as_str().trim().to_string()),
                caps.get(2).map(|m| m.as_str().trim().to_string()),
            ),
            None => (None, None),
        };

        let has_remote_tracking = upstream
            .as_deref()
            .is_some_and(|u| tracks_remote(u, remotes));
        let remote_is_gone = has_remote_tracking && status.as_deref() == Some("gone");

        Some(Self {
            name: name.to_string(),
            is_current,
            has_remote_tracking,
            remote_is_gone,
            upstream,
        })
    }
}

fn tracks_remote<S: AsRef<str>>(upstream: &str, remotes: &[S]) -> bool {
    remotes.iter().any(|remote| {
        upstream
            .strip_prefix(remote.as_ref())
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|branch| !branch.is_empty())
    })
}

/// Ordered collection of branch records with unique names, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSet {
    records: Vec<BranchRecord>,
}

impl BranchSet {
    /// Parse raw `git branch -vv` output against the repository's `remotes`.
    /// Unparseable lines are skipped; a repeated name keeps its first record.
    pub fn parse<S: AsRef<str>>(raw: &str, remotes: &[S]) -> Self {
        let mut seen = HashSet::new();
        let records = raw
            .lines()
            .filter_map(|line| BranchRecord::parse_line(line, remotes))
            .filter(|record| seen.insert(record.name.clone()))
            .collect();
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BranchRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names present here but absent from `later`, in this set's order.
    pub fn missing_from(&self, later: &BranchSet) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !later.contains(&r.name))
            .map(|r| r.name.clone())
            .collect()
    }
}
