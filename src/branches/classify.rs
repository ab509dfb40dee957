//! Deletion policy for local branches.
//!
//! A branch is planned for deletion when it has no remote-tracking ref at
//! all, or when its remote ref is gone and `force` is set. The checked-out
//! branch and any protected name are never planned.
//!
//! Remote tracking is judged against the repository's remote names, which
//! default to `origin` until [`Classifier::remotes`] supplies the real list.

use super::record::{BranchRecord, BranchSet};
use log::debug;
use serde::Serialize;

/// Why a branch was planned for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionReason {
    /// The branch never tracked a remote branch.
    NoRemoteTracking,
    /// The tracked remote branch was deleted (only under `force`).
    RemoteGone,
}

impl std::fmt::Display for DeletionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeletionReason::NoRemoteTracking => write!(f, "no remote tracking"),
            DeletionReason::RemoteGone => write!(f, "remote gone"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDeletion {
    pub name: String,
    pub reason: DeletionReason,
}

/// Branches slated for removal, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    entries: Vec<PlannedDeletion>,
}

impl DeletionPlan {
    pub fn iter(&self) -> impl Iterator<Item = &PlannedDeletion> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Names planned for the given reason.
    pub fn with_reason(&self, reason: DeletionReason) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.reason == reason)
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed snapshot together with the deletion plan derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub branches: BranchSet,
    pub plan: DeletionPlan,
}

impl Classification {
    /// The listing was empty or had no parseable branch lines.
    pub fn is_no_data(&self) -> bool {
        self.branches.is_empty()
    }
}

/// Applies the deletion policy to branch listings.
#[derive(Debug, Clone)]
pub struct Classifier {
    force: bool,
    protected: Vec<String>,
    remotes: Vec<String>,
}

impl Classifier {
    pub fn new(force: bool) -> Self {
        Self {
            force,
            protected: Vec::new(),
            remotes: vec!["origin".to_string()],
        }
    }

    /// Remote names whose `<remote>/<branch>` upstreams count as remote tracking.
    pub fn remotes<I, S>(mut self, remotes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remotes = remotes.into_iter().map(Into::into).collect();
        self
    }

    /// Never plan `name` for deletion, even when it is not checked out.
    pub fn protect(mut self, name: impl Into<String>) -> Self {
        self.protected.push(name.into());
        self
    }

    pub fn classify(&self, raw_listing: &str) -> Classification {
        let branches = BranchSet::parse(raw_listing, &self.remotes);
        let entries = branches
            .iter()
            .filter_map(|record| {
                self.reason_for(record).map(|reason| PlannedDeletion {
                    name: record.name.clone(),
                    reason,
                })
            })
            .collect();

        let plan = DeletionPlan { entries };
        debug!(
            "classified {} branch(es), {} planned for deletion (force={})",
            branches.len(),
            plan.len(),
            self.force
        );
        Classification { branches, plan }
    }

    fn reason_for(&self, record: &BranchRecord) -> Option<DeletionReason> {
        debug!(
            "'{}': upstream {:?}, gone {}",
            record.name, record.upstream, record.remote_is_gone
        );
        if record.is_current || self.protected.iter().any(|p| *p == record.name) {
            return None;
        }
        if !record.has_remote_tracking {
            Some(DeletionReason::NoRemoteTracking)
        } else if record.remote_is_gone && self.force {
            Some(DeletionReason::RemoteGone)
        } else {
            None
        }
    }
}
