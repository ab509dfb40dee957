//! Data types for the cleanup report.

use crate::branches::DeletionResult;
use serde::Serialize;

/// Something the user should know about a cleanup run that is not a
/// per-branch outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CleanupNote {
    /// Fetch-with-prune failed; gone-remote detection may be stale.
    FetchFailed { detail: String },
    /// The branch listing was empty or unreadable; nothing was classified.
    NoBranchData { detail: String },
    /// The post-deletion listing was unusable, so the report falls back to
    /// the engine's own results.
    AfterSnapshotUnavailable { detail: String },
    /// The branch checked out before cleanup was itself deleted; HEAD stays on trunk.
    OriginalBranchDeleted { branch: String, trunk: String },
    /// Switching back to the original branch failed; HEAD stays on trunk.
    SwitchBackFailed { branch: String, detail: String },
}

impl std::fmt::Display for CleanupNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanupNote::FetchFailed { detail } => {
                write!(f, "fetch failed, remote state may be stale: {}", detail)
            }
            CleanupNote::NoBranchData { detail } => {
                write!(f, "could not get branch information: {}", detail)
            }
            CleanupNote::AfterSnapshotUnavailable { detail } => write!(
                f,
                "could not re-list branches, reporting deletions as attempted: {}",
                detail
            ),
            CleanupNote::OriginalBranchDeleted { branch, trunk } => write!(
                f,
                "'{}' was deleted, staying on '{}'",
                branch, trunk
            ),
            CleanupNote::SwitchBackFailed { branch, detail } => {
                write!(f, "could not switch back to '{}': {}", branch, detail)
            }
        }
    }
}

/// Outcome of one cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Branches present before the run and absent after it, in listing order.
    pub deleted_branches: Vec<String>,
    /// One entry per attempted deletion.
    pub per_branch_results: Vec<DeletionResult>,
    /// HEAD was moved to trunk for the run and successfully returned.
    pub switched_away_and_back: bool,
    pub notes: Vec<CleanupNote>,
}

impl CleanupReport {
    /// Attempted deletions that the backend refused.
    pub fn failures(&self) -> impl Iterator<Item = &DeletionResult> {
        self.per_branch_results.iter().filter(|r| !r.deleted)
    }
}
