//! Cleanup orchestrator: prune stale local branches.
//!
//! Sequence:
//! 1. Read the remote names, snapshot the current branch and the full branch listing
//! 2. Switch to trunk if needed (a plain checkout, no dirty check or pull)
//! 3. Fetch with prune, best-effort
//! 4. Re-list, classify, and run the deletion engine
//! 5. Re-list and report `before - after` as the deleted set
//! 6. Return to the original branch unless it was deleted
//!
//! # Safety
//!
//! - If the switch to trunk fails, nothing is deleted
//! - Trunk is never planned for deletion
//! - A failed fetch degrades gone-remote detection but does not stop the run
//! - Deletions are individually atomic; the batch is not

mod types;


pub use types::{CleanupNote, CleanupReport};

use crate::branches::{BranchSet, Classifier, DeletionReason, DeletionResult, delete_branches};
use crate::error::{Result, TidyError};
use crate::vcs::VcsBackend;
use log::{debug, info, warn};

/// Run one cleanup pass against `trunk`.
///
/// # Returns
///
/// * `Ok(CleanupReport)` - The run completed; per-branch failures are in the report
/// * `Err(TidyError::NotARepository)` - Not inside a repository
/// * `Err(TidyError::Git)` - The remote names could not be read; nothing was deleted
/// * `Err(TidyError::SwitchFailed)` - Could not switch to trunk; nothing was deleted
pub fn cleanup<B: VcsBackend + ?Sized>(
    backend: &B,
    trunk: &str,
    force: bool,
) -> Result<CleanupReport> {
    if !backend.is_repository()? {
        return Err(TidyError::NotARepository);
    }

    let mut report = CleanupReport::default();

    let remotes = remote_names(backend)?;
    let original = backend.current_branch()?;
    let before = BranchSet::parse(&backend.list_branches_verbose()?.stdout, &remotes);

    // Detached HEAD has no branch to return to, so it is left where it is.
    let switched_from = match original {
        Some(name) if name != trunk => {
            let output = backend.checkout(trunk)?;
            if !output.success() {
                return Err(TidyError::SwitchFailed {
                    trunk: trunk.to_string(),
                    detail: output.diagnostic(),
                });
            }
            info!("switched from '{}' to '{}' for cleanup", name, trunk);
            Some(name)
        }
        _ => None,
    };

    let fetch = backend.fetch_prune()?;
    if !fetch.success() {
        warn!("fetch failed, continuing with local data: {}", fetch.diagnostic());
        report.notes.push(CleanupNote::FetchFailed {
            detail: fetch.diagnostic(),
        });
    }

    let listing = backend.list_branches_verbose()?;
    let classification = Classifier::new(force)
        .protect(trunk)
        .remotes(remotes.iter().cloned())
        .classify(&listing.stdout);

    if classification.is_no_data() {
        let detail = if listing.success() {
            "branch listing was empty".to_string()
        } else {
            listing.diagnostic()
        };
        warn!("no branch data: {}", detail);
        report.notes.push(CleanupNote::NoBranchData { detail });
    } else {
        let plan = &classification.plan;
        debug!(
            "untracked: {:?}, remote gone: {:?}",
            plan.with_reason(DeletionReason::NoRemoteTracking),
            plan.with_reason(DeletionReason::RemoteGone)
        );
        report.per_branch_results = delete_branches(backend, plan)?;
    }

    report.deleted_branches = reconcile(
        backend,
        &remotes,
        &before,
        &report.per_branch_results,
        &mut report.notes,
    )?;

    if let Some(name) = switched_from {
        if report.deleted_branches.contains(&name) {
            info!("'{}' was deleted, staying on '{}'", name, trunk);
            report.notes.push(CleanupNote::OriginalBranchDeleted {
                branch: name,
                trunk: trunk.to_string(),
            });
        } else {
            let output = backend.checkout(&name)?;
            if output.success() {
                report.switched_away_and_back = true;
            } else {
                warn!("could not switch back to '{}': {}", name, output.diagnostic());
                report.notes.push(CleanupNote::SwitchBackFailed {
                    branch: name,
                    detail: output.diagnostic(),
                });
            }
        }
    }

    Ok(report)
}

/// Compute the deleted set as `before - after` from a fresh listing.
///
/// An unusable after-listing would make every branch look deleted, so in that
/// case the engine's own successes are reported instead.
fn reconcile<B: VcsBackend + ?Sized>(
    backend: &B,
    remotes: &[String],
    before: &BranchSet,
    results: &[DeletionResult],
    notes: &mut Vec<CleanupNote>,
) -> Result<Vec<String>> {
    let listing = backend.list_branches_verbose()?;
    let after = BranchSet::parse(&listing.stdout, remotes);
    debug!("branches after cleanup: {}", after.names().join(", "));

    if after.is_empty() && !before.is_empty() {
        let detail = if listing.success() {
            "branch listing was empty".to_string()
        } else {
            listing.diagnostic()
        };
        warn!("after-snapshot unavailable: {}", detail);
        notes.push(CleanupNote::AfterSnapshotUnavailable { detail });
        return Ok(results
            .iter()
            .filter(|r| r.deleted)
            .map(|r| r.name.clone())
            .collect());
    }

    Ok(before.missing_from(&after))
}

/// Configured remote names.
///
/// Without them tracking branches cannot be told from local ones, so an
/// unreadable list stops the run before anything is deleted.
fn remote_names<B: VcsBackend + ?Sized>(backend: &B) -> Result<Vec<String>> {
    let output = backend.list_remotes()?;
    if !output.success() {
        return Err(TidyError::Git {
            command: "remote".to_string(),
            detail: output.diagnostic(),
        });
    }
    let remotes: Vec<String> = output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    debug!("remotes: {}", remotes.join(", "));
    Ok(remotes)
}
