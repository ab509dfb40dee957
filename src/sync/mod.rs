//! Guarded "switch to trunk and pull" sequence.
//!
//! The controller walks a linear state machine:
//!
//! ```text
//! Init -> Fetched -> CleanCheck -> CheckedOut -> Pulled -> Done
//!                                      \-> Conflict
//! ```
//!
//! Every state can stop the run with a terminal [`SyncOutcome`]. Nothing is
//! retried: the first failing stage ends the run and its backend diagnostic
//! is returned verbatim.


use crate::error::Result;
use crate::exit_codes;
use crate::vcs::VcsBackend;
use log::{debug, info, warn};
use serde::Serialize;

/// Porcelain v1 `XY` codes for unmerged paths.
const CONFLICT_CODES: [&str; 7] = ["DD", "AU", "UD", "UA", "DU", "AA", "UU"];

/// Terminal stage of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    NotARepo,
    FetchFailed,
    DirtyWorkingTree,
    CheckoutFailed,
    PullFailed,
    MergeConflict,
    Success,
}

impl std::fmt::Display for SyncStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SyncStage::NotARepo => "not a repository",
            SyncStage::FetchFailed => "fetch failed",
            SyncStage::DirtyWorkingTree => "dirty working tree",
            SyncStage::CheckoutFailed => "checkout failed",
            SyncStage::PullFailed => "pull failed",
            SyncStage::MergeConflict => "merge conflict",
            SyncStage::Success => "success",
        };
        f.write_str(label)
    }
}

/// Result of one sync run. Exactly one terminal stage per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub ok: bool,
    pub stage: SyncStage,
    pub detail: String,
}

impl SyncOutcome {
    fn success(detail: String) -> Self {
        Self {
            ok: true,
            stage: SyncStage::Success,
            detail,
        }
    }

    fn failure(stage: SyncStage, detail: String) -> Self {
        Self {
            ok: false,
            stage,
            detail,
        }
    }

    /// Process exit code: 0 on success, 1 for every other stage.
    pub fn exit_code(&self) -> i32 {
        if self.ok {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        }
    }
}

/// Non-terminal position in the sync sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Init,
    Fetched,
    CleanCheck,
    CheckedOut,
    Pulled,
    /// Pull failed with unmerged paths; carries the conflicting status lines.
    Conflict(String),
    Done,
}

/// What the controller does after handling one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(SyncState),
    Finish(SyncOutcome),
}

/// Drives a backend from any branch to an up-to-date trunk.
pub struct SyncController<'a, B: VcsBackend + ?Sized> {
    backend: &'a B,
    trunk: String,
}

impl<'a, B: VcsBackend + ?Sized> SyncController<'a, B> {
    pub fn new(backend: &'a B, trunk: impl Into<String>) -> Self {
        Self {
            backend,
            trunk: trunk.into(),
        }
    }

    /// Run from `Init` until a terminal outcome.
    ///
    /// `Err` means the backend could not be invoked; every repository-level
    /// failure is an `Ok` outcome with a non-success stage.
    pub fn run(&self) -> Result<SyncOutcome> {
        let mut state = SyncState::Init;
        loop {
            match self.advance(&state)? {
                Step::Continue(next) => {
                    debug!("sync: {:?} -> {:?}", state, next);
                    state = next;
                }
                Step::Finish(outcome) => {
                    if outcome.ok {
                        info!("sync finished: {}", outcome.detail);
                    } else {
                        warn!("sync stopped at {:?}: {}", state, outcome.stage);
                    }
                    return Ok(outcome);
                }
            }
        }
    }

    /// Handle a single state.
    pub fn advance(&self, state: &SyncState) -> Result<Step> {
        let step = match state {
            SyncState::Init => self.fetch()?,
            SyncState::Fetched => self.check_clean()?,
            SyncState::CleanCheck => self.checkout_trunk()?,
            SyncState::CheckedOut => self.pull()?,
            SyncState::Conflict(paths) => Step::Finish(SyncOutcome::failure(
                SyncStage::MergeConflict,
                paths.clone(),
            )),
            SyncState::Pulled => Step::Continue(SyncState::Done),
            SyncState::Done => Step::Finish(SyncOutcome::success(format!(
                "on '{}' and up to date",
                self.trunk
            ))),
        };
        Ok(step)
    }

    fn fetch(&self) -> Result<Step> {
        if !self.backend.is_repository()? {
            return Ok(Step::Finish(SyncOutcome::failure(
                SyncStage::NotARepo,
                "not inside a git repository".to_string(),
            )));
        }

        let output = self.backend.fetch_prune()?;
        if !output.success() {
            return Ok(Step::Finish(SyncOutcome::failure(
                SyncStage::FetchFailed,
                output.diagnostic(),
            )));
        }
        Ok(Step::Continue(SyncState::Fetched))
    }

    fn check_clean(&self) -> Result<Step> {
        let status = self.backend.status()?;
        if !status.success() {
            // A tree whose status cannot be read is not known to be clean.
            return Ok(Step::Finish(SyncOutcome::failure(
                SyncStage::DirtyWorkingTree,
                format!("could not read working tree status: {}", status.diagnostic()),
            )));
        }
        if !status.stdout.trim().is_empty() {
            return Ok(Step::Finish(SyncOutcome::failure(
                SyncStage::DirtyWorkingTree,
                status.stdout,
            )));
        }
        Ok(Step::Continue(SyncState::CleanCheck))
    }

    fn checkout_trunk(&self) -> Result<Step> {
        let current = self.backend.current_branch()?;
        if current.as_deref() == Some(self.trunk.as_str()) {
            debug!("already on '{}'", self.trunk);
            return Ok(Step::Continue(SyncState::CheckedOut));
        }

        let output = self.backend.checkout(&self.trunk)?;
        if !output.success() {
            return Ok(Step::Finish(SyncOutcome::failure(
                SyncStage::CheckoutFailed,
                output.diagnostic(),
            )));
        }
        Ok(Step::Continue(SyncState::CheckedOut))
    }

    fn pull(&self) -> Result<Step> {
        let output = self.backend.pull()?;
        if output.success() {
            return Ok(Step::Continue(SyncState::Pulled));
        }

        let status = self.backend.status()?;
        let conflicts = conflicted_entries(&status.stdout);
        if conflicts.is_empty() {
            Ok(Step::Finish(SyncOutcome::failure(
                SyncStage::PullFailed,
                output.diagnostic(),
            )))
        } else {
            Ok(Step::Continue(SyncState::Conflict(conflicts.join("\n"))))
        }
    }
}

/// Run the full sync sequence against `trunk`.
pub fn switch_to_trunk<B: VcsBackend + ?Sized>(backend: &B, trunk: &str) -> Result<SyncOutcome> {
    SyncController::new(backend, trunk).run()
}

/// Porcelain status lines whose `XY` code marks an unmerged path.
pub fn conflicted_entries(porcelain: &str) -> Vec<String> {
    porcelain
        .lines()
        .filter(|line| {
            line.get(..2)
                .is_some_and(|code| CONFLICT_CODES.contains(&code))
        })
        .map(|line| line.to_string())
        .collect()
}
