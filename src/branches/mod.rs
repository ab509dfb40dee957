//! Local branch classification and deletion.
//!
//! Data flows one way: raw `git branch -vv` text is parsed into a
//! [`BranchSet`], the [`Classifier`] derives a [`DeletionPlan`], and
//! [`delete_branches`] turns the plan into per-branch [`DeletionResult`]s.
//!
//! # Safety
//!
//! - The checked-out branch is never planned for deletion
//! - Branches following a live ref of a known remote are never planned, with or without force
//! - Only branches in the plan are ever deleted
//! - Deletion is forced (`-D`): unmerged commits on a deleted branch are discarded

mod classify;
mod deletion;
mod record;


pub use classify::{Classifier, DeletionReason};
pub use deletion::{DeletionResult, delete_branches};
pub use record::BranchSet;
