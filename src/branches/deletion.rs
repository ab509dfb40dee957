//! Safe-deletion engine: applies a [`DeletionPlan`] one branch at a time.

use super::classify::DeletionPlan;
use crate::error::Result;
use crate::vcs::VcsBackend;
use log::{info, warn};
use serde::Serialize;

/// Outcome of one planned deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionResult {
    pub name: String,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl DeletionResult {
    fn deleted(name: &str) -> Self {
        Self {
            name: name.to_string(),
            deleted: true,
            error_detail: None,
        }
    }

    fn failed(name: &str, detail: String) -> Self {
        Self {
            name: name.to_string(),
            deleted: false,
            error_detail: Some(detail),
        }
    }
}

/// Force-delete every branch in `plan`, in order.
///
/// A failed deletion is recorded and the pass continues. When the backend
/// refuses a delete, the branch's existence is checked once so that a branch
/// removed out of band is reported as such rather than as an opaque error.
///
/// `Err` is returned only if the backend cannot be invoked at all.
pub fn delete_branches<B: VcsBackend + ?Sized>(
    backend: &B,
    plan: &DeletionPlan,
) -> Result<Vec<DeletionResult>> {
    let mut results = Vec::with_capacity(plan.len());
    if !plan.is_empty() {
        info!("deleting {} branch(es): {}", plan.len(), plan.names().join(", "));
    }

    for planned in plan.iter() {
        let name = planned.name.as_str();
        let output = backend.delete_branch_forced(name)?;

        if output.success() {
            info!("deleted branch '{}' ({})", name, planned.reason);
            results.push(DeletionResult::deleted(name));
            continue;
        }

        let detail = if backend.branch_exists(name)? {
            output.diagnostic()
        } else {
            format!("branch no longer exists: {}", output.diagnostic())
        };
        warn!("failed to delete branch '{}': {}", name, detail);
        results.push(DeletionResult::failed(name, detail));
    }

    Ok(results)
}
