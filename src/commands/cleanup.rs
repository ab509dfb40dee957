//! Implementation of the `branchtidy cleanup` command.
//!
//! Runs one cleanup pass against the configured trunk and renders the
//! report. Per-branch deletion failures are part of the report and do not
//! change the exit code; only an aborted run (not a repository, or no way to
//! switch to the trunk) fails the command.

use super::CommandContext;
use crate::cleanup::cleanup;
use crate::cli::CleanupArgs;
use crate::error::Result;
use crate::report::ReportSink;
use log::info;

pub(super) fn cmd_cleanup(
    ctx: &CommandContext,
    args: CleanupArgs,
    sink: &mut dyn ReportSink,
) -> Result<()> {
    info!(
        "cleaning up branches against '{}' (force: {})",
        ctx.config.trunk_branch, args.force
    );
    let report = cleanup(&ctx.git, &ctx.config.trunk_branch, args.force)?;
    sink.render_cleanup(&report)
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use crate::cli::Cli;
    use crate::test_support::{create_test_repo, git};
    use clap::Parser;
    use serde_json::Value;

    fn cleanup_json(repo: &std::path::Path, force: bool) -> Value {
        let mut argv = vec!["branchtidy", "--json", "cleanup"];
        if force {
            argv.push("--force");
        }
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(cli, repo, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn deletes_untracked_branch_and_returns() {
        let repo = create_test_repo();
        git(repo.path(), &["branch", "scratch"]);
        git(repo.path(), &["checkout", "-b", "work"]);

        let report = cleanup_json(repo.path(), false);

        // `work` is checked out at the start, so after the switch to trunk it
        // is an ordinary branch without remote tracking.
        assert_eq!(report["deleted_branches"], serde_json::json!(["scratch", "work"]));
        assert_eq!(report["switched_away_and_back"], Value::Bool(false));
        assert_eq!(report["notes"][0]["kind"], "fetch_failed");
        assert_eq!(report["notes"][1]["kind"], "original_branch_deleted");
    }

    #[test]
    fn text_output_lists_deleted_branches() {
        let repo = create_test_repo();
        git(repo.path(), &["branch", "old-idea"]);

        let cli = Cli::try_parse_from(["branchtidy", "cleanup", "-f"]).unwrap();
        let mut out = Vec::new();
        run(cli, repo.path(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Deleted branches (1):\n  - old-idea\n"));
        assert!(text.contains("Successfully deleted 1 branch(es)"));
    }

    #[test]
    fn nothing_to_delete() {
        let repo = create_test_repo();
        let report = cleanup_json(repo.path(), true);
        assert_eq!(report["deleted_branches"], serde_json::json!([]));
    }
}
