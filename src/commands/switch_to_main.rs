//! Implementation of the `branchtidy switch_to_main` command.
//!
//! Renders the sync outcome whatever its stage, then turns a non-success
//! stage into an error so the process exits with status 1.

use super::CommandContext;
use crate::error::{Result, TidyError};
use crate::exit_codes;
use crate::report::ReportSink;
use crate::sync::switch_to_trunk;

pub(super) fn cmd_switch_to_main(ctx: &CommandContext, sink: &mut dyn ReportSink) -> Result<()> {
    let outcome = switch_to_trunk(&ctx.git, &ctx.config.trunk_branch)?;
    sink.render_sync(&outcome)?;

    if outcome.exit_code() == exit_codes::SUCCESS {
        Ok(())
    } else {
        Err(TidyError::Sync {
            stage: outcome.stage,
            detail: outcome.detail,
        })
    }
}
