//! Implementation of the `branchtidy print_aliases` command.
//!
//! Works outside a repository too: git then reads only the global and
//! system config.

use super::CommandContext;
use crate::aliases::list_aliases;
use crate::error::Result;
use crate::report::ReportSink;

pub(super) fn cmd_print_aliases(ctx: &CommandContext, sink: &mut dyn ReportSink) -> Result<()> {
    let aliases = list_aliases(&ctx.git, &ctx.config)?;
    sink.render_aliases(&aliases)
}
