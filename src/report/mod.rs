//! Presentation sinks.
//!
//! The core modules return structured values ([`CleanupReport`],
//! [`SyncOutcome`], [`AliasEntry`] rows) and never format text. A
//! [`ReportSink`] turns those values into output.

mod console;
mod json;

pub use console::ConsoleSink;
pub use json::JsonSink;

use crate::aliases::AliasEntry;
use crate::cleanup::CleanupReport;
use crate::error::{Result, TidyError};
use crate::sync::SyncOutcome;

/// Renders structured results for a user or a program.
pub trait ReportSink {
    fn render_cleanup(&mut self, report: &CleanupReport) -> Result<()>;

    fn render_sync(&mut self, outcome: &SyncOutcome) -> Result<()>;

    fn render_aliases(&mut self, aliases: &[AliasEntry]) -> Result<()>;
}

fn output_error(e: impl std::fmt::Display) -> TidyError {
    TidyError::Environment(format!("failed to write output: {}", e))
}
