//! Human-readable rendering.

use super::{ReportSink, output_error};
use crate::aliases::AliasEntry;
use crate::cleanup::CleanupReport;
use crate::error::Result;
use crate::sync::SyncOutcome;
use std::io::Write;

/// Writes plain-text rows to any writer (stdout in the binary).
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_cleanup(&mut self, report: &CleanupReport) -> std::io::Result<()> {
        let out = &mut self.out;

        for failure in report.failures() {
            writeln!(
                out,
                "Warning: failed to delete branch '{}': {}",
                failure.name,
                failure.error_detail.as_deref().unwrap_or("unknown error")
            )?;
        }

        if report.deleted_branches.is_empty() {
            writeln!(
                out,
                "No branches were deleted. All local branches are up to date."
            )?;
        } else {
            writeln!(out, "Deleted branches ({}):", report.deleted_branches.len())?;
            for name in &report.deleted_branches {
                writeln!(out, "  - {}", name)?;
            }
            writeln!(out)?;
            writeln!(
                out,
                "Successfully deleted {} branch(es)",
                report.deleted_branches.len()
            )?;
        }

        for note in &report.notes {
            writeln!(out, "Note: {}", note)?;
        }
        Ok(())
    }

    fn write_sync(&mut self, outcome: &SyncOutcome) -> std::io::Result<()> {
        let out = &mut self.out;
        if outcome.ok {
            writeln!(out, "Sync complete: {}", outcome.detail)?;
            return Ok(());
        }

        writeln!(out, "Sync failed: {}", outcome.stage)?;
        for line in outcome.detail.lines() {
            writeln!(out, "  {}", line)?;
        }
        Ok(())
    }

    fn write_aliases(&mut self, aliases: &[AliasEntry]) -> std::io::Result<()> {
        let out = &mut self.out;
        let width = aliases
            .iter()
            .map(|a| a.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Alias".len());

        writeln!(out, "{:<width$}  Command/Description", "Alias")?;
        writeln!(out, "{:<width$}  {}", "-".repeat(width), "-".repeat(19))?;
        for alias in aliases {
            writeln!(out, "{:<width$}  {}", alias.name, alias.description)?;
        }
        writeln!(out)?;
        writeln!(out, "Found {} git aliases", aliases.len())?;
        Ok(())
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn render_cleanup(&mut self, report: &CleanupReport) -> Result<()> {
        self.write_cleanup(report).map_err(output_error)
    }

    fn render_sync(&mut self, outcome: &SyncOutcome) -> Result<()> {
        self.write_sync(outcome).map_err(output_error)
    }

    fn render_aliases(&mut self, aliases: &[AliasEntry]) -> Result<()> {
        self.write_aliases(aliases).map_err(output_error)
    }
}
