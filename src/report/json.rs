//! Machine-readable rendering (`--json`).

use super::{ReportSink, output_error};
use crate::aliases::AliasEntry;
use crate::cleanup::CleanupReport;
use crate::error::Result;
use crate::sync::SyncOutcome;
use serde::Serialize;
use std::io::Write;

/// Writes one pretty-printed JSON document per rendered value.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value).map_err(output_error)?;
        writeln!(self.out).map_err(output_error)
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn render_cleanup(&mut self, report: &CleanupReport) -> Result<()> {
        self.write(report)
    }

    fn render_sync(&mut self, outcome: &SyncOutcome) -> Result<()> {
        self.write(outcome)
    }

    fn render_aliases(&mut self, aliases: &[AliasEntry]) -> Result<()> {
        self.write(aliases)
    }
}
