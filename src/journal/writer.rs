//! Append-only timing log written during a sweep

use crate::sweep::RunResult;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Writes one record per run, plus the captured stderr when there is any.
///
/// Every append is flushed so an interrupted sweep keeps its finished runs.
pub struct SweepLog<W: Write> {
    writer: W,
    records: usize,
}

impl SweepLog<File> {
    /// Create the log file, truncating any previous sweep
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to create log {}", path.display()))?;
        tracing::info!(path = %path.display(), "writing sweep log");
        Ok(Self::new(file))
    }
}

impl<W: Write> SweepLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    pub fn append(&mut self, result: &RunResult) -> Result<()> {
        let record = result.record();
        writeln!(self.writer, "{}", record)?;

        if let Some(errors) = &result.errors {
            writeln!(self.writer, "{}", record.error_header())?;
            writeln!(self.writer, "{}", errors)?;
        }

        self.writer.flush()?;
        self.records += 1;
        Ok(())
    }

    /// Number of records appended so far
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
