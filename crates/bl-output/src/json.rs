//! JSON trace document backend.
//!
//! One file per run:
//!
//! ```json
//! { "method": "single-file", "rate": 0.5,
//!   "data": [[0.3, 41.2, 300.0], [1.7, null, 300.0]] }
//! ```
//!
//! Each `data` entry is `[created_at, finished_at | null, observed_at]` for
//! one agent, in spawn order.  Tick summaries are not part of the document.
//!
//! Run configurations are read from JSON as well; see [`read_config`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use bl_core::BuffetConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TraceRow};

/// The serialized form of one run's survival trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDocument {
    pub method: String,
    pub rate:   f64,
    pub data:   Vec<(f64, Option<f64>, f64)>,
}

impl TraceDocument {
    pub fn new(method: impl Into<String>, rate: f64, rows: &[TraceRow]) -> Self {
        Self {
            method: method.into(),
            rate,
            data: rows.iter().map(|r| (r.created_at, r.finished_at, r.observed_at)).collect(),
        }
    }

    pub fn read(path: &Path) -> OutputResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write(&self, path: &Path) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Load a [`BuffetConfig`] from a JSON object.
///
/// Missing fields take their defaults.  The result is not validated;
/// `SimBuilder::build` does that.
pub fn read_config(path: &Path) -> OutputResult<BuffetConfig> {
    let reader = BufReader::new(File::open(path)?);
    let config = serde_json::from_reader(reader)?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Buffers the trace and writes the document on [`finish`][OutputWriter::finish].
pub struct JsonTraceWriter {
    path:     PathBuf,
    method:   String,
    rate:     f64,
    rows:     Vec<TraceRow>,
    finished: bool,
}

impl JsonTraceWriter {
    /// `method` is recorded verbatim; pass the discipline's canonical name.
    pub fn new(path: impl Into<PathBuf>, method: impl Into<String>, rate: f64) -> Self {
        Self {
            path:     path.into(),
            method:   method.into(),
            rate,
            rows:     Vec::new(),
            finished: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputWriter for JsonTraceWriter {
    fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    /// Replaces any previously buffered trace: the latest observation wins.
    fn write_trace(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        self.rows.clear();
        self.rows.extend_from_slice(rows);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        TraceDocument::new(self.method.clone(), self.rate, &self.rows).write(&self.path)?;
        debug!(path = %self.path.display(), agents = self.rows.len(), "trace document written");
        Ok(())
    }
}
