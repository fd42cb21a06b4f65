//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trace.csv`
//! - `tick_summaries.csv`
//!
//! Missing values (`finished_at` of an agent still in the room, `spawned` on
//! a tick without arrival) are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TraceRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    trace:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trace = Writer::from_path(dir.join("trace.csv"))?;
        trace.write_record(["agent_id", "created_at", "finished_at", "observed_at"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "time", "active", "spawned", "stuck", "retired", "finished_count",
        ])?;

        Ok(Self { trace, summaries, finished: false })
    }
}

fn optional<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time.to_string(),
            row.active.to_string(),
            optional(row.spawned),
            row.stuck.to_string(),
            row.retired.to_string(),
            row.finished_count.to_string(),
        ])?;
        Ok(())
    }

    fn write_trace(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        for row in rows {
            self.trace.write_record(&[
                row.agent_id.to_string(),
                row.created_at.to_string(),
                optional(row.finished_at),
                row.observed_at.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
