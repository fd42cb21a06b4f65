//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickSummaryRow, TraceRow};

/// Trait implemented by the CSV and JSON writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the survival trace, one row per agent ever spawned.
    fn write_trace(&mut self, rows: &[TraceRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Fan out to two writers.  Both are always called; the first error wins.
impl<A: OutputWriter, B: OutputWriter> OutputWriter for (A, B) {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let a = self.0.write_tick_summary(row);
        let b = self.1.write_tick_summary(row);
        a.and(b)
    }

    fn write_trace(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        let a = self.0.write_trace(rows);
        let b = self.1.write_trace(rows);
        a.and(b)
    }

    fn finish(&mut self) -> OutputResult<()> {
        let a = self.0.finish();
        let b = self.1.finish();
        a.and(b)
    }
}
