//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use bl_core::Tick;
use bl_sim::{SimObserver, TickSummary, TraceRecord};

use crate::row::{TickSummaryRow, TraceRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries as they happen and the
/// survival trace when the run ends, to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write `trace` and close the writer.  Used by drivers that stop the run
    /// themselves instead of calling `Sim::run`.
    pub fn flush_trace(&mut self, trace: &[TraceRecord]) {
        let rows: Vec<TraceRow> = trace.iter().map(TraceRow::from).collect();
        let result = self.writer.write_trace(&rows).and_then(|()| self.writer.finish());
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, trace: &[TraceRecord]) {
        self.flush_trace(trace);
    }
}
