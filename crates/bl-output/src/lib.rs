//! `bl-output` — writers for the buffet_line data products.
//!
//! | Writer             | Files created                        |
//! |--------------------|--------------------------------------|
//! | [`CsvWriter`]      | `trace.csv`, `tick_summaries.csv`    |
//! | [`JsonTraceWriter`]| one trace document per run           |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `bl_sim::SimObserver`.  A pair `(A, B)` of writers is
//! itself a writer, so one run can feed both.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bl_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::{JsonTraceWriter, TraceDocument, read_config};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, TraceRow};
pub use writer::OutputWriter;
