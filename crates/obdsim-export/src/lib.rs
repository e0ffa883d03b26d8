//! CSV and JSON export of OBD-II simulator session logs.
//!
//! - [`csv`]: tabular export, one row per tick
//! - [`recording`]: JSON recording with metadata, loadable back into memory
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use obdsim_core::prelude::*;
//! use obdsim_export::{ExportFormat, ExportOptions, export};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sim = Simulator::seeded(1);
//! sim.run(10);
//! export(sim.log(), Path::new("session.csv"), ExportFormat::Csv, &ExportOptions::default())?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]

pub mod csv;
pub mod error;
pub mod format;
pub mod recording;

use std::path::Path;

use obdsim_core::session::SessionLog;

pub use error::{ExportError, ExportResult};
pub use format::ExportFormat;
pub use recording::{ExportOptions, RecordingMetadata, SessionRecording};

/// Write `log` to `path` in `format`. The log is only read.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be written.
pub fn export(
    log: &SessionLog,
    path: &Path,
    format: ExportFormat,
    options: &ExportOptions,
) -> ExportResult<()> {
    match format {
        ExportFormat::Csv => csv::save_csv(log, path),
        ExportFormat::Json => SessionRecording::from_log(log, options).save(path),
    }
}
