//! CSV writer for session logs.
//!
//! One header row with the export column names, then one row per record.
//! Integer channels are written without decimals, float channels with two.
//! Fields containing a comma, a double quote or a line break are quoted and
//! embedded quotes doubled. Rows end with CRLF.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use obdsim_core::session::{LogRecord, SessionLog};
use tracing::info;

use crate::error::ExportResult;

const LINE_END: &str = "\r\n";

/// Header row, without the line terminator.
pub fn csv_header() -> String {
    join_row(SessionLog::columns().into_iter().map(str::to_string))
}

/// One data row, without the line terminator.
pub fn csv_row(record: &LogRecord) -> String {
    join_row(record.fields())
}

/// Quote `field` if it contains a delimiter, a quote or a line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn join_row(fields: impl IntoIterator<Item = String>) -> String {
    fields
        .into_iter()
        .map(|field| escape_field(&field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write `log` as CSV to `writer`.
///
/// # Errors
///
/// Returns [`crate::ExportError::Io`] if the writer fails.
pub fn write_csv<W: Write>(log: &SessionLog, mut writer: W) -> ExportResult<()> {
    writer.write_all(csv_header().as_bytes())?;
    writer.write_all(LINE_END.as_bytes())?;
    for record in log {
        writer.write_all(csv_row(record).as_bytes())?;
        writer.write_all(LINE_END.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Render `log` as a CSV string.
pub fn to_csv_string(log: &SessionLog) -> String {
    let mut out = csv_header();
    out.push_str(LINE_END);
    for record in log {
        out.push_str(&csv_row(record));
        out.push_str(LINE_END);
    }
    out
}

/// Write `log` as CSV to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`crate::ExportError::Io`] if the file cannot be created or
/// written.
pub fn save_csv(log: &SessionLog, path: &Path) -> ExportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_csv(log, BufWriter::new(file))?;
    info!(path = %path.display(), records = log.len(), "session exported as CSV");
    Ok(())
}
