//! JSON session recordings.
//!
//! A recording wraps the logged records with metadata describing how they
//! were produced and can be loaded back into a [`SessionLog`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use obdsim_core::session::{LogRecord, SessionLog};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportResult;

/// Session recording container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecording {
    pub metadata: RecordingMetadata,
    pub records: Vec<LogRecord>,
}

/// Recording metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub created_at: DateTime<Utc>,
    pub tick_interval_ms: u64,
    /// Seed of the random source, when the run was seeded.
    pub seed: Option<u64>,
    pub record_count: usize,
    pub description: Option<String>,
}

/// Run parameters stored in the recording metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub description: Option<String>,
}

impl SessionRecording {
    /// Snapshot `log` into a recording stamped with the current time.
    pub fn from_log(log: &SessionLog, options: &ExportOptions) -> Self {
        Self {
            metadata: RecordingMetadata {
                created_at: Utc::now(),
                tick_interval_ms: options.tick_interval_ms,
                seed: options.seed,
                record_count: log.len(),
                description: options.description.clone(),
            },
            records: log.records().to_vec(),
        }
    }

    /// Consume the recording, returning its records as a session log.
    pub fn into_log(self) -> SessionLog {
        SessionLog::from(self.records)
    }

    /// Serialize as pretty-printed JSON to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExportError`] if serialization or the writer fails.
    pub fn write_to<W: Write>(&self, writer: W) -> ExportResult<()> {
        let mut writer = writer;
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Save to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExportError`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> ExportResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        info!(
            path = %path.display(),
            records = self.metadata.record_count,
            "session exported as JSON recording"
        );
        Ok(())
    }

    /// Load a recording from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExportError`] if the file cannot be read or is not a
    /// valid recording.
    pub fn load(path: &Path) -> ExportResult<Self> {
        let file = File::open(path)?;
        let recording = serde_json::from_reader(BufReader::new(file))?;
        Ok(recording)
    }
}
