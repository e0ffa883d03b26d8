//! Session log: one record per completed tick.

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::faults::FaultCode;
use crate::snapshot::SensorSnapshot;

/// Column name of the situation field in exports.
pub const SITUATION_COLUMN: &str = "Situation";

/// Output of one tick together with the selection that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub snapshot: SensorSnapshot,
    pub fault_code: FaultCode,
    pub situation: String,
}

impl LogRecord {
    pub fn new(snapshot: SensorSnapshot, situation: impl Into<String>) -> Self {
        Self {
            fault_code: snapshot.fault_code,
            snapshot,
            situation: situation.into(),
        }
    }

    /// Formatted field values in [`SessionLog::columns`] order.
    pub fn fields(&self) -> Vec<String> {
        Channel::ALL
            .iter()
            .map(|channel| self.snapshot.get(*channel).to_string())
            .chain([self.fault_code.label(), self.situation.clone()])
            .collect()
    }
}

/// Append-only list of tick records.
///
/// Written only by its owner; the engine never reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    records: Vec<LogRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export column names: snapshot columns in canonical order, then the
    /// situation.
    pub fn columns() -> Vec<&'static str> {
        let mut columns = SensorSnapshot::column_names();
        columns.push(SITUATION_COLUMN);
        columns
    }

    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&LogRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl From<Vec<LogRecord>> for SessionLog {
    fn from(records: Vec<LogRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a SessionLog {
    type Item = &'a LogRecord;
    type IntoIter = core::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
