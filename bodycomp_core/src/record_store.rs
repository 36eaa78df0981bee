//! Append-only CSV history log.
//!
//! Each save appends exactly one row. The header is written only when the
//! log file does not exist yet; that is checked right before every append
//! rather than remembered, so a log deleted between saves is recreated with
//! its header.
//!
//! There is no file locking. Two processes saving at the same time can race
//! on the header check or interleave rows.

use crate::{HealthRecord, Measurement, MetricResult, Result};
use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Default log location, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "health_history.csv";

/// Record sink trait for persisting history rows
pub trait RecordSink {
    fn append(&mut self, record: &HealthRecord) -> Result<()>;
}

/// Outcome of a save, reported to front ends instead of an error
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
}

/// CSV-backed history log
#[derive(Clone, Debug)]
pub struct CsvRecordStore {
    path: PathBuf,
}

impl Default for CsvRecordStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

impl CsvRecordStore {
    /// Create a store for the given log path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Stamp the measurement with the current local time and append it
    ///
    /// Never fails: I/O problems come back as an unsuccessful outcome.
    pub fn save_record(&mut self, measurement: &Measurement, result: &MetricResult) -> SaveOutcome {
        self.save_record_at(measurement, result, Local::now().naive_local())
    }

    /// Same as [`save_record`](Self::save_record) with an explicit timestamp
    pub fn save_record_at(
        &mut self,
        measurement: &Measurement,
        result: &MetricResult,
        timestamp: NaiveDateTime,
    ) -> SaveOutcome {
        let record = HealthRecord::new(measurement, result, timestamp);

        match self.append(&record) {
            Ok(()) => SaveOutcome {
                success: true,
                message: format!(
                    "Record for {} saved to '{}'.",
                    record.name,
                    self.path.display()
                ),
            },
            Err(e) => {
                tracing::warn!("Failed to save record to {:?}: {}", self.path, e);
                SaveOutcome {
                    success: false,
                    message: format!("Could not save file: {}", e),
                }
            }
        }
    }
}

impl RecordSink for CsvRecordStore {
    fn append(&mut self, record: &HealthRecord) -> Result<()> {
        let needs_header = !self.path.is_file();

        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Headers come from the serde field renames on HealthRecord
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        writer.serialize(record)?;
        writer.flush()?;

        if needs_header {
            tracing::info!("Created history log at {:?}", self.path);
        }
        tracing::debug!("Appended record for {} to {:?}", record.name, self.path);
        Ok(())
    }
}

/// Read every record from a history log in write order
///
/// A missing file yields an empty list.
pub fn read_records(path: &Path) -> Result<Vec<HealthRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<HealthRecord>() {
        records.push(row?);
    }

    tracing::debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}
