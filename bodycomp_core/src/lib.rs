#![forbid(unsafe_code)]

//! Core domain model and business logic for the bodycomp tracker.
//!
//! This crate provides:
//! - Domain types (measurements, metric results, persisted records)
//! - Metrics engine (BMI, U.S. Navy body-fat percentage)
//! - BMI classification
//! - Append-only CSV record store
//! - Raw input parsing shared by every front end

pub mod types;
pub mod error;
pub mod metrics;
pub mod classify;
pub mod input;
pub mod config;
pub mod logging;
pub mod record_store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use metrics::{calculate_bmi, calculate_body_fat_navy, compute_metrics};
pub use classify::{category_for, classify};
pub use input::RawMeasurement;
pub use record_store::{read_records, CsvRecordStore, RecordSink, SaveOutcome, DEFAULT_HISTORY_FILE};
