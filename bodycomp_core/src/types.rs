//! Core domain types for the bodycomp tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Gender and the caller-supplied measurement
//! - Computed metric results and BMI categories
//! - Persisted history records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

// ============================================================================
// Gender
// ============================================================================

/// Gender used to pick the Navy formula branch
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Lenient token conversion for callers of the metrics engine.
    ///
    /// The male token (`m`, any case) maps to `Male`; everything else is
    /// treated as `Female`, with no rejection. This is the public contract
    /// for embedders that hand `calculate_body_fat_navy` an unchecked token;
    /// the bundled front ends validate with [`FromStr`] instead.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("m") {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    /// Single uppercase letter written to the history log
    pub fn letter(self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            other => Err(Error::InvalidInput(format!(
                "Invalid gender '{}'. Please enter 'M' for Male or 'F' for Female.",
                other
            ))),
        }
    }
}

// ============================================================================
// Measurement and Result Types
// ============================================================================

/// Anthropometric measurements supplied by a front end
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub neck_cm: f64,
    pub waist_cm: f64,
    /// Only required for `Gender::Female`
    pub hip_cm: Option<f64>,
}

impl Measurement {
    /// Height converted to meters, the unit BMI and the history log use
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }

    /// Hip circumference with absent values treated as zero
    pub fn hip_or_zero(&self) -> f64 {
        self.hip_cm.unwrap_or(0.0)
    }
}

/// BMI health category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal Weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Human-readable label, also used in the history log
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metrics computed from a single measurement
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricResult {
    pub bmi: f64,
    pub body_fat_percent: f64,
    pub category: BmiCategory,
}

// ============================================================================
// Persisted Record
// ============================================================================

/// Timestamp layout of the `Date` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the history log
///
/// Field order and renames define the CSV header.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthRecord {
    #[serde(rename = "Date", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Weight (kg)")]
    pub weight_kg: f64,
    #[serde(rename = "Height (m)")]
    pub height_m: f64,
    #[serde(rename = "Waist (cm)")]
    pub waist_cm: f64,
    #[serde(rename = "Neck (cm)")]
    pub neck_cm: f64,
    #[serde(rename = "Hip (cm)")]
    pub hip_cm: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "Body Fat %")]
    pub body_fat_percent: f64,
    #[serde(rename = "Category")]
    pub category: BmiCategory,
}

impl HealthRecord {
    /// Build a record from a measurement and its computed metrics
    pub fn new(measurement: &Measurement, result: &MetricResult, timestamp: NaiveDateTime) -> Self {
        HealthRecord {
            timestamp,
            name: measurement.name.clone(),
            age: measurement.age,
            gender: measurement.gender,
            weight_kg: measurement.weight_kg,
            height_m: measurement.height_m(),
            waist_cm: measurement.waist_cm,
            neck_cm: measurement.neck_cm,
            hip_cm: measurement.hip_or_zero(),
            bmi: result.bmi,
            body_fat_percent: result.body_fat_percent,
            category: result.category,
        }
    }
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
