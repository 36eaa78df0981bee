//! Raw text parsing and measurement validation.
//!
//! Front ends collect strings; these helpers turn them into a
//! [`Measurement`] or fail with [`Error::InvalidInput`]. Malformed text is
//! never silently defaulted.

use crate::{Error, Gender, Measurement, Result};

/// Parse a gender token (`m`/`f`/`male`/`female`, any case)
pub fn parse_gender(text: &str) -> Result<Gender> {
    text.parse()
}

/// Parse a numeric measurement field
pub fn parse_measure(field: &str, text: &str) -> Result<f64> {
    let value: f64 = text.trim().parse().map_err(|_| {
        Error::InvalidInput(format!("{} must be a number, got '{}'", field, text.trim()))
    })?;

    if !value.is_finite() {
        return Err(Error::InvalidInput(format!(
            "{} must be a finite number, got '{}'",
            field,
            text.trim()
        )));
    }

    Ok(value)
}

/// Parse an age in whole years
///
/// Negative and zero ages parse successfully here and are rejected by
/// [`Measurement::validate`], matching how the other numeric fields behave.
pub fn parse_age(text: &str) -> Result<i64> {
    text.trim().parse().map_err(|_| {
        Error::InvalidInput(format!("Age must be a whole number, got '{}'", text.trim()))
    })
}

/// Raw, unparsed form fields as typed by a user
#[derive(Clone, Debug, Default)]
pub struct RawMeasurement {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub neck: String,
    pub waist: String,
    /// Ignored for male measurements
    pub hip: Option<String>,
}

impl RawMeasurement {
    /// Parse and validate every field
    pub fn parse(&self) -> Result<Measurement> {
        let gender = parse_gender(&self.gender)?;
        let age = parse_age(&self.age)?;

        let hip_cm = match gender {
            Gender::Female => {
                let hip = self
                    .hip
                    .as_deref()
                    .ok_or_else(|| Error::InvalidInput("Hip is required for female".into()))?;
                Some(parse_measure("Hip", hip)?)
            }
            Gender::Male => None,
        };

        let measurement = Measurement {
            name: self.name.trim().to_string(),
            age: age_to_u32(age)?,
            gender,
            weight_kg: parse_measure("Weight", &self.weight)?,
            height_cm: parse_measure("Height", &self.height)?,
            neck_cm: parse_measure("Neck", &self.neck)?,
            waist_cm: parse_measure("Waist", &self.waist)?,
            hip_cm,
        };

        measurement.validate()?;
        Ok(measurement)
    }
}

/// Convert a parsed age, rejecting values that cannot be a positive `u32`
pub fn age_to_u32(age: i64) -> Result<u32> {
    u32::try_from(age)
        .ok()
        .filter(|a| *a > 0)
        .ok_or_else(|| Error::InvalidInput("Inputs must be positive numbers!".into()))
}

impl Measurement {
    /// Check the positivity invariants
    ///
    /// Weight, height, age, neck and waist must be positive; hip must be
    /// positive for female measurements.
    pub fn validate(&self) -> Result<()> {
        let positive = self.weight_kg > 0.0
            && self.height_cm > 0.0
            && self.age > 0
            && self.neck_cm > 0.0
            && self.waist_cm > 0.0;

        let hip_ok = match self.gender {
            Gender::Male => true,
            Gender::Female => self.hip_cm.map_or(false, |hip| hip > 0.0),
        };

        if positive && hip_ok {
            Ok(())
        } else {
            Err(Error::InvalidInput("Inputs must be positive numbers!".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_female() -> RawMeasurement {
        RawMeasurement {
            name: " Ana ".into(),
            age: "29".into(),
            gender: "F".into(),
            weight: "60".into(),
            height: "165".into(),
            neck: "32".into(),
            waist: "70".into(),
            hip: Some("95".into()),
        }
    }

    #[test]
    fn test_parse_measure_accepts_whitespace() {
        assert_eq!(parse_measure("Weight", " 70.5 \n").unwrap(), 70.5);
    }

    #[test]
    fn test_parse_measure_rejects_text() {
        let err = parse_measure("Weight", "seventy").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("Weight"));
    }

    #[test]
    fn test_parse_measure_rejects_non_finite() {
        assert!(parse_measure("Height", "inf").unwrap_err().is_invalid_input());
        assert!(parse_measure("Height", "NaN").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("42").unwrap(), 42);
        assert_eq!(parse_age("-1").unwrap(), -1);
        assert!(parse_age("4.5").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_raw_measurement_parses_female() {
        let measurement = raw_female().parse().unwrap();

        assert_eq!(measurement.name, "Ana");
        assert_eq!(measurement.gender, Gender::Female);
        assert_eq!(measurement.hip_cm, Some(95.0));
        assert_eq!(measurement.age, 29);
    }

    #[test]
    fn test_raw_measurement_male_ignores_hip() {
        let mut raw = raw_female();
        raw.gender = "m".into();
        raw.hip = Some("not a number".into());

        let measurement = raw.parse().unwrap();
        assert_eq!(measurement.gender, Gender::Male);
        assert_eq!(measurement.hip_cm, None);
    }

    #[test]
    fn test_raw_measurement_female_requires_hip() {
        let mut raw = raw_female();
        raw.hip = None;

        assert!(raw.parse().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_raw_measurement_rejects_invalid_gender() {
        let mut raw = raw_female();
        raw.gender = "x".into();

        assert!(raw.parse().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let mut raw = raw_female();
        raw.weight = "0".into();
        assert!(raw.parse().unwrap_err().is_invalid_input());

        let mut raw = raw_female();
        raw.age = "0".into();
        assert!(raw.parse().unwrap_err().is_invalid_input());

        let mut raw = raw_female();
        raw.hip = Some("-4".into());
        assert!(raw.parse().unwrap_err().is_invalid_input());
    }
}
