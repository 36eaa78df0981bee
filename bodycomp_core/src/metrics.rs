//! Metrics engine: BMI and U.S. Navy body-fat percentage.
//!
//! Every function here is total. Degenerate inputs (zero height, a
//! non-positive logarithm argument, a non-finite intermediate) produce the
//! documented 0.0 fallback instead of an error. Callers that need to tell
//! degenerate input apart from real results should validate first with
//! [`Measurement::validate`](crate::Measurement::validate).

use crate::{classify::category_for, Gender, Measurement, MetricResult};

/// Round to two decimal places, half to even on the exact binary value
///
/// `{:.2}` formats from the exact value of the float, so 20.125 becomes
/// 20.12 and 1.005 (stored as 1.00499...) becomes 1.0. Scaling by 100
/// first would round twice and push both of those up.
pub(crate) fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Body Mass Index from weight in kg and height in meters, rounded to 2 decimals
///
/// Returns 0.0 when `height_m` is zero or the quotient is not finite.
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> f64 {
    if height_m == 0.0 {
        return 0.0;
    }

    let bmi = weight_kg / (height_m * height_m);
    if !bmi.is_finite() {
        return 0.0;
    }

    round2(bmi)
}

/// Body-fat percentage using the U.S. Navy circumference method
///
/// `hip_cm` is only read for `Gender::Female`. The result is clamped at 0
/// and rounded to 2 decimals; any failed precondition yields 0.0.
pub fn calculate_body_fat_navy(
    gender: Gender,
    height_cm: f64,
    waist_cm: f64,
    neck_cm: f64,
    hip_cm: f64,
) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let log_height = height_cm.log10();

    let bfp = match gender {
        Gender::Male => {
            let circumference = waist_cm - neck_cm;
            if circumference <= 0.0 {
                return 0.0;
            }
            495.0 / (1.0324 - 0.19077 * circumference.log10() + 0.15456 * log_height) - 450.0
        }
        Gender::Female => {
            let circumference = waist_cm + hip_cm - neck_cm;
            if circumference <= 0.0 {
                return 0.0;
            }
            495.0 / (1.29579 - 0.35004 * circumference.log10() + 0.22100 * log_height) - 450.0
        }
    };

    // f64::max drops NaN silently, so check before clamping
    if !bfp.is_finite() {
        tracing::debug!("Navy formula produced a non-finite value, using 0.0");
        return 0.0;
    }

    round2(bfp.max(0.0))
}

/// Compute BMI, body fat and category for a measurement
pub fn compute_metrics(measurement: &Measurement) -> MetricResult {
    let bmi = calculate_bmi(measurement.weight_kg, measurement.height_m());
    let body_fat_percent = calculate_body_fat_navy(
        measurement.gender,
        measurement.height_cm,
        measurement.waist_cm,
        measurement.neck_cm,
        measurement.hip_or_zero(),
    );
    let category = category_for(bmi);

    tracing::debug!(
        "Computed metrics for {}: bmi={} bfp={} category={}",
        measurement.name,
        bmi,
        body_fat_percent,
        category
    );

    MetricResult {
        bmi,
        body_fat_percent,
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BmiCategory;

    fn male_formula(height_cm: f64, waist_cm: f64, neck_cm: f64) -> f64 {
        let x = (waist_cm - neck_cm).log10();
        let h = height_cm.log10();
        round2(495.0 / (1.0324 - 0.19077 * x + 0.15456 * h) - 450.0)
    }

    fn female_formula(height_cm: f64, waist_cm: f64, neck_cm: f64, hip_cm: f64) -> f64 {
        let x = (waist_cm + hip_cm - neck_cm).log10();
        let h = height_cm.log10();
        round2(495.0 / (1.29579 - 0.35004 * x + 0.22100 * h) - 450.0)
    }

    fn sample_male() -> Measurement {
        Measurement {
            name: "Sam".into(),
            age: 35,
            gender: Gender::Male,
            weight_kg: 70.0,
            height_cm: 180.0,
            neck_cm: 38.0,
            waist_cm: 82.0,
            hip_cm: None,
        }
    }

    fn sample_female() -> Measurement {
        Measurement {
            name: "Ana".into(),
            age: 29,
            gender: Gender::Female,
            weight_kg: 60.0,
            height_cm: 165.0,
            neck_cm: 32.0,
            waist_cm: 70.0,
            hip_cm: Some(95.0),
        }
    }

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        assert_eq!(calculate_bmi(70.0, 1.8), 21.6);
        assert_eq!(calculate_bmi(60.0, 1.65), 22.04);
        assert_eq!(calculate_bmi(82.5, 1.75), round2(82.5 / (1.75 * 1.75)));
    }

    #[test]
    fn test_round2_ties_go_to_even() {
        assert_eq!(round2(20.125), 20.12);
        assert_eq!(round2(20.375), 20.38);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_bmi_exact_tie_rounds_down_to_even() {
        // 80.5 / 2.0^2 is exactly 20.125
        assert_eq!(calculate_bmi(80.5, 2.0), 20.12);
    }

    #[test]
    fn test_bmi_zero_height_falls_back_to_zero() {
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(0.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(-5.0, 0.0), 0.0);
    }

    #[test]
    fn test_bmi_non_finite_falls_back_to_zero() {
        assert_eq!(calculate_bmi(f64::NAN, 1.8), 0.0);
        assert_eq!(calculate_bmi(f64::INFINITY, 1.8), 0.0);
    }

    #[test]
    fn test_navy_male_matches_formula() {
        let bfp = calculate_body_fat_navy(Gender::Male, 180.0, 82.0, 38.0, 0.0);
        assert_eq!(bfp, male_formula(180.0, 82.0, 38.0));
        assert!(bfp > 10.0 && bfp < 20.0, "unexpected male bfp {}", bfp);
    }

    #[test]
    fn test_navy_accepts_lenient_gender_tokens() {
        let male = calculate_body_fat_navy(Gender::Male, 180.0, 82.0, 38.0, 95.0);
        let female = calculate_body_fat_navy(Gender::Female, 180.0, 82.0, 38.0, 95.0);

        assert_eq!(calculate_body_fat_navy(Gender::from_token("M"), 180.0, 82.0, 38.0, 95.0), male);
        assert_eq!(calculate_body_fat_navy(Gender::from_token("m"), 180.0, 82.0, 38.0, 95.0), male);
        assert_eq!(calculate_body_fat_navy(Gender::from_token("q"), 180.0, 82.0, 38.0, 95.0), female);
    }

    #[test]
    fn test_navy_male_ignores_hip() {
        let without = calculate_body_fat_navy(Gender::Male, 180.0, 82.0, 38.0, 0.0);
        let with = calculate_body_fat_navy(Gender::Male, 180.0, 82.0, 38.0, 100.0);
        assert_eq!(without, with);
    }

    #[test]
    fn test_navy_female_matches_formula() {
        let bfp = calculate_body_fat_navy(Gender::Female, 165.0, 70.0, 32.0, 95.0);
        assert_eq!(bfp, female_formula(165.0, 70.0, 32.0, 95.0));
        assert!(bfp > 20.0 && bfp < 30.0, "unexpected female bfp {}", bfp);
    }

    #[test]
    fn test_navy_male_non_positive_circumference() {
        assert_eq!(calculate_body_fat_navy(Gender::Male, 180.0, 38.0, 38.0, 0.0), 0.0);
        assert_eq!(calculate_body_fat_navy(Gender::Male, 180.0, 30.0, 38.0, 0.0), 0.0);
    }

    #[test]
    fn test_navy_female_non_positive_circumference() {
        assert_eq!(calculate_body_fat_navy(Gender::Female, 165.0, 20.0, 40.0, 20.0), 0.0);
        assert_eq!(calculate_body_fat_navy(Gender::Female, 165.0, 10.0, 40.0, 5.0), 0.0);
    }

    #[test]
    fn test_navy_invalid_height_falls_back_to_zero() {
        assert_eq!(calculate_body_fat_navy(Gender::Male, 0.0, 82.0, 38.0, 0.0), 0.0);
        assert_eq!(calculate_body_fat_navy(Gender::Female, -165.0, 70.0, 32.0, 95.0), 0.0);
        assert_eq!(calculate_body_fat_navy(Gender::Male, f64::NAN, 82.0, 38.0, 0.0), 0.0);
    }

    #[test]
    fn test_navy_is_clamped_at_zero() {
        // Tiny waist relative to height drives the raw formula negative
        let raw = male_formula(250.0, 40.0, 38.0);
        assert!(raw < 0.0);
        assert_eq!(calculate_body_fat_navy(Gender::Male, 250.0, 40.0, 38.0, 0.0), 0.0);
    }

    #[test]
    fn test_navy_never_negative() {
        for height in [120.0, 150.0, 180.0, 210.0] {
            for waist in [40.0, 60.0, 90.0, 140.0] {
                for neck in [25.0, 35.0, 45.0] {
                    for gender in [Gender::Male, Gender::Female] {
                        let bfp = calculate_body_fat_navy(gender, height, waist, neck, 90.0);
                        assert!(bfp >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_compute_metrics_male_scenario() {
        let result = compute_metrics(&sample_male());

        assert_eq!(result.bmi, 21.6);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.body_fat_percent, male_formula(180.0, 82.0, 38.0));
    }

    #[test]
    fn test_compute_metrics_female_scenario() {
        let result = compute_metrics(&sample_female());

        assert_eq!(result.bmi, 22.04);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.body_fat_percent, female_formula(165.0, 70.0, 32.0, 95.0));
    }

    #[test]
    fn test_compute_metrics_female_without_hip() {
        let mut measurement = sample_female();
        measurement.hip_cm = None;

        let result = compute_metrics(&measurement);

        // 70 + 0 - 32 = 38 is still positive, so the formula runs with hip = 0
        assert_eq!(result.body_fat_percent, female_formula(165.0, 70.0, 32.0, 0.0).max(0.0));
    }
}
