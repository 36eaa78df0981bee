//! BMI classification.
//!
//! Known defect, kept on purpose: values in `[24.9, 25.0)` fall outside both
//! the normal and overweight bands and are reported as `Obese`. The likely
//! intent is `< 25` for normal and `< 30` for overweight; this needs a product
//! decision before it changes, since stored history already reflects the
//! current table.

use crate::BmiCategory;

/// Map a BMI value to its health category
///
/// Total over every `f64`, NaN included (it falls through to `Obese`).
pub fn category_for(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if (18.5..24.9).contains(&bmi) {
        BmiCategory::NormalWeight
    } else if (25.0..29.9).contains(&bmi) {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Alias of [`category_for`] matching the front-end contract
pub fn classify(bmi: f64) -> BmiCategory {
    category_for(bmi)
}
