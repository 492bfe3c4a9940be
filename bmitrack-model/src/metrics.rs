//! Pure BMI arithmetic and classification.
//!
//! Every function in this module is referentially transparent: no state,
//! no I/O, no clock. Persistence and presentation talk to it through
//! plain values only.

use std::fmt;
use std::str::FromStr;

/// Category cutoffs. A BMI below a bound falls in the lower category;
/// the bound itself belongs to the category above it.
pub const UNDERWEIGHT_MAX_BMI: f64 = 18.5;
pub const NORMAL_MAX_BMI: f64 = 25.0;
pub const OVERWEIGHT_MAX_BMI: f64 = 30.0;

/// BMI bounds of the suggested weight range. The upper bound is 24.9,
/// not the 25.0 category cutoff, so the suggestion stays strictly inside
/// the Normal band.
pub const IDEAL_BMI_LOW: f64 = 18.5;
pub const IDEAL_BMI_HIGH: f64 = 24.9;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("invalid {quantity}: {value} (expected a finite positive number)")]
    InvalidInput { quantity: &'static str, value: f64 },
}

/// Weight classification derived from BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value. Total for every positive input; the
    /// intervals are half-open, so 18.5 is Normal, 25.0 is Overweight
    /// and 30.0 is Obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_MAX_BMI {
            BmiCategory::Underweight
        } else if bmi < NORMAL_MAX_BMI {
            BmiCategory::Normal
        } else if bmi < OVERWEIGHT_MAX_BMI {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// The presentation color token for this category.
    pub fn color(self) -> CategoryColor {
        match self {
            BmiCategory::Underweight => CategoryColor::SkyBlue,
            BmiCategory::Normal => CategoryColor::Green,
            BmiCategory::Overweight => CategoryColor::Orange,
            BmiCategory::Obese => CategoryColor::Red,
        }
    }

    /// The name the store persists, e.g. `"Normal"`.
    pub fn as_str(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BmiCategory {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Underweight" => Ok(BmiCategory::Underweight),
            "Normal" => Ok(BmiCategory::Normal),
            "Overweight" => Ok(BmiCategory::Overweight),
            "Obese" => Ok(BmiCategory::Obese),
            _ => Err("Invalid BMI category"),
        }
    }
}

/// Color tokens a presentation layer may render however it likes; the
/// names are the dashboard palette of the category display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CategoryColor {
    SkyBlue,
    Green,
    Orange,
    Red,
}

impl CategoryColor {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryColor::SkyBlue => "skyblue",
            CategoryColor::Green => "green",
            CategoryColor::Orange => "orange",
            CategoryColor::Red => "red",
        }
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute BMI and its category from weight in kilograms and height in
/// centimeters.
///
/// The returned BMI is rounded to 2 decimal places; classification uses
/// the unrounded value. Rejects non-finite or non-positive input.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<(f64, BmiCategory), MetricError> {
    check_positive("weight_kg", weight_kg)?;
    check_positive("height_cm", height_cm)?;

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Ok((round_to(bmi, 100.0), BmiCategory::from_bmi(bmi)))
}

/// The weight bounds corresponding to BMI [`IDEAL_BMI_LOW`] and
/// [`IDEAL_BMI_HIGH`] at the given height, each rounded to 1 decimal
/// place. `low <= high` for any positive height.
pub fn ideal_weight_range(height_cm: f64) -> Result<(f64, f64), MetricError> {
    check_positive("height_cm", height_cm)?;

    let height_m = height_cm / 100.0;
    let squared = height_m * height_m;
    Ok((
        round_to(IDEAL_BMI_LOW * squared, 10.0),
        round_to(IDEAL_BMI_HIGH * squared, 10.0),
    ))
}

fn check_positive(quantity: &'static str, value: f64) -> Result<(), MetricError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MetricError::InvalidInput { quantity, value })
    }
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_bmi_rounds_to_two_decimals() {
        let test_data = [
            (70.0, 175.0, 22.86, BmiCategory::Normal),
            (50.0, 160.0, 19.53, BmiCategory::Normal),
            (100.0, 170.0, 34.6, BmiCategory::Obese),
            (45.0, 180.0, 13.89, BmiCategory::Underweight),
            (85.0, 178.0, 26.83, BmiCategory::Overweight),
        ];

        for (i, (weight, height, expected_bmi, expected_category)) in
            test_data.into_iter().enumerate()
        {
            let (bmi, category) = compute_bmi(weight, height).unwrap();
            assert_eq!(bmi, expected_bmi, "Test case #{}", i);
            assert_eq!(category, expected_category, "Test case #{}", i);
        }
    }

    #[test]
    fn category_boundaries_belong_to_the_upper_category() {
        // Height of 100 cm makes the raw BMI equal the weight, so the
        // boundary values can be hit exactly.
        let test_data = [
            (18.49, BmiCategory::Underweight),
            (18.5, BmiCategory::Normal),
            (24.99, BmiCategory::Normal),
            (25.0, BmiCategory::Overweight),
            (29.99, BmiCategory::Overweight),
            (30.0, BmiCategory::Obese),
            (75.0, BmiCategory::Obese),
        ];

        for (i, (weight, expected)) in test_data.into_iter().enumerate() {
            let (bmi, category) = compute_bmi(weight, 100.0).unwrap();
            assert_eq!(bmi, weight, "Test case #{}", i);
            assert_eq!(category, expected, "Test case #{}", i);
        }
    }

    #[test]
    fn every_positive_bmi_maps_to_exactly_one_category() {
        let mut bmi = 0.5;
        while bmi < 80.0 {
            let category = BmiCategory::from_bmi(bmi);
            let expected = if bmi < 18.5 {
                BmiCategory::Underweight
            } else if bmi < 25.0 {
                BmiCategory::Normal
            } else if bmi < 30.0 {
                BmiCategory::Overweight
            } else {
                BmiCategory::Obese
            };
            assert_eq!(category, expected, "bmi {}", bmi);
            bmi += 0.25;
        }
    }

    #[test]
    fn compute_bmi_rejects_non_positive_and_non_finite_input() {
        let test_data = [
            (0.0, 170.0),
            (70.0, 0.0),
            (-70.0, 175.0),
            (70.0, -175.0),
            (f64::NAN, 175.0),
            (70.0, f64::NAN),
            (f64::INFINITY, 175.0),
            (70.0, f64::INFINITY),
        ];

        for (i, (weight, height)) in test_data.into_iter().enumerate() {
            assert!(compute_bmi(weight, height).is_err(), "Test case #{}", i);
        }

        assert_eq!(
            compute_bmi(0.0, 170.0),
            Err(MetricError::InvalidInput {
                quantity: "weight_kg",
                value: 0.0
            })
        );
        assert_eq!(
            compute_bmi(70.0, 0.0),
            Err(MetricError::InvalidInput {
                quantity: "height_cm",
                value: 0.0
            })
        );
    }

    #[test]
    fn ideal_weight_range_matches_the_fixed_bmi_bounds() {
        let test_data = [
            (170.0, 53.5, 72.0),
            (160.0, 47.4, 63.7),
            (175.0, 56.7, 76.3),
            (100.0, 18.5, 24.9),
        ];

        for (i, (height, expected_low, expected_high)) in test_data.into_iter().enumerate() {
            let (low, high) = ideal_weight_range(height).unwrap();
            assert_eq!(low, expected_low, "Test case #{}", i);
            assert_eq!(high, expected_high, "Test case #{}", i);
        }
    }

    #[test]
    fn ideal_weight_range_low_never_exceeds_high() {
        let mut height = 50.0;
        while height <= 250.0 {
            let (low, high) = ideal_weight_range(height).unwrap();
            assert!(low <= high, "height {}", height);
            height += 0.5;
        }
    }

    #[test]
    fn ideal_weight_range_rejects_invalid_height() {
        for (i, height) in [0.0, -160.0, f64::NAN, f64::INFINITY].into_iter().enumerate() {
            assert!(ideal_weight_range(height).is_err(), "Test case #{}", i);
        }
    }

    #[test]
    fn category_colors_match_the_dashboard_palette() {
        let test_data = [
            (BmiCategory::Underweight, CategoryColor::SkyBlue),
            (BmiCategory::Normal, CategoryColor::Green),
            (BmiCategory::Overweight, CategoryColor::Orange),
            (BmiCategory::Obese, CategoryColor::Red),
        ];

        for (i, (category, expected)) in test_data.into_iter().enumerate() {
            assert_eq!(category.color(), expected, "Test case #{}", i);
        }
    }

    #[test]
    fn category_names_roundtrip_through_strings() {
        let categories = [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ];

        for (i, category) in categories.into_iter().enumerate() {
            assert_eq!(
                category.to_string().parse::<BmiCategory>(),
                Ok(category),
                "Test case #{}",
                i
            );
        }

        assert!("Chunky".parse::<BmiCategory>().is_err());
        assert!("normal".parse::<BmiCategory>().is_err());
    }
}
