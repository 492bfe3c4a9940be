use chrono::NaiveDateTime;

use crate::metrics::{self, BmiCategory, MetricError};

/// A single BMI measurement. `bmi` and `category` are derived from the
/// inputs by [`metrics::compute_bmi`] at construction; values read back
/// from the store carry the persisted fields verbatim.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmi: f64,
    pub category: BmiCategory,
    pub recorded_at: NaiveDateTime,
}

impl Measurement {
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        recorded_at: NaiveDateTime,
    ) -> Result<Self, MetricError> {
        let (bmi, category) = metrics::compute_bmi(weight_kg, height_cm)?;
        Ok(Self {
            weight_kg,
            height_cm,
            bmi,
            category,
            recorded_at,
        })
    }
}

/// One point of a user's BMI history, the projection the trend chart
/// draws.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendPoint {
    pub recorded_at: NaiveDateTime,
    pub bmi: f64,
}
