use std::io;

use bmitrack_db::measurement::{format_timestamp, UserMeasurement};

/// Column names of the export, written even when the store is empty.
const EXPORT_HEADER: [&str; 6] = ["UserID", "Weight", "Height", "BMI", "Category", "Date"];

#[derive(Debug, serde::Serialize)]
struct ExportRow {
    user_id: i64,
    weight: f64,
    height: f64,
    bmi: f64,
    category: &'static str,
    date: String,
}

impl From<&UserMeasurement> for ExportRow {
    fn from(stored: &UserMeasurement) -> Self {
        ExportRow {
            user_id: stored.user_id,
            weight: stored.measurement.weight_kg,
            height: stored.measurement.height_cm,
            bmi: stored.measurement.bmi,
            category: stored.measurement.category.as_str(),
            date: format_timestamp(stored.measurement.recorded_at),
        }
    }
}

/// Renders the whole store as CSV, one row per measurement, flat across
/// users.
pub fn render_csv(rows: &[UserMeasurement]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    writer.write_record(EXPORT_HEADER)?;
    for stored in rows {
        writer.serialize(ExportRow::from(stored))?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::Other, e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use bmitrack_model::measurement::Measurement;

    use super::*;

    fn recorded_on(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn stored(user_id: i64, weight_kg: f64, height_cm: f64, day: u32) -> UserMeasurement {
        UserMeasurement {
            user_id,
            measurement: Measurement::new(weight_kg, height_cm, recorded_on(day)).unwrap(),
        }
    }

    #[test]
    fn empty_store_still_exports_the_header() {
        let csv = render_csv(&[]).unwrap();
        assert_eq!(csv, "UserID,Weight,Height,BMI,Category,Date\n");
    }

    #[test]
    fn rows_are_flat_across_users() {
        let rows = [stored(1, 70.0, 175.0, 1), stored(2, 100.0, 170.0, 2)];

        let csv = render_csv(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "UserID,Weight,Height,BMI,Category,Date");
        assert_eq!(lines[1], "1,70.0,175.0,22.86,Normal,2024-03-01T08:30:00");
        assert_eq!(lines[2], "2,100.0,170.0,34.6,Obese,2024-03-02T08:30:00");
    }
}
