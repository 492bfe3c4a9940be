use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::debug;
use sqlx::FromRow;

use bmitrack_model::measurement::{Measurement, TrendPoint};
use bmitrack_model::metrics::BmiCategory;

use crate::connection::Connection;
use crate::error::Error;

/// Storage format of the `date` column: ISO-8601 with a `T` separator
/// and an optional fractional second, so `ORDER BY date` sorts
/// chronologically as plain text.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Renders a timestamp the way the store persists it. The export uses
/// this to reproduce the stored `date` text verbatim.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn parse_timestamp(text: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|e| Error::MalformedRecord(format!("bad timestamp \"{}\": {}", text, e)))
}

/// A measurement together with the id of the user it belongs to, the
/// shape the export reads back.
#[derive(Debug, Clone, PartialEq)]
pub struct UserMeasurement {
    pub user_id: i64,
    pub measurement: Measurement,
}

#[derive(FromRow)]
struct MeasurementRow {
    user_id: i64,
    weight: f64,
    height: f64,
    bmi: f64,
    category: String,
    date: String,
}

impl TryFrom<MeasurementRow> for UserMeasurement {
    type Error = Error;

    fn try_from(row: MeasurementRow) -> Result<Self, Error> {
        let category = row.category.parse::<BmiCategory>().map_err(|e| {
            Error::MalformedRecord(format!("bad category \"{}\": {}", row.category, e))
        })?;

        Ok(UserMeasurement {
            user_id: row.user_id,
            measurement: Measurement {
                weight_kg: row.weight,
                height_cm: row.height,
                bmi: row.bmi,
                category,
                recorded_at: parse_timestamp(&row.date)?,
            },
        })
    }
}

#[derive(FromRow)]
struct TrendRow {
    bmi: f64,
    date: String,
}

#[mockall::automock]
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    async fn store_measurement(&self, user_id: i64, measurement: &Measurement)
        -> Result<(), Error>;
    async fn measurements_for_user(&self, user_id: i64) -> Result<Vec<Measurement>, Error>;
    async fn trend_for_user(&self, user_id: i64) -> Result<Vec<TrendPoint>, Error>;
    async fn all_measurements(&self) -> Result<Vec<UserMeasurement>, Error>;
}

#[derive(Clone)]
pub struct MeasurementRepositoryImpl {
    connection: Connection,
}

impl MeasurementRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl MeasurementRepository for MeasurementRepositoryImpl {
    async fn store_measurement(
        &self,
        user_id: i64,
        measurement: &Measurement,
    ) -> Result<(), Error> {
        debug!("Storing measurement for user {}", user_id);
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT INTO bmi_records(user_id, weight, height, bmi, category, date)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(measurement.weight_kg)
        .bind(measurement.height_cm)
        .bind(measurement.bmi)
        .bind(measurement.category.as_str())
        .bind(format_timestamp(measurement.recorded_at))
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn measurements_for_user(&self, user_id: i64) -> Result<Vec<Measurement>, Error> {
        let mut conn = self.connection.lock().await;
        let rows = sqlx::query_as::<_, MeasurementRow>(
            "SELECT user_id, weight, height, bmi, category, date FROM bmi_records
             WHERE user_id = ? ORDER BY date",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter()
            .map(|row| UserMeasurement::try_from(row).map(|stored| stored.measurement))
            .collect()
    }

    async fn trend_for_user(&self, user_id: i64) -> Result<Vec<TrendPoint>, Error> {
        let mut conn = self.connection.lock().await;
        let rows = sqlx::query_as::<_, TrendRow>(
            "SELECT bmi, date FROM bmi_records WHERE user_id = ? ORDER BY date",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(TrendPoint {
                    recorded_at: parse_timestamp(&row.date)?,
                    bmi: row.bmi,
                })
            })
            .collect()
    }

    async fn all_measurements(&self) -> Result<Vec<UserMeasurement>, Error> {
        let mut conn = self.connection.lock().await;
        let rows = sqlx::query_as::<_, MeasurementRow>(
            "SELECT user_id, weight, height, bmi, category, date FROM bmi_records ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter().map(UserMeasurement::try_from).collect()
    }
}
