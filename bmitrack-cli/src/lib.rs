//! Terminal front end over the HTTP client. Every command renders its
//! whole output as one string so the binary stays a thin dispatcher and
//! the rendering is testable against a mocked client.

use std::path::Path;

use log::debug;
use nu_ansi_term::{Color, Style};

use bmitrack_client::Client;
use bmitrack_model::measurement::Measurement;
use bmitrack_model::metrics::{
    self, BmiCategory, CategoryColor, MetricError, NORMAL_MAX_BMI, OVERWEIGHT_MAX_BMI,
    UNDERWEIGHT_MAX_BMI,
};

/// Upper end of the trend bar axis. BMI values beyond it are clamped,
/// as a chart would clip them.
const BMI_AXIS_MAX: f64 = 40.0;
const BAR_WIDTH: usize = 40;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("User already exists")]
    UserExists,
    #[error("User not found")]
    UnknownUser,
    #[error("Please enter valid numeric values for height and weight")]
    InvalidInput,
    #[error(transparent)]
    Client(bmitrack_client::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<bmitrack_client::Error> for AppError {
    fn from(e: bmitrack_client::Error) -> Self {
        match e {
            bmitrack_client::Error::Conflict => AppError::UserExists,
            bmitrack_client::Error::NotFound => AppError::UnknownUser,
            bmitrack_client::Error::RequestError => AppError::InvalidInput,
            other => AppError::Client(other),
        }
    }
}

impl From<MetricError> for AppError {
    fn from(_: MetricError) -> Self {
        AppError::InvalidInput
    }
}

pub struct App {
    client: Box<dyn Client>,
}

impl App {
    pub fn new(client: Box<dyn Client>) -> Self {
        Self { client }
    }

    pub async fn add_user(&self, name: &str) -> Result<String, AppError> {
        let user = self.client.create_user(name).await?;
        debug!("Created user with id {}", user.id);
        Ok(format!("Added user {}", user.name))
    }

    pub async fn list_users(&self) -> Result<String, AppError> {
        let users = self.client.get_users().await?;
        if users.is_empty() {
            return Ok("No users yet".to_owned());
        }
        Ok(users
            .into_iter()
            .map(|user| user.name)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub async fn record(
        &self,
        name: &str,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<String, AppError> {
        let measurement = self
            .client
            .post_measurement(name, weight_kg, height_cm)
            .await?;
        let (low, high) = metrics::ideal_weight_range(height_cm)?;

        let mut lines = Vec::new();
        lines.push(format!(
            "{} ({})",
            measurement.bmi,
            paint_category(measurement.category)
        ));
        lines.push(format!("Ideal Weight Range: {:.1} - {:.1} kg", low, high));
        Ok(lines.join("\n"))
    }

    pub async fn history(&self, name: &str) -> Result<String, AppError> {
        let measurements = self.client.get_measurements(name).await?;
        if measurements.is_empty() {
            return Ok(format!("No measurements for {}", name));
        }

        let mut lines = Vec::new();
        lines.push(
            Style::new()
                .bold()
                .paint(format!(
                    "{:<17}{:>8}{:>8}{:>7}  Category",
                    "Date", "Weight", "Height", "BMI"
                ))
                .to_string(),
        );
        for measurement in &measurements {
            lines.push(history_row(measurement));
        }
        Ok(lines.join("\n"))
    }

    pub async fn trend(&self, name: &str) -> Result<String, AppError> {
        let points = self.client.get_trend(name).await?;
        if points.is_empty() {
            return Ok(format!("No measurements for {}", name));
        }

        let mut lines = Vec::new();
        lines.push(
            Style::new()
                .bold()
                .paint(format!("BMI Trend for {}", name))
                .to_string(),
        );
        for point in &points {
            let category = BmiCategory::from_bmi(point.bmi);
            lines.push(format!(
                "{}  {:>6.2}  {}",
                point.recorded_at.format("%Y-%m-%d %H:%M"),
                point.bmi,
                color_of(category).paint(bar(point.bmi)),
            ));
        }
        lines.push(format!(
            "thresholds: {} / {} / {}",
            Color::Blue.paint(UNDERWEIGHT_MAX_BMI.to_string()),
            Color::Green.paint(NORMAL_MAX_BMI.to_string()),
            Color::Red.paint(OVERWEIGHT_MAX_BMI.to_string()),
        ));
        Ok(lines.join("\n"))
    }

    pub async fn export(&self, path: &Path) -> Result<String, AppError> {
        let csv = self.client.export_csv().await?;
        std::fs::write(path, &csv)?;
        Ok(format!("CSV exported to {}", path.display()))
    }
}

fn history_row(measurement: &Measurement) -> String {
    format!(
        "{:<17}{:>8.1}{:>8.1}{:>7.2}  {}",
        measurement.recorded_at.format("%Y-%m-%d %H:%M"),
        measurement.weight_kg,
        measurement.height_cm,
        measurement.bmi,
        paint_category(measurement.category),
    )
}

fn paint_category(category: BmiCategory) -> String {
    color_of(category).paint(category.as_str()).to_string()
}

/// The terminal rendering of the dashboard palette tokens.
fn color_of(category: BmiCategory) -> Color {
    match category.color() {
        CategoryColor::SkyBlue => Color::Rgb(135, 206, 235),
        CategoryColor::Green => Color::Green,
        CategoryColor::Orange => Color::Rgb(255, 165, 0),
        CategoryColor::Red => Color::Red,
    }
}

fn bar(bmi: f64) -> String {
    let filled = ((bmi / BMI_AXIS_MAX).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}
