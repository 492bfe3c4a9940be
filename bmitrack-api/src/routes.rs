use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Local;
use log::info;

use bmitrack_db::measurement::{MeasurementRepository, MeasurementRepositoryImpl};
use bmitrack_db::user::{UserRepository, UserRepositoryImpl};
use bmitrack_model::measurement::Measurement;
use bmitrack_model::user::User;

use crate::error::ApiError;
use crate::export;

#[derive(Debug, serde::Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct MeasurementRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[get("/users")]
async fn list_users(users: web::Data<UserRepositoryImpl>) -> Result<impl Responder, ApiError> {
    Ok(web::Json(users.list_users().await?))
}

#[post("/users")]
async fn create_user(
    users: web::Data<UserRepositoryImpl>,
    request: web::Json<CreateUserRequest>,
) -> Result<impl Responder, ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::BlankUserName);
    }

    let user = users.create_user(name).await?;
    info!("Created user {} (id {})", user.name, user.id);
    Ok(HttpResponse::Created().json(user))
}

#[post("/users/{name}/measurements")]
async fn record_measurement(
    users: web::Data<UserRepositoryImpl>,
    measurements: web::Data<MeasurementRepositoryImpl>,
    path: web::Path<String>,
    request: web::Json<MeasurementRequest>,
) -> Result<impl Responder, ApiError> {
    let user = find_known_user(&users, &path).await?;

    let measurement = Measurement::new(
        request.weight_kg,
        request.height_cm,
        Local::now().naive_local(),
    )?;
    measurements.store_measurement(user.id, &measurement).await?;

    info!("Recorded BMI {} for user {}", measurement.bmi, user.name);
    Ok(HttpResponse::Created().json(measurement))
}

#[get("/users/{name}/measurements")]
async fn list_measurements(
    users: web::Data<UserRepositoryImpl>,
    measurements: web::Data<MeasurementRepositoryImpl>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let user = find_known_user(&users, &path).await?;
    Ok(web::Json(measurements.measurements_for_user(user.id).await?))
}

#[get("/users/{name}/trend")]
async fn trend(
    users: web::Data<UserRepositoryImpl>,
    measurements: web::Data<MeasurementRepositoryImpl>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let user = find_known_user(&users, &path).await?;
    Ok(web::Json(measurements.trend_for_user(user.id).await?))
}

#[get("/export")]
async fn export_csv(
    measurements: web::Data<MeasurementRepositoryImpl>,
) -> Result<impl Responder, ApiError> {
    let rows = measurements.all_measurements().await?;
    let body = export::render_csv(&rows)?;
    Ok(HttpResponse::Ok().content_type("text/csv").body(body))
}

async fn find_known_user(
    users: &web::Data<UserRepositoryImpl>,
    name: &str,
) -> Result<User, ApiError> {
    users
        .find_user(name)
        .await?
        .ok_or_else(|| ApiError::UnknownUser(name.to_owned()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(create_user)
        .service(record_measurement)
        .service(list_measurements)
        .service(trend)
        .service(export_csv);
}
