use actix_web::http::StatusCode;
use actix_web::ResponseError;

use bmitrack_db::error::Error as DbError;
use bmitrack_model::metrics::MetricError;

/// Everything a handler can fail with, mapped onto a status code by the
/// [`ResponseError`] impl. The default `error_response` renders the
/// `Display` text as the body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user \"{0}\" already exists")]
    UserAlreadyExists(String),
    #[error("no such user \"{0}\"")]
    UnknownUser(String),
    #[error("user name must not be blank")]
    BlankUserName,
    #[error(transparent)]
    InvalidMeasurement(#[from] MetricError),
    #[error("storage failure: {0}")]
    Storage(DbError),
    #[error("export failure: {0}")]
    Export(#[from] csv::Error),
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::UserAlreadyExists(name) => ApiError::UserAlreadyExists(name),
            other => ApiError::Storage(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            ApiError::UnknownUser(_) => StatusCode::NOT_FOUND,
            ApiError::BlankUserName | ApiError::InvalidMeasurement(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
