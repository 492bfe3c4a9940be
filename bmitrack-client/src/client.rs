use async_trait::async_trait;
use reqwest::StatusCode;

use bmitrack_model::measurement::{Measurement, TrendPoint};
use bmitrack_model::user::User;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
    #[error("resource already exists")]
    Conflict,
    #[error("resource not found")]
    NotFound,
}

type Result<T> = std::result::Result<T, Error>;

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    async fn get_users(&self) -> Result<Vec<User>>;
    async fn create_user(&self, name: &str) -> Result<User>;
    async fn post_measurement(
        &self,
        name: &str,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<Measurement>;
    async fn get_measurements(&self, name: &str) -> Result<Vec<Measurement>>;
    async fn get_trend(&self, name: &str) -> Result<Vec<TrendPoint>>;
    async fn export_csv(&self) -> Result<String>;
}

#[derive(serde::Serialize)]
struct CreateUserRequest<'a> {
    name: &'a str,
}

#[derive(serde::Serialize)]
struct MeasurementRequest {
    weight_kg: f64,
    height_cm: f64,
}

pub struct ClientImpl {
    url: String,
    client: reqwest::Client,
}

impl ClientImpl {
    fn new(mut url: String) -> Self {
        if !url.ends_with('/') {
            url.push('/');
        }
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

pub fn create(url: String) -> impl Client {
    ClientImpl::new(url)
}

fn status_error(status: StatusCode) -> Option<Error> {
    match status {
        StatusCode::CONFLICT => Some(Error::Conflict),
        StatusCode::NOT_FOUND => Some(Error::NotFound),
        s if s.is_client_error() => Some(Error::RequestError),
        s if s.is_server_error() => Some(Error::InternalServerError),
        _ => None,
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    match status_error(resp.status()) {
        Some(e) => Err(e),
        None => Ok(resp),
    }
}

#[async_trait]
impl Client for ClientImpl {
    async fn get_users(&self) -> Result<Vec<User>> {
        self.client
            .get(format!("{}users", self.url))
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn create_user(&self, name: &str) -> Result<User> {
        self.client
            .post(format!("{}users", self.url))
            .json(&CreateUserRequest { name })
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn post_measurement(
        &self,
        name: &str,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<Measurement> {
        self.client
            .post(format!("{}users/{}/measurements", self.url, name))
            .json(&MeasurementRequest {
                weight_kg,
                height_cm,
            })
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn get_measurements(&self, name: &str) -> Result<Vec<Measurement>> {
        self.client
            .get(format!("{}users/{}/measurements", self.url, name))
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn get_trend(&self, name: &str) -> Result<Vec<TrendPoint>> {
        self.client
            .get(format!("{}users/{}/trend", self.url, name))
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn export_csv(&self) -> Result<String> {
        self.client
            .get(format!("{}export", self.url))
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .text()
            .await
            .map_err(|_| Error::ResponseError)
    }
}
