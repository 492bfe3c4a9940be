pub mod error;
pub mod export;
pub mod routes;
