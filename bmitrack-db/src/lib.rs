pub mod connection;
pub mod error;
pub mod measurement;
pub mod schema;
pub mod user;
