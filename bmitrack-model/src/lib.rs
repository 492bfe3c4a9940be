pub mod measurement;
pub mod metrics;
pub mod user;
