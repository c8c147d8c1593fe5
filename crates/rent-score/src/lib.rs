pub mod config;
pub mod error;
pub mod income;
pub mod router;
pub mod scoring;
pub mod telemetry;
