pub mod bidding;
pub mod config;
pub mod error;
pub mod telemetry;
