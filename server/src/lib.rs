//! Cambio Exchange API Server
//!
//! JSON HTTP surface over the exchange service: account and rate
//! management, the transaction log, the exchange operation itself, and a
//! Prometheus metrics endpoint.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;

pub use api::{router, AppState};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
