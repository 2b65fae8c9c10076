//! Utility modules for the ingestion gateway

pub mod error;

pub use error::{GatewayError, Result};
