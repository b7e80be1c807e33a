//! Core types for the toolkit.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: API connection, observability and permission settings

mod config;
mod errors;

pub use config::{ApiConfig, ApiEnv, Config, ObservabilityConfig, DEV_BASE_URL, PROD_BASE_URL};
pub use errors::{jsonrpc, Error, Result};
