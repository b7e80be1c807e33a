//! Remote client seam.
//!
//! Adapters never talk HTTP themselves; they hand validated arguments to a
//! [`RemoteClient`]. [`crate::siren::SirenApi`] is the production
//! implementation, tests substitute their own.

use crate::types::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Generic entry point for executing one Siren operation.
///
/// Returns either a JSON string (passed through to the model verbatim) or
/// any other JSON value (serialized before it reaches the model). Errors are
/// propagated to the invoking framework unchanged.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn run(&self, method: &str, args: Value) -> Result<Value>;
}
