//! Tool binding: one registry entry joined to one remote client.
//!
//! Every framework adapter wraps a `ToolBinding` and delegates to
//! [`ToolBinding::execute`], so validation, the remote call and output
//! normalization behave identically across frameworks.

use crate::client::RemoteClient;
use crate::tools::registry::ToolDescriptor;
use crate::types::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

/// A selected tool bound to the shared remote client.
#[derive(Clone)]
pub struct ToolBinding {
    descriptor: &'static ToolDescriptor,
    client: Arc<dyn RemoteClient>,
}

impl fmt::Debug for ToolBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolBinding")
            .field("method", &self.descriptor.method)
            .finish_non_exhaustive()
    }
}

impl ToolBinding {
    pub fn new(descriptor: &'static ToolDescriptor, client: Arc<dyn RemoteClient>) -> Self {
        Self { descriptor, client }
    }

    pub fn descriptor(&self) -> &'static ToolDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.method
    }

    pub fn description(&self) -> &'static str {
        self.descriptor.description
    }

    pub fn input_schema(&self) -> Value {
        self.descriptor.input_schema()
    }

    /// Validate `args`, run the remote call, and normalize the result to text.
    ///
    /// Validation failures return before the remote client is touched.
    pub async fn execute(&self, args: Value) -> Result<String> {
        let call_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("tool_call", tool = self.name(), %call_id);

        async move {
            let validated = self.descriptor.params.validate(args).map_err(|e| {
                tracing::debug!(error = %e, "arguments rejected");
                e
            })?;

            let output = self.client.run(self.descriptor.method, validated).await?;
            let text = normalize_output(output)?;
            tracing::debug!(bytes = text.len(), "tool call completed");
            Ok(text)
        }
        .instrument(span)
        .await
    }
}

/// Strings pass through untouched; anything else becomes compact JSON text.
pub fn normalize_output(value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        other => Ok(serde_json::to_string(&other)?),
    }
}
