//! Structured tools with a synchronous and an asynchronous entry point.
//!
//! Mirrors the `args_schema` + `run`/`arun` convention of LangChain and
//! CrewAI style frameworks. `arun` is the real implementation; `run` drives
//! it to completion on a private current-thread runtime.

use crate::toolkit::{ToolAdapter, Toolkit};
use crate::tools::ToolBinding;
use crate::types::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredToolSpec {
    pub name: String,
    pub description: String,
    pub args_schema: Value,
}

#[derive(Debug, Clone)]
pub struct StructuredTool {
    binding: ToolBinding,
}

impl StructuredTool {
    pub async fn arun(&self, args: Value) -> Result<String> {
        self.binding.execute(args).await
    }

    /// Blocking variant for synchronous agent loops.
    ///
    /// Must not be called from inside a Tokio runtime; use [`Self::arun`]
    /// there instead.
    pub fn run(&self, args: Value) -> Result<String> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(Error::internal(format!(
                "{}: run() called inside an async runtime, use arun()",
                self.binding.name()
            )));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.arun(args))
    }
}

#[async_trait]
impl ToolAdapter for StructuredTool {
    type Definition = StructuredToolSpec;
    type Output = String;

    fn from_binding(binding: ToolBinding) -> Self {
        Self { binding }
    }

    fn binding(&self) -> &ToolBinding {
        &self.binding
    }

    fn definition(&self) -> StructuredToolSpec {
        StructuredToolSpec {
            name: self.binding.name().to_string(),
            description: self.binding.description().to_string(),
            args_schema: self.binding.input_schema(),
        }
    }

    async fn invoke(&self, args: Value) -> Result<String> {
        self.arun(args).await
    }
}

pub type StructuredToolkit = Toolkit<StructuredTool>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RemoteClient;
    use crate::tools::{Action, Category, Permissions};
    use serde_json::json;
    use std::sync::Arc;

    struct UserClient;

    #[async_trait]
    impl RemoteClient for UserClient {
        async fn run(&self, _method: &str, args: Value) -> Result<Value> {
            Ok(json!({"uniqueId": args["unique_id"]}))
        }
    }

    fn tool() -> StructuredTool {
        let permissions = Permissions::new().allow(Category::Users, Action::Read);
        let toolkit: StructuredToolkit = Toolkit::with_client(Arc::new(UserClient), &permissions);
        toolkit.get_tool("get_user").unwrap()
    }

    #[test]
    fn test_sync_run_outside_runtime() {
        let text = tool().run(json!({"unique_id": "u-9"})).unwrap();
        assert_eq!(text, r#"{"uniqueId":"u-9"}"#);
    }

    #[test]
    fn test_sync_run_validation_error() {
        let err = tool().run(json!({"unique_id": 9})).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_sync_run_inside_runtime_refuses() {
        let err = tool().run(json!({"unique_id": "u-9"})).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[tokio::test]
    async fn test_arun_matches_run() {
        let text = tool().arun(json!({"unique_id": "u-9"})).await.unwrap();
        assert_eq!(text, r#"{"uniqueId":"u-9"}"#);
    }

    #[test]
    fn test_definition_has_args_schema() {
        let definition = tool().definition();
        assert_eq!(definition.name, "get_user");
        assert_eq!(definition.args_schema["properties"]["unique_id"]["type"], "string");
    }
}
