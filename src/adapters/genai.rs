//! Adapter for the `genai` multi-provider client.

use crate::toolkit::{ToolAdapter, Toolkit};
use crate::tools::ToolBinding;
use crate::types::Result;
use async_trait::async_trait;
use genai::chat::{Tool, ToolCall, ToolResponse};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct GenaiTool {
    binding: ToolBinding,
}

#[async_trait]
impl ToolAdapter for GenaiTool {
    type Definition = Tool;
    type Output = String;

    fn from_binding(binding: ToolBinding) -> Self {
        Self { binding }
    }

    fn binding(&self) -> &ToolBinding {
        &self.binding
    }

    fn definition(&self) -> Tool {
        Tool::new(self.binding.name())
            .with_description(self.binding.description())
            .with_schema(self.binding.input_schema())
    }

    async fn invoke(&self, args: Value) -> Result<String> {
        self.binding.execute(args).await
    }
}

pub type GenaiToolkit = Toolkit<GenaiTool>;

impl Toolkit<GenaiTool> {
    /// Answer one `genai` tool call.
    pub async fn handle_tool_call(&self, call: &ToolCall) -> Result<ToolResponse> {
        let content = self.dispatch(&call.fn_name, call.fn_arguments.clone()).await?;
        Ok(ToolResponse::new(call.call_id.clone(), content))
    }

    /// Answer every tool call of one response concurrently, in order.
    pub async fn handle_tool_calls(&self, calls: &[ToolCall]) -> Vec<Result<ToolResponse>> {
        futures::future::join_all(calls.iter().map(|call| self.handle_tool_call(call))).await
    }
}
