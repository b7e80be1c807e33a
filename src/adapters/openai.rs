//! OpenAI chat-completions function calling.
//!
//! Tools register as `{"type": "function", "function": {...}}`. The model
//! answers with `tool_calls` whose `arguments` is a JSON-encoded string; each
//! call is answered with a `role: "tool"` message.

use crate::toolkit::{ToolAdapter, Toolkit};
use crate::tools::ToolBinding;
use crate::types::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// One entry of `choices[].message.tool_calls`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object, exactly as the model produced it.
    #[serde(default)]
    pub arguments: String,
}

/// Reply message appended to the conversation after a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub role: String,
    pub tool_call_id: String,
    pub content: String,
}

fn function_kind() -> String {
    "function".to_string()
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: function_kind(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Decode the argument string. Blank means no arguments.
    pub fn parsed_arguments(&self) -> Result<Value> {
        let raw = self.function.arguments.trim();
        if raw.is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(raw).map_err(|e| {
            Error::validation(format!(
                "malformed arguments for {}: {}",
                self.function.name, e
            ))
        })
    }
}

// =============================================================================
// Adapter
// =============================================================================

#[derive(Debug, Clone)]
pub struct OpenAiTool {
    binding: ToolBinding,
}

#[async_trait]
impl ToolAdapter for OpenAiTool {
    type Definition = FunctionTool;
    type Output = String;

    fn from_binding(binding: ToolBinding) -> Self {
        Self { binding }
    }

    fn binding(&self) -> &ToolBinding {
        &self.binding
    }

    fn definition(&self) -> FunctionTool {
        FunctionTool {
            kind: function_kind(),
            function: FunctionDefinition {
                name: self.binding.name().to_string(),
                description: self.binding.description().to_string(),
                parameters: self.binding.input_schema(),
            },
        }
    }

    async fn invoke(&self, args: Value) -> Result<String> {
        self.binding.execute(args).await
    }
}

pub type OpenAiToolkit = Toolkit<OpenAiTool>;

impl Toolkit<OpenAiTool> {
    /// Run one model tool call and build the reply message.
    pub async fn handle_tool_call(&self, call: &ToolCall) -> Result<ToolMessage> {
        let args = call.parsed_arguments()?;
        let content = self.dispatch(&call.function.name, args).await?;
        Ok(ToolMessage {
            role: "tool".to_string(),
            tool_call_id: call.id.clone(),
            content,
        })
    }

    /// Run every tool call of one assistant turn concurrently.
    ///
    /// Results keep the order of `calls`.
    pub async fn handle_tool_calls(&self, calls: &[ToolCall]) -> Vec<Result<ToolMessage>> {
        futures::future::join_all(calls.iter().map(|call| self.handle_tool_call(call))).await
    }
}
