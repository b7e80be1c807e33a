//! Model Context Protocol tool shape.
//!
//! Tools list as `{name, description, inputSchema}`; calls return a text
//! content array. Tool-level failures are reported in-band with
//! `isError: true` so the model can see them, see [`CallToolResult::from_error`].

use crate::toolkit::{ToolAdapter, Toolkit};
use crate::tools::ToolBinding;
use crate::types::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolDefinition {
    pub name: String,
    /// Human title, MCP 2025-06 `title` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(default)]
    pub is_error: bool,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// In-band failure report for a tool that exists but could not complete.
    pub fn from_error(err: &Error) -> Self {
        Self {
            content: vec![Content::Text {
                text: err.to_string(),
            }],
            is_error: true,
        }
    }

    /// Concatenated text of every content block.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                Content::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone)]
pub struct McpTool {
    binding: ToolBinding,
}

#[async_trait]
impl ToolAdapter for McpTool {
    type Definition = McpToolDefinition;
    type Output = CallToolResult;

    fn from_binding(binding: ToolBinding) -> Self {
        Self { binding }
    }

    fn binding(&self) -> &ToolBinding {
        &self.binding
    }

    fn definition(&self) -> McpToolDefinition {
        let descriptor = self.binding.descriptor();
        McpToolDefinition {
            name: descriptor.method.to_string(),
            title: Some(descriptor.title.to_string()),
            description: descriptor.description.to_string(),
            input_schema: descriptor.input_schema(),
        }
    }

    async fn invoke(&self, args: Value) -> Result<CallToolResult> {
        let text = self.binding.execute(args).await?;
        Ok(CallToolResult::text(text))
    }
}

pub type McpToolkit = Toolkit<McpTool>;
