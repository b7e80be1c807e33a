//! Framework adapters.
//!
//! One small type per agent-framework calling convention, each wrapping a
//! [`ToolBinding`](crate::tools::ToolBinding) and implementing
//! [`ToolAdapter`](crate::toolkit::ToolAdapter).
//!
//! | Module | Registers as | Returns |
//! |---|---|---|
//! | [`openai`] | chat-completions function tool | `role: "tool"` message |
//! | [`genai`] | `genai::chat::Tool` | `genai::chat::ToolResponse` |
//! | [`mcp`] | MCP tool (`inputSchema`) | MCP `CallToolResult` |
//! | [`structured`] | `args_schema` tool with `run`/`arun` | text |
//! | [`answer`] | `fn_schema` tool | `{"final_answer": text}` |

pub mod answer;
pub mod genai;
pub mod mcp;
pub mod openai;
pub mod structured;

pub use answer::{AnswerTool, AnswerToolkit, FinalAnswer};
pub use genai::{GenaiTool, GenaiToolkit};
pub use mcp::{CallToolResult, McpTool, McpToolDefinition, McpToolkit};
pub use openai::{OpenAiTool, OpenAiToolkit};
pub use structured::{StructuredTool, StructuredToolkit};
