//! MCP stdio server: line loop and method handlers.

use crate::adapters::mcp::{CallToolResult, McpToolkit};
use crate::mcp::protocol::{parse_line, Request, Response, PROTOCOL_VERSION};
use crate::types::{jsonrpc, Error, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Name reported in `initialize`.
pub const SERVER_NAME: &str = "siren-agent-toolkit";

/// MCP server over a filtered tool set.
#[derive(Debug)]
pub struct McpServer {
    toolkit: McpToolkit,
    cancel: CancellationToken,
}

impl McpServer {
    pub fn new(toolkit: McpToolkit) -> Self {
        Self {
            toolkit,
            cancel: CancellationToken::new(),
        }
    }

    /// Serve on the process stdin/stdout until EOF or shutdown.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, replying on `writer`.
    ///
    /// Returns on clean EOF or after [`McpServer::shutdown`].
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(tools = self.toolkit.selected().len(), "MCP server ready");
        let mut lines = reader.lines();

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("MCP server shutting down");
                    break;
                }
                line = lines.next_line() => {
                    let line = match line? {
                        Some(line) => line,
                        None => break, // clean EOF
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Some(response) = self.handle_line(&line).await {
                        write_message(&mut writer, &response).await?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Request graceful shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Handle one raw line. `None` means nothing is sent back.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        match parse_line(line) {
            Ok(request) => self.handle_request(request).await,
            Err(response) => {
                tracing::warn!(line_len = line.len(), "rejected malformed message");
                Some(response)
            }
        }
    }

    pub async fn handle_request(&self, request: Request) -> Option<Response> {
        tracing::debug!(method = %request.method, "MCP message");
        let Some(id) = request.id.clone() else {
            // Notifications: acknowledged silently, including unknown ones.
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => Response::success(id, self.initialize(&request.params)),
            "ping" => Response::success(id, json!({})),
            "tools/list" => Response::success(id, self.list_tools()),
            "tools/call" => match self.call_tool(&request.params).await {
                Ok(result) => Response::success(id, result),
                Err(e) => Response::failure(id, e.jsonrpc_code(), e.to_string()),
            },
            other => Response::failure(
                id,
                jsonrpc::METHOD_NOT_FOUND,
                format!("method not found: {}", other),
            ),
        };
        Some(response)
    }

    fn initialize(&self, params: &Value) -> Value {
        let version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(PROTOCOL_VERSION);
        json!({
            "protocolVersion": version,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn list_tools(&self) -> Value {
        json!({ "tools": self.toolkit.definitions() })
    }

    /// Unknown tools are a protocol error; failures of a known tool are
    /// reported in-band with `isError`.
    async fn call_tool(&self, params: &Value) -> Result<Value> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::validation("tools/call requires a string 'name'"))?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = match self.toolkit.dispatch(name, arguments).await {
            Ok(result) => result,
            Err(e @ Error::ToolNotFound(_)) => return Err(e),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call failed");
                CallToolResult::from_error(&e)
            }
        };
        Ok(serde_json::to_value(result)?)
    }
}

async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<()> {
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RemoteClient;
    use crate::toolkit::Toolkit;
    use crate::tools::{Action, Category, Permissions};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl RemoteClient for Echo {
        async fn run(&self, method: &str, _args: Value) -> Result<Value> {
            if method == "delete_user" {
                return Err(Error::remote_call("404 Not Found: user missing"));
            }
            Ok(json!({"ok": method}))
        }
    }

    fn server() -> McpServer {
        let permissions = Permissions::new()
            .allow(Category::Users, Action::Read)
            .allow(Category::Users, Action::Delete);
        McpServer::new(Toolkit::with_client(Arc::new(Echo), &permissions))
    }

    async fn call(server: &McpServer, line: &str) -> Value {
        let response = server.handle_line(line).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_echoes_version() {
        let reply = call(
            &server(),
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
        )
        .await;
        assert_eq!(reply["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(reply["result"]["serverInfo"]["name"], SERVER_NAME);
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let s = server();
        assert!(s
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .is_none());
        assert!(s
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/cancelled"}"#)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let reply = call(&server(), r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
        let names: Vec<&str> = reply["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["delete_user", "get_user", "list_users"]);
    }

    #[tokio::test]
    async fn test_tools_call_error_kinds() {
        let s = server();

        let filtered = call(
            &s,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"add_user","arguments":{"unique_id":"u"}}}"#,
        )
        .await;
        assert_eq!(filtered["error"]["code"], jsonrpc::INVALID_PARAMS);

        let invalid = call(
            &s,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"get_user","arguments":{}}}"#,
        )
        .await;
        assert_eq!(invalid["result"]["isError"], true);

        let remote = call(
            &s,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"delete_user","arguments":{"unique_id":"u"}}}"#,
        )
        .await;
        assert_eq!(remote["result"]["isError"], true);
        assert!(remote["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("user missing"));
    }

    #[tokio::test]
    async fn test_unknown_method_and_parse_error() {
        let s = server();
        let unknown = call(&s, r#"{"jsonrpc":"2.0","id":6,"method":"resources/list"}"#).await;
        assert_eq!(unknown["error"]["code"], jsonrpc::METHOD_NOT_FOUND);

        let malformed = call(&s, "not json").await;
        assert_eq!(malformed["error"]["code"], jsonrpc::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_serve_until_eof() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"get_user","arguments":{"unique_id":"u-1"}}}"#,
            "\n",
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
        assert_eq!(lines[1]["result"]["content"][0]["text"], r#"{"ok":"get_user"}"#);
    }

    #[tokio::test]
    async fn test_shutdown_stops_loop() {
        let s = server();
        s.shutdown();
        let (_client, server_end) = tokio::io::duplex(64);
        let (read, write) = tokio::io::split(server_end);
        s.serve(BufReader::new(read), write).await.unwrap();
    }
}
