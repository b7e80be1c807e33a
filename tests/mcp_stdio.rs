//! MCP integration tests: a full client session over an in-memory pipe.

use async_trait::async_trait;
use serde_json::{json, Value};
use siren_agent_toolkit::adapters::McpToolkit;
use siren_agent_toolkit::mcp::McpServer;
use siren_agent_toolkit::tools::Permissions;
use siren_agent_toolkit::types::jsonrpc;
use siren_agent_toolkit::{RemoteClient, Result, Toolkit};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};

struct FakeSiren;

#[async_trait]
impl RemoteClient for FakeSiren {
    async fn run(&self, method: &str, args: Value) -> Result<Value> {
        Ok(json!({"method": method, "received": args}))
    }
}

struct Client {
    writer: tokio::io::WriteHalf<DuplexStream>,
    lines: Lines<BufReader<tokio::io::ReadHalf<DuplexStream>>>,
}

impl Client {
    async fn send(&mut self, message: Value) {
        let mut line = serde_json::to_vec(&message).unwrap();
        line.push(b'\n');
        self.writer.write_all(&line).await.unwrap();
    }

    async fn recv(&mut self) -> Value {
        let line = self.lines.next_line().await.unwrap().unwrap();
        serde_json::from_str(&line).unwrap()
    }

    async fn request(&mut self, id: u64, method: &str, params: Value) -> Value {
        self.send(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
            .await;
        let reply = self.recv().await;
        assert_eq!(reply["id"], id);
        reply
    }
}

/// Helper: spin up an McpServer on one end of a duplex pipe.
fn start_session(permissions: Permissions) -> (Client, tokio::task::JoinHandle<Result<()>>) {
    let (client_end, server_end) = tokio::io::duplex(64 * 1024);
    let toolkit: McpToolkit = Toolkit::with_client(Arc::new(FakeSiren), &permissions);

    let handle = tokio::spawn(async move {
        let (read, write) = tokio::io::split(server_end);
        McpServer::new(toolkit).serve(BufReader::new(read), write).await
    });

    let (read, writer) = tokio::io::split(client_end);
    let client = Client {
        writer,
        lines: BufReader::new(read).lines(),
    };
    (client, handle)
}

#[tokio::test]
async fn test_full_session() {
    let permissions = Permissions::from_selectors(["templates.read", "templates.create"]).unwrap();
    let (mut client, handle) = start_session(permissions);

    let init = client
        .request(1, "initialize", json!({"protocolVersion": "2024-11-05", "capabilities": {}}))
        .await;
    assert_eq!(init["result"]["capabilities"]["tools"]["listChanged"], false);

    client
        .send(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .await;

    let list = client.request(2, "tools/list", json!({})).await;
    let tools = list["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["list_templates", "create_template"]);
    assert_eq!(tools[1]["inputSchema"]["required"], json!(["name"]));

    let call = client
        .request(
            3,
            "tools/call",
            json!({"name": "create_template", "arguments": {"name": "welcome", "tags": ["onboarding"]}}),
        )
        .await;
    assert_eq!(call["result"]["isError"], false);
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    let decoded: Value = serde_json::from_str(text).unwrap();
    assert_eq!(
        decoded,
        json!({"method": "create_template", "received": {"name": "welcome", "tags": ["onboarding"]}})
    );

    let pong = client.request(4, "ping", Value::Null).await;
    assert_eq!(pong["result"], json!({}));

    drop(client);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_protocol_errors() {
    let (mut client, _handle) = start_session(Permissions::all());

    client.writer.write_all(b"{this is not json}\n").await.unwrap();
    let parse = client.recv().await;
    assert_eq!(parse["error"]["code"], jsonrpc::PARSE_ERROR);
    assert_eq!(parse["id"], Value::Null);

    let unknown = client.request(7, "prompts/list", json!({})).await;
    assert_eq!(unknown["error"]["code"], jsonrpc::METHOD_NOT_FOUND);

    let missing = client
        .request(8, "tools/call", json!({"name": "no_such_tool", "arguments": {}}))
        .await;
    assert_eq!(missing["error"]["code"], jsonrpc::INVALID_PARAMS);

    let invalid = client
        .request(9, "tools/call", json!({"name": "get_user", "arguments": {"unique_id": 7}}))
        .await;
    assert_eq!(invalid["result"]["isError"], true);
}

#[tokio::test]
async fn test_empty_selection_lists_no_tools() {
    let (mut client, _handle) = start_session(Permissions::new());
    let list = client.request(1, "tools/list", json!({})).await;
    assert_eq!(list["result"]["tools"], json!([]));
}
