//! SirenApi integration tests: real HTTP against a local fake Siren server.

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use siren_agent_toolkit::adapters::OpenAiToolkit;
use siren_agent_toolkit::siren::USER_AGENT;
use siren_agent_toolkit::tools::Permissions;
use siren_agent_toolkit::types::ApiConfig;
use siren_agent_toolkit::{Error, RemoteClient, SirenApi, Toolkit};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    query: Option<String>,
    authorization: Option<String>,
    user_agent: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

async fn fake_siren(State(log): State<Log>, method: Method, uri: Uri, headers: HeaderMap, body: String) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        user_agent: header("user-agent"),
        body: body.clone(),
    });

    let path = uri.path();
    if path.ends_with("/users/missing") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"data": null, "error": {"errorCode": "NOT_FOUND", "message": "User not found"}})),
        )
            .into_response();
    }
    if path.ends_with("/users/slow") {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    if method == Method::DELETE {
        return StatusCode::NO_CONTENT.into_response();
    }
    if path.ends_with("/message-status/m-1") {
        return Json(json!({"data": {"status": "DELIVERED"}, "error": null})).into_response();
    }
    Json(json!({"data": {"echo": body}, "error": null})).into_response()
}

async fn start_fake_server() -> (String, Log) {
    let log: Log = Arc::default();
    let app = Router::new().fallback(fake_siren).with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}", addr), log)
}

fn api(base_url: &str) -> SirenApi {
    let mut config = ApiConfig::new("sk-test");
    config.base_url = Some(base_url.to_string());
    config.timeout = Duration::from_millis(500);
    SirenApi::new(&config).unwrap()
}

#[tokio::test]
async fn test_get_unwraps_data_and_sends_headers() {
    let (base, log) = start_fake_server().await;

    let value = api(&base)
        .run("get_message_status", json!({"message_id": "m-1"}))
        .await
        .unwrap();
    assert_eq!(value, json!({"status": "DELIVERED"}));

    let recorded = log.lock().unwrap()[0].clone();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/api/v1/public/message-status/m-1");
    assert_eq!(recorded.authorization.as_deref(), Some("Bearer sk-test"));
    assert_eq!(recorded.user_agent.as_deref(), Some(USER_AGENT));
}

#[tokio::test]
async fn test_post_sends_camel_case_body() {
    let (base, log) = start_fake_server().await;

    let value = api(&base)
        .run(
            "add_user",
            json!({"unique_id": "u-1", "first_name": "Ana", "properties": {"plan_tier": "pro"}}),
        )
        .await
        .unwrap();

    let expected = json!({"uniqueId": "u-1", "firstName": "Ana", "properties": {"plan_tier": "pro"}});
    assert_eq!(value, json!({"echo": expected}));

    let recorded = log.lock().unwrap()[0].clone();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/api/v1/public/users");
    assert_eq!(recorded.body, expected);
}

#[tokio::test]
async fn test_query_parameters() {
    let (base, log) = start_fake_server().await;

    assert_ok!(
        api(&base)
            .run("list_templates", json!({"tag_names": "promo", "size": 5}))
            .await
    );

    let recorded = log.lock().unwrap()[0].clone();
    assert_eq!(recorded.path, "/api/v1/public/template");
    assert_eq!(recorded.query.as_deref(), Some("tagNames=promo&size=5"));
}

#[tokio::test]
async fn test_empty_success_body() {
    let (base, _log) = start_fake_server().await;

    let value = api(&base)
        .run("delete_template", json!({"template_id": "t-1"}))
        .await
        .unwrap();
    assert_eq!(value, json!({"success": true, "status": 204}));
}

#[tokio::test]
async fn test_error_status_becomes_remote_call_error() {
    let (base, _log) = start_fake_server().await;

    let err = api(&base)
        .run("get_user", json!({"unique_id": "missing"}))
        .await
        .unwrap_err();

    match err {
        Error::RemoteCall(msg) => assert_eq!(msg, "404 Not Found: User not found"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let (base, _log) = start_fake_server().await;

    let err = assert_err!(api(&base).run("get_user", json!({"unique_id": "slow"})).await);
    assert!(matches!(err, Error::Http(_)), "{err}");
    assert!(err.is_remote());
}

#[tokio::test]
async fn test_unknown_method_never_hits_the_network() {
    let (base, log) = start_fake_server().await;

    let err = api(&base).run("launch_rocket", json!({})).await.unwrap_err();
    assert!(matches!(err, Error::ToolNotFound(_)));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_toolkit_end_to_end() {
    let (base, log) = start_fake_server().await;
    let client = Arc::new(api(&base));
    let toolkit: OpenAiToolkit = Toolkit::with_client(client, &Permissions::all());

    let text = toolkit
        .dispatch(
            "configure_inbound_webhooks",
            json!({"url": "https://hooks.example.com/siren"}),
        )
        .await
        .unwrap();

    let decoded: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        decoded,
        json!({"echo": {"inboundWebhookConfig": {"url": "https://hooks.example.com/siren"}}})
    );
    assert_eq!(log.lock().unwrap()[0].method, "PUT");
}
