//! Tool method → Siren REST route.
//!
//! Arguments are parsed into their typed argument struct, then turned into
//! the verb, path segments (encoded by the client), query pairs and a typed
//! camelCase body from [`payloads`](crate::siren::payloads).

use crate::siren::payloads::{
    EndChatRequest, SendAwesomeRequest, SendMessageRequest, StartChatRequest, TemplateRequest,
    UserRequest, WebhookRequest, WorkflowRequest,
};
use crate::tools::params::*;
use crate::types::{Error, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

const PUBLIC_V1: [&str; 3] = ["api", "v1", "public"];
const WORKFLOWS_V2: [&str; 3] = ["api", "v2", "workflows"];

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub verb: Method,
    /// Unencoded path segments below the base URL.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Route {
    fn new(verb: Method, prefix: &[&str], rest: &[&str]) -> Self {
        Self {
            verb,
            segments: prefix.iter().chain(rest).map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    fn with_body<B: Serialize>(mut self, body: B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Append the pairs that are set, in the given order.
    fn with_query(mut self, pairs: Vec<(&str, Option<String>)>) -> Self {
        for (key, value) in pairs {
            if let Some(value) = value {
                self.query.push((key.to_string(), value));
            }
        }
        self
    }

    /// Path as sent, before percent-encoding.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Parse raw arguments into the tool's argument struct.
fn parse<P: DeserializeOwned>(method: &str, args: &Value) -> Result<P> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        Value::Object(_) => args.clone(),
        other => {
            return Err(Error::validation(format!(
                "{}: arguments must be an object, got {}",
                method, other
            )))
        }
    };
    serde_json::from_value(args).map_err(|e| Error::validation(format!("{}: {}", method, e)))
}

/// Resolve the route for one tool call.
pub fn route(method: &str, args: &Value) -> Result<Route> {
    let route = match method {
        // Messaging
        "send_message" => {
            let p: SendMessage = parse(method, args)?;
            Route::new(Method::POST, &PUBLIC_V1, &["send-messages"])
                .with_body(SendMessageRequest::from(p))?
        }
        "send_awesome_template" => {
            let p: SendAwesomeTemplate = parse(method, args)?;
            Route::new(Method::POST, &PUBLIC_V1, &["send-awesome-messages"])
                .with_body(SendAwesomeRequest::from(p))?
        }
        "get_message_status" => {
            let p: GetMessageStatus = parse(method, args)?;
            Route::new(Method::GET, &PUBLIC_V1, &["message-status", p.message_id.as_str()])
        }
        "get_message_replies" => {
            let p: GetMessageReplies = parse(method, args)?;
            Route::new(Method::GET, &PUBLIC_V1, &["get-reply", p.message_id.as_str()])
        }

        // Templates
        "list_templates" => {
            let p: ListTemplates = parse(method, args)?;
            Route::new(Method::GET, &PUBLIC_V1, &["template"]).with_query(vec![
                ("tagNames", p.tag_names),
                ("search", p.search),
                ("sort", p.sort),
                ("page", p.page.map(|v| v.to_string())),
                ("size", p.size.map(|v| v.to_string())),
            ])
        }
        "create_template" => {
            let p: CreateTemplate = parse(method, args)?;
            Route::new(Method::POST, &PUBLIC_V1, &["template"])
                .with_body(TemplateRequest::from(p))?
        }
        "update_template" => {
            let p: UpdateTemplate = parse(method, args)?;
            let id = p.template_id.clone();
            Route::new(Method::PUT, &PUBLIC_V1, &["template", id.as_str()])
                .with_body(TemplateRequest::from(p))?
        }
        "delete_template" => {
            let p: DeleteTemplate = parse(method, args)?;
            Route::new(Method::DELETE, &PUBLIC_V1, &["template", p.template_id.as_str()])
        }
        "publish_template" => {
            let p: PublishTemplate = parse(method, args)?;
            Route::new(Method::PATCH, &PUBLIC_V1, &["template", p.template_id.as_str(), "publish"])
        }

        // Users
        "add_user" => {
            let p: AddUser = parse(method, args)?;
            Route::new(Method::POST, &PUBLIC_V1, &["users"]).with_body(UserRequest::from(p))?
        }
        "update_user" => {
            let p: UpdateUser = parse(method, args)?;
            let id = p.unique_id.clone();
            Route::new(Method::PUT, &PUBLIC_V1, &["users", id.as_str()])
                .with_body(UserRequest::from(p))?
        }
        "delete_user" => {
            let p: DeleteUser = parse(method, args)?;
            Route::new(Method::DELETE, &PUBLIC_V1, &["users", p.unique_id.as_str()])
        }
        "get_user" => {
            let p: GetUser = parse(method, args)?;
            Route::new(Method::GET, &PUBLIC_V1, &["users", p.unique_id.as_str()])
        }
        "list_users" => {
            let p: ListUsers = parse(method, args)?;
            Route::new(Method::GET, &PUBLIC_V1, &["users"]).with_query(vec![
                ("page", p.page.map(|v| v.to_string())),
                ("size", p.size.map(|v| v.to_string())),
                ("search", p.search),
            ])
        }

        // Workflows
        "trigger_workflow" => {
            let p: TriggerWorkflow = parse(method, args)?;
            Route::new(Method::POST, &WORKFLOWS_V2, &["trigger"])
                .with_body(WorkflowRequest::from(p))?
        }
        "trigger_workflow_bulk" => {
            let p: TriggerWorkflowBulk = parse(method, args)?;
            Route::new(Method::POST, &WORKFLOWS_V2, &["trigger", "bulk"])
                .with_body(WorkflowRequest::from(p))?
        }
        "schedule_workflow" => {
            let p: ScheduleWorkflow = parse(method, args)?;
            Route::new(Method::POST, &PUBLIC_V1, &["schedules"])
                .with_body(WorkflowRequest::from(p))?
        }

        // Webhooks
        "configure_notification_webhooks" => {
            let p: ConfigureNotificationWebhooks = parse(method, args)?;
            Route::new(Method::PUT, &PUBLIC_V1, &["webhooks"]).with_body(WebhookRequest::from(p))?
        }
        "configure_inbound_webhooks" => {
            let p: ConfigureInboundWebhooks = parse(method, args)?;
            Route::new(Method::PUT, &PUBLIC_V1, &["webhooks"]).with_body(WebhookRequest::from(p))?
        }

        // Chat
        "start_chat" => {
            let p: StartChat = parse(method, args)?;
            Route::new(Method::POST, &PUBLIC_V1, &["chat", "message"])
                .with_body(StartChatRequest::from(p))?
        }
        "end_chat" => {
            let p: EndChat = parse(method, args)?;
            Route::new(Method::POST, &PUBLIC_V1, &["chat", "end"])
                .with_body(EndChatRequest::from(p))?
        }

        other => return Err(Error::tool_not_found(format!("no Siren route for {}", other))),
    };

    Ok(route)
}
