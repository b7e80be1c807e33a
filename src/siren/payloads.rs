//! Siren request bodies.
//!
//! Built from the validated argument structs; field names follow the API's
//! camelCase. Caller-supplied objects (template variables, user properties,
//! workflow data) are passed through untouched.

use crate::tools::params::{
    AddUser, ChatButton, ConfigureInboundWebhooks, ConfigureNotificationWebhooks, CreateTemplate,
    EndChat, RecipientType, ScheduleWorkflow, SendAwesomeTemplate, SendMessage, StartChat,
    TemplateVariable, TriggerWorkflow, TriggerWorkflowBulk, UpdateTemplate, UpdateUser,
};
use serde::Serialize;
use serde_json::{Map, Value};

type Object = Map<String, Value>;

// =============================================================================
// Messaging
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipient {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecipientType>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub channel: String,
    pub recipient: Recipient,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Object>,
}

impl From<SendMessage> for SendMessageRequest {
    fn from(p: SendMessage) -> Self {
        Self {
            channel: p.channel,
            recipient: Recipient {
                kind: Some(p.recipient_type),
                value: p.recipient_value,
            },
            body: p.body,
            template: p.template_name.map(|name| TemplateRef { name }),
            template_variables: p.template_variables,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderIntegration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAwesomeRequest {
    pub channel: String,
    pub recipient: Recipient,
    pub template_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Object>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_integration: Option<ProviderIntegration>,
}

impl From<SendAwesomeTemplate> for SendAwesomeRequest {
    fn from(p: SendAwesomeTemplate) -> Self {
        let provider_integration = match (p.provider_name, p.provider_code) {
            (None, None) => None,
            (name, code) => Some(ProviderIntegration { name, code }),
        };
        Self {
            channel: p.channel,
            recipient: Recipient {
                kind: None,
                value: p.recipient_value,
            },
            template_identifier: p.template_identifier,
            template_variables: p.template_variables,
            provider_integration,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariableRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl From<TemplateVariable> for TemplateVariableRequest {
    fn from(v: TemplateVariable) -> Self {
        Self {
            name: v.name,
            default_value: v.default_value,
        }
    }
}

/// Body of both template create and update; the id travels in the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<TemplateVariableRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Object>,
}

fn variables(vars: Option<Vec<TemplateVariable>>) -> Option<Vec<TemplateVariableRequest>> {
    vars.map(|vars| vars.into_iter().map(Into::into).collect())
}

impl From<CreateTemplate> for TemplateRequest {
    fn from(p: CreateTemplate) -> Self {
        Self {
            name: Some(p.name),
            description: p.description,
            tag_names: p.tags,
            variables: variables(p.variables),
            configurations: p.configurations,
        }
    }
}

impl From<UpdateTemplate> for TemplateRequest {
    fn from(p: UpdateTemplate) -> Self {
        Self {
            name: p.name,
            description: p.description,
            tag_names: p.tags,
            variables: variables(p.variables),
            configurations: p.configurations,
        }
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub unique_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Object>,
}

impl From<AddUser> for UserRequest {
    fn from(p: AddUser) -> Self {
        Self {
            unique_id: p.unique_id,
            email: p.email,
            phone: p.phone,
            first_name: p.first_name,
            last_name: p.last_name,
            properties: p.properties,
        }
    }
}

impl From<UpdateUser> for UserRequest {
    fn from(p: UpdateUser) -> Self {
        Self {
            unique_id: p.unique_id,
            email: p.email,
            phone: p.phone,
            first_name: p.first_name,
            last_name: p.last_name,
            properties: p.properties,
        }
    }
}

// =============================================================================
// Workflows
// =============================================================================

/// Trigger, bulk trigger and schedule share one shape; the per-recipient
/// list is always sent as `notify`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    pub workflow_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Object>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<Vec<Object>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
}

impl From<TriggerWorkflow> for WorkflowRequest {
    fn from(p: TriggerWorkflow) -> Self {
        Self {
            workflow_name: p.workflow_name,
            data: Some(p.data),
            notify: p.notification_payloads,
            schedule_at: None,
            recurring: None,
        }
    }
}

impl From<TriggerWorkflowBulk> for WorkflowRequest {
    fn from(p: TriggerWorkflowBulk) -> Self {
        Self {
            workflow_name: p.workflow_name,
            data: p.data,
            notify: Some(p.triggers),
            schedule_at: None,
            recurring: None,
        }
    }
}

impl From<ScheduleWorkflow> for WorkflowRequest {
    fn from(p: ScheduleWorkflow) -> Self {
        Self {
            workflow_name: p.workflow_name,
            data: Some(p.data),
            notify: p.notification_payloads,
            schedule_at: Some(p.schedule_at),
            recurring: p.recurring,
        }
    }
}

// =============================================================================
// Webhooks
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Exactly one of the two configs is set per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_config: Option<WebhookConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_webhook_config: Option<WebhookConfig>,
}

impl From<ConfigureNotificationWebhooks> for WebhookRequest {
    fn from(p: ConfigureNotificationWebhooks) -> Self {
        Self {
            webhook_config: Some(WebhookConfig {
                url: p.url,
                events: p.events,
                secret: p.secret,
            }),
            inbound_webhook_config: None,
        }
    }
}

impl From<ConfigureInboundWebhooks> for WebhookRequest {
    fn from(p: ConfigureInboundWebhooks) -> Self {
        Self {
            webhook_config: None,
            inbound_webhook_config: Some(WebhookConfig {
                url: p.url,
                events: p.events,
                secret: p.secret,
            }),
        }
    }
}

// =============================================================================
// Chat
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartChatRequest {
    pub chat_node_id: String,
    pub workflow_execution_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Object>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ChatButton>>,
}

impl From<StartChat> for StartChatRequest {
    fn from(p: StartChat) -> Self {
        Self {
            chat_node_id: p.chat_node_id,
            workflow_execution_id: p.workflow_execution_id,
            template_id: p.template_id,
            template_variables: p.template_variables,
            body: p.body,
            subject: p.subject,
            buttons: p.buttons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndChatRequest {
    pub chat_node_id: String,
    pub workflow_execution_id: String,
}

impl From<EndChat> for EndChatRequest {
    fn from(p: EndChat) -> Self {
        Self {
            chat_node_id: p.chat_node_id,
            workflow_execution_id: p.workflow_execution_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_awesome_provider_integration_only_when_given() {
        let args: SendAwesomeTemplate = serde_json::from_value(json!({
            "recipient_value": "U123",
            "channel": "SLACK",
            "template_identifier": "awesome/welcome",
        }))
        .unwrap();
        let body = serde_json::to_value(SendAwesomeRequest::from(args.clone())).unwrap();
        assert_eq!(
            body,
            json!({
                "channel": "SLACK",
                "recipient": {"value": "U123"},
                "templateIdentifier": "awesome/welcome",
            })
        );

        let with_code = SendAwesomeTemplate {
            provider_code: Some("SLACK_BOT".into()),
            ..args
        };
        let body = serde_json::to_value(SendAwesomeRequest::from(with_code)).unwrap();
        assert_eq!(body["providerIntegration"], json!({"code": "SLACK_BOT"}));
    }

    #[test]
    fn test_start_chat_body() {
        let args: StartChat = serde_json::from_value(json!({
            "chat_node_id": "n-1",
            "workflow_execution_id": "e-1",
            "body": "Approve?",
            "buttons": [{"text": "Yes", "value": "yes"}],
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(StartChatRequest::from(args)).unwrap(),
            json!({
                "chatNodeId": "n-1",
                "workflowExecutionId": "e-1",
                "body": "Approve?",
                "buttons": [{"text": "Yes", "value": "yes"}],
            })
        );
    }

    #[test]
    fn test_caller_objects_keep_their_keys() {
        let args: AddUser = serde_json::from_value(json!({
            "unique_id": "u-1",
            "properties": {"plan_tier": "pro"},
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(UserRequest::from(args)).unwrap(),
            json!({"uniqueId": "u-1", "properties": {"plan_tier": "pro"}})
        );
    }
}
