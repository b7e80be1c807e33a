//! Argument structs for every Siren tool.
//!
//! Field doc comments become the `description` of each property in the
//! declared JSON Schema, so they are written for the model, not for Rust
//! readers.

use crate::tools::schema::ToolParams;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

// =============================================================================
// Messaging
// =============================================================================

/// How `recipient_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    UserId,
    Direct,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SendMessage {
    /// The type of recipient
    pub recipient_type: RecipientType,
    /// The identifier for the recipient (e.g., Slack user ID, email address)
    pub recipient_value: String,
    /// The channel to send the message through (e.g., 'SLACK', 'EMAIL')
    pub channel: String,
    /// Message body text (required if no template)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Template name (required if no body)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    /// Template variables for template-based messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Object>,
}

impl ToolParams for SendMessage {
    fn check(&self) -> Result<(), String> {
        if self.body.is_none() && self.template_name.is_none() {
            return Err("either body or template_name must be provided".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SendAwesomeTemplate {
    /// Identifier for the recipient (e.g., Slack user ID, email address)
    pub recipient_value: String,
    /// The channel to send the message through (e.g., 'SLACK', 'EMAIL')
    pub channel: String,
    /// Awesome template path/identifier
    pub template_identifier: String,
    /// Variables for the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Object>,
    /// Provider integration name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    /// Provider integration code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_code: Option<String>,
}

impl ToolParams for SendAwesomeTemplate {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetMessageStatus {
    /// The ID of the message for which to retrieve the status
    pub message_id: String,
}

impl ToolParams for GetMessageStatus {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetMessageReplies {
    /// The ID of the message for which to retrieve replies
    pub message_id: String,
}

impl ToolParams for GetMessageReplies {}

// =============================================================================
// Templates
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListTemplates {
    /// Filter by tag names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_names: Option<String>,
    /// Search by field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Sort by field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl ToolParams for ListTemplates {}

/// A template variable with an optional default value.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TemplateVariable {
    /// Variable name
    pub name: String,
    /// Value used when the caller supplies none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTemplate {
    /// The name of the template
    pub name: String,
    /// The description of the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags associated with the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Template variables with optional default values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<TemplateVariable>>,
    /// Channel-specific template configurations, keyed by channel (e.g. 'EMAIL', 'SMS')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Object>,
}

impl ToolParams for CreateTemplate {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateTemplate {
    /// The ID of the template to update
    pub template_id: String,
    /// The name of the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The description of the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags associated with the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Template variables with optional default values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<TemplateVariable>>,
    /// Channel-specific template configurations, keyed by channel (e.g. 'EMAIL', 'SMS')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Object>,
}

impl ToolParams for UpdateTemplate {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeleteTemplate {
    /// The ID of the template to delete
    pub template_id: String,
}

impl ToolParams for DeleteTemplate {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PublishTemplate {
    /// The ID of the template to publish
    pub template_id: String,
}

impl ToolParams for PublishTemplate {}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddUser {
    /// Unique identifier for the user
    pub unique_id: String,
    /// User email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// User phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// User first name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// User last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Additional user properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Object>,
}

impl ToolParams for AddUser {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUser {
    /// Unique identifier for the user
    pub unique_id: String,
    /// User email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// User phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// User first name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// User last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Additional user properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Object>,
}

impl ToolParams for UpdateUser {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeleteUser {
    /// Unique identifier for the user to delete
    pub unique_id: String,
}

impl ToolParams for DeleteUser {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetUser {
    /// Unique identifier for the user to retrieve
    pub unique_id: String,
}

impl ToolParams for GetUser {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListUsers {
    /// Page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Search term
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ToolParams for ListUsers {}

// =============================================================================
// Workflows
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TriggerWorkflow {
    /// Name of the workflow to trigger
    pub workflow_name: String,
    /// Data to pass to the workflow
    pub data: Object,
    /// Optional notification payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_payloads: Option<Vec<Object>>,
}

impl ToolParams for TriggerWorkflow {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TriggerWorkflowBulk {
    /// Name of the workflow to trigger
    pub workflow_name: String,
    /// Array of trigger data for bulk execution
    pub triggers: Vec<Object>,
    /// Data shared by every trigger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Object>,
}

impl ToolParams for TriggerWorkflowBulk {
    fn check(&self) -> Result<(), String> {
        if self.triggers.is_empty() {
            return Err("triggers must contain at least one entry".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ScheduleWorkflow {
    /// Name of the workflow to schedule
    pub workflow_name: String,
    /// Data to pass to the workflow
    pub data: Object,
    /// Optional notification payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_payloads: Option<Vec<Object>>,
    /// ISO 8601 timestamp when to run the workflow, e.g. `2026-11-01T09:00:00Z`,
    /// `2026-11-01T09:00:00` or `2026-11-01`
    pub schedule_at: String,
    /// Whether the workflow should run repeatedly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
}

/// Accepts RFC 3339, a naive date-time (optional fractional seconds) or a bare date.
fn is_iso8601(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

impl ToolParams for ScheduleWorkflow {
    fn check(&self) -> Result<(), String> {
        if is_iso8601(&self.schedule_at) {
            Ok(())
        } else {
            Err(format!(
                "schedule_at '{}' is not an ISO 8601 date or date-time",
                self.schedule_at
            ))
        }
    }
}

// =============================================================================
// Webhooks
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigureNotificationWebhooks {
    /// Webhook URL for receiving status updates
    pub url: String,
    /// List of events to subscribe to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Optional secret for webhook verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl ToolParams for ConfigureNotificationWebhooks {
    fn check(&self) -> Result<(), String> {
        check_webhook_url(&self.url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigureInboundWebhooks {
    /// Webhook URL for receiving inbound messages
    pub url: String,
    /// List of events to subscribe to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Optional secret for webhook verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl ToolParams for ConfigureInboundWebhooks {
    fn check(&self) -> Result<(), String> {
        check_webhook_url(&self.url)
    }
}

fn check_webhook_url(url: &str) -> Result<(), String> {
    crate::validation::validate_http_url(url, "url").map_err(|e| e.to_string())
}

// =============================================================================
// Chat
// =============================================================================

/// Interactive button attached to a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ChatButton {
    /// The button text
    pub text: String,
    /// The button value
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StartChat {
    /// The ID of the chat node to start the conversation with
    pub chat_node_id: String,
    /// The ID of the workflow execution this chat is associated with
    pub workflow_execution_id: String,
    /// Optional template ID to use for the chat message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Optional variables to use with the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Object>,
    /// The message body content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// The subject of the chat message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Optional interactive buttons for the chat message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ChatButton>>,
}

impl ToolParams for StartChat {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EndChat {
    /// The ID of the chat node to end the conversation with
    pub chat_node_id: String,
    /// The ID of the workflow execution this chat is associated with
    pub workflow_execution_id: String,
}

impl ToolParams for EndChat {}
