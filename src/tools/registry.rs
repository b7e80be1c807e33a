//! Tool registry: the static table of every Siren operation.
//!
//! Built once per process, never mutated. Order here is the order tools are
//! presented to agent frameworks.

use crate::tools::params::*;
use crate::tools::permissions::{Action, Category};
use crate::tools::schema::ParamSchema;
use serde_json::Value;
use std::sync::OnceLock;

// =============================================================================
// Tool descriptor
// =============================================================================

/// Complete metadata for one remote operation.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Unique key; also the tool name shown to models.
    pub method: &'static str,
    /// Human title, e.g. "Send Message".
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub action: Action,
    pub params: ParamSchema,
}

impl ToolDescriptor {
    /// JSON Schema of the accepted arguments.
    pub fn input_schema(&self) -> Value {
        self.params.json_schema()
    }

    /// Generate a prompt line for this tool.
    ///
    /// Format: `- method(param1: type, param2?: type): description`
    pub fn to_prompt_line(&self) -> String {
        let params: Vec<String> = self
            .params
            .fields()
            .iter()
            .map(|f| {
                let optional = if f.required { "" } else { "?" };
                format!("{}{}: {}", f.name, optional, f.type_name)
            })
            .collect();

        format!("- {}({}): {}", self.method, params.join(", "), self.description)
    }
}

// =============================================================================
// Registry
// =============================================================================

static REGISTRY: OnceLock<Vec<ToolDescriptor>> = OnceLock::new();

/// Every tool, in presentation order.
pub fn registry() -> &'static [ToolDescriptor] {
    REGISTRY.get_or_init(build_registry)
}

/// Look up a tool by method name.
pub fn find(method: &str) -> Option<&'static ToolDescriptor> {
    registry().iter().find(|d| d.method == method)
}

/// Render an "Available tools" block for text-only agents.
pub fn render_prompt(descriptors: &[&ToolDescriptor]) -> String {
    if descriptors.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(descriptors.len() + 1);
    lines.push("Available tools:".to_string());
    for descriptor in descriptors {
        lines.push(descriptor.to_prompt_line());
    }
    lines.join("\n")
}

fn tool(
    method: &'static str,
    title: &'static str,
    description: &'static str,
    category: Category,
    action: Action,
    params: ParamSchema,
) -> ToolDescriptor {
    ToolDescriptor {
        method,
        title,
        description,
        category,
        action,
        params,
    }
}

fn build_registry() -> Vec<ToolDescriptor> {
    use Action::*;
    use Category::*;

    vec![
        // Messaging
        tool(
            "send_message",
            "Send Message",
            "Send a message either using a template or directly to a recipient via a chosen channel",
            Messaging,
            Create,
            ParamSchema::of::<SendMessage>(),
        ),
        tool(
            "send_awesome_template",
            "Send Awesome Template Message",
            "Send a message using an awesome template identifier via a chosen channel",
            Messaging,
            Create,
            ParamSchema::of::<SendAwesomeTemplate>(),
        ),
        tool(
            "get_message_status",
            "Get Message Status",
            "Retrieve the status of a specific message (e.g., \"DELIVERED\", \"PENDING\", \"FAILED\")",
            Messaging,
            Read,
            ParamSchema::of::<GetMessageStatus>(),
        ),
        tool(
            "get_message_replies",
            "Get Message Replies",
            "Retrieve replies for a specific message",
            Messaging,
            Read,
            ParamSchema::of::<GetMessageReplies>(),
        ),
        // Templates
        tool(
            "list_templates",
            "List Templates",
            "Retrieve a list of notification templates with optional filtering, sorting, and pagination",
            Templates,
            Read,
            ParamSchema::of::<ListTemplates>(),
        ),
        tool(
            "create_template",
            "Create Template",
            "Create a new notification template",
            Templates,
            Create,
            ParamSchema::of::<CreateTemplate>(),
        ),
        tool(
            "update_template",
            "Update Template",
            "Update an existing notification template",
            Templates,
            Update,
            ParamSchema::of::<UpdateTemplate>(),
        ),
        tool(
            "delete_template",
            "Delete Template",
            "Delete an existing notification template",
            Templates,
            Delete,
            ParamSchema::of::<DeleteTemplate>(),
        ),
        tool(
            "publish_template",
            "Publish Template",
            "Publish a template, making its latest draft version live",
            Templates,
            Update,
            ParamSchema::of::<PublishTemplate>(),
        ),
        // Users
        tool(
            "add_user",
            "Add User",
            "Create a new user or update existing user with given unique_id",
            Users,
            Create,
            ParamSchema::of::<AddUser>(),
        ),
        tool(
            "update_user",
            "Update User",
            "Update an existing user's information",
            Users,
            Update,
            ParamSchema::of::<UpdateUser>(),
        ),
        tool(
            "delete_user",
            "Delete User",
            "Delete an existing user",
            Users,
            Delete,
            ParamSchema::of::<DeleteUser>(),
        ),
        tool(
            "get_user",
            "Get User",
            "Retrieve a user by unique_id",
            Users,
            Read,
            ParamSchema::of::<GetUser>(),
        ),
        tool(
            "list_users",
            "List Users",
            "Retrieve a paginated list of users with optional search",
            Users,
            Read,
            ParamSchema::of::<ListUsers>(),
        ),
        // Workflows
        tool(
            "trigger_workflow",
            "Trigger Workflow",
            "Trigger a workflow with given data and notification payloads",
            Workflows,
            Trigger,
            ParamSchema::of::<TriggerWorkflow>(),
        ),
        tool(
            "trigger_workflow_bulk",
            "Trigger Workflow Bulk",
            "Trigger a workflow in bulk for multiple recipients",
            Workflows,
            Trigger,
            ParamSchema::of::<TriggerWorkflowBulk>(),
        ),
        tool(
            "schedule_workflow",
            "Schedule Workflow",
            "Schedule a workflow to run at a future time (once or recurring)",
            Workflows,
            Schedule,
            ParamSchema::of::<ScheduleWorkflow>(),
        ),
        // Webhooks
        tool(
            "configure_notification_webhooks",
            "Configure Notification Webhooks",
            "Configure webhook URL for receiving status updates",
            Webhooks,
            Create,
            ParamSchema::of::<ConfigureNotificationWebhooks>(),
        ),
        tool(
            "configure_inbound_webhooks",
            "Configure Inbound Webhooks",
            "Configure webhook URL for receiving inbound messages",
            Webhooks,
            Create,
            ParamSchema::of::<ConfigureInboundWebhooks>(),
        ),
        // Chat
        tool(
            "start_chat",
            "Start Chat",
            "Start a chat conversation with a specific chat node",
            Chat,
            Message,
            ParamSchema::of::<StartChat>(),
        ),
        tool(
            "end_chat",
            "End Chat",
            "End a chat conversation with a specific chat node",
            Chat,
            End,
            ParamSchema::of::<EndChat>(),
        ),
    ]
}

// =============================================================================
// Tests
// =============================================================================
