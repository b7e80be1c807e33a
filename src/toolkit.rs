//! Toolkit facade: the per-framework entry point.
//!
//! A [`Toolkit`] resolves the permission filter once, at construction, and
//! then hands out fresh adapters for the selected tools on every
//! [`Toolkit::get_tools`] call. The adapter type decides the calling
//! convention; the toolkit itself is framework-agnostic.

use crate::client::RemoteClient;
use crate::siren::SirenApi;
use crate::tools::{render_prompt, select, Permissions, ToolBinding, ToolDescriptor};
use crate::types::{ApiConfig, Config, Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

// =============================================================================
// Adapter trait
// =============================================================================

/// Capability set shared by every framework adapter: registration
/// (`definition`) and invocation (`invoke`).
#[async_trait]
pub trait ToolAdapter: Send + Sync + Sized {
    /// What the framework needs to register the tool.
    type Definition;
    /// What the framework receives back from one invocation.
    type Output: Send;

    fn from_binding(binding: ToolBinding) -> Self;

    fn binding(&self) -> &ToolBinding;

    fn name(&self) -> &'static str {
        self.binding().name()
    }

    fn definition(&self) -> Self::Definition;

    /// Validate, call the remote client once, and shape the result.
    async fn invoke(&self, args: Value) -> Result<Self::Output>;
}

// =============================================================================
// Toolkit
// =============================================================================

/// Filtered tool set for one framework.
pub struct Toolkit<A> {
    client: Arc<dyn RemoteClient>,
    selected: Vec<&'static ToolDescriptor>,
    _adapter: PhantomData<fn() -> A>,
}

impl<A> fmt::Debug for Toolkit<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("adapter", &std::any::type_name::<A>())
            .field("tools", &self.tool_names())
            .finish()
    }
}

impl<A> Clone for Toolkit<A> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            selected: self.selected.clone(),
            _adapter: PhantomData,
        }
    }
}

impl<A> Toolkit<A> {
    /// Build the Siren HTTP client from `config` and apply its permissions.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let api = SirenApi::new(&config.api)?;
        Ok(Self::with_client(Arc::new(api), &config.permissions))
    }

    /// Production API with default settings and the given permissions.
    pub fn with_api_key(api_key: impl Into<String>, permissions: Permissions) -> Result<Self> {
        let config = Config {
            api: ApiConfig::new(api_key),
            permissions,
            ..Config::default()
        };
        Self::new(&config)
    }

    /// Use an existing remote client. An empty `permissions` yields a
    /// toolkit with zero tools.
    pub fn with_client(client: Arc<dyn RemoteClient>, permissions: &Permissions) -> Self {
        let selected = select(permissions);
        tracing::debug!(tools = selected.len(), "toolkit constructed");
        Self {
            client,
            selected,
            _adapter: PhantomData,
        }
    }

    /// Selected descriptors, in registry order.
    pub fn selected(&self) -> &[&'static ToolDescriptor] {
        &self.selected
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.selected.iter().map(|d| d.method).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// "Available tools" block for agents without native tool calling.
    pub fn prompt(&self) -> String {
        render_prompt(&self.selected)
    }

    pub fn client(&self) -> &Arc<dyn RemoteClient> {
        &self.client
    }

    fn lookup(&self, name: &str) -> Result<&'static ToolDescriptor> {
        self.selected
            .iter()
            .copied()
            .find(|d| d.method == name)
            .ok_or_else(|| Error::tool_not_found(format!("tool not available: {}", name)))
    }
}

impl<A: ToolAdapter> Toolkit<A> {
    /// Fresh adapters for every selected tool, in registry order.
    pub fn get_tools(&self) -> Vec<A> {
        self.selected
            .iter()
            .map(|d| A::from_binding(ToolBinding::new(d, Arc::clone(&self.client))))
            .collect()
    }

    /// Fresh adapter for one selected tool.
    pub fn get_tool(&self, name: &str) -> Result<A> {
        let descriptor = self.lookup(name)?;
        Ok(A::from_binding(ToolBinding::new(
            descriptor,
            Arc::clone(&self.client),
        )))
    }

    /// Framework definitions for every selected tool.
    pub fn definitions(&self) -> Vec<A::Definition> {
        self.get_tools().iter().map(A::definition).collect()
    }

    /// Invoke a selected tool by name.
    ///
    /// Names outside the selected set fail with [`Error::ToolNotFound`],
    /// whether filtered out or unknown.
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<A::Output> {
        self.get_tool(name)?.invoke(args).await
    }
}
