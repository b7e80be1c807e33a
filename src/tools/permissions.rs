//! Tool permissions: category/action allow-lists.
//!
//! A tool is exposed only when its (category, action) pair is explicitly set
//! to `true`. Missing categories, missing actions and explicit `false` all
//! deny.

use crate::tools::registry::{registry, ToolDescriptor};
use crate::types::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Siren resource a tool operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Messaging,
    Templates,
    Users,
    Workflows,
    Webhooks,
    Chat,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Messaging,
        Category::Templates,
        Category::Users,
        Category::Workflows,
        Category::Webhooks,
        Category::Chat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Messaging => "messaging",
            Category::Templates => "templates",
            Category::Users => "users",
            Category::Workflows => "workflows",
            Category::Webhooks => "webhooks",
            Category::Chat => "chat",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::config(format!("unknown tool category: {}", s)))
    }
}

/// Kind of operation a tool performs within its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Trigger,
    Schedule,
    Message,
    End,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Trigger,
        Action::Schedule,
        Action::Message,
        Action::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Trigger => "trigger",
            Action::Schedule => "schedule",
            Action::Message => "message",
            Action::End => "end",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::config(format!("unknown tool action: {}", s)))
    }
}

/// Category → action → allowed.
///
/// Serializes as `{"messaging": {"create": true}}`. Deserialization is
/// lenient: unknown category or action names and non-boolean values are
/// skipped with a warning, so they deny.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Permissions {
    actions: BTreeMap<Category, BTreeMap<Action, bool>>,
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every action the registry uses, in every category.
    pub fn all() -> Self {
        let mut permissions = Self::new();
        for descriptor in registry() {
            permissions.set(descriptor.category, descriptor.action, true);
        }
        permissions
    }

    /// Builder form of [`Permissions::set`] with `true`.
    pub fn allow(mut self, category: Category, action: Action) -> Self {
        self.set(category, action, true);
        self
    }

    /// Record an explicit decision for a (category, action) pair.
    pub fn set(&mut self, category: Category, action: Action, allowed: bool) {
        self.actions
            .entry(category)
            .or_default()
            .insert(action, allowed);
    }

    /// Check whether a (category, action) pair is explicitly allowed.
    pub fn allows(&self, category: Category, action: Action) -> bool {
        self.actions
            .get(&category)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(false)
    }

    /// Parse `category.action` selectors, e.g. `messaging.create`.
    ///
    /// The single selector `all` expands to [`Permissions::all`].
    pub fn from_selectors<I, S>(selectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut permissions = Self::new();
        for selector in selectors {
            let selector = selector.as_ref().trim();
            if selector.is_empty() {
                continue;
            }
            if selector == "all" {
                return Ok(Self::all());
            }
            let (category, action) = selector.split_once('.').ok_or_else(|| {
                Error::config(format!(
                    "invalid tool selector '{}', expected <category>.<action>",
                    selector
                ))
            })?;
            permissions.set(category.parse()?, action.parse()?, true);
        }
        Ok(permissions)
    }

    fn from_raw(raw: BTreeMap<String, Value>) -> Self {
        let mut permissions = Self::new();
        for (category_name, actions) in raw {
            let Ok(category) = category_name.parse::<Category>() else {
                tracing::warn!(category = %category_name, "ignoring unknown permission category");
                continue;
            };
            let Value::Object(actions) = actions else {
                tracing::warn!(category = %category_name, "ignoring non-object permission category");
                continue;
            };
            for (action_name, value) in actions {
                let Ok(action) = action_name.parse::<Action>() else {
                    tracing::warn!(
                        category = %category_name,
                        action = %action_name,
                        "ignoring unknown permission action"
                    );
                    continue;
                };
                match value {
                    Value::Bool(allowed) => permissions.set(category, action, allowed),
                    other => tracing::warn!(
                        category = %category_name,
                        action = %action_name,
                        value = %other,
                        "ignoring non-boolean permission"
                    ),
                }
            }
        }
        permissions
    }

    /// True when no pair is allowed.
    pub fn is_empty(&self) -> bool {
        !self.actions.values().flat_map(|a| a.values()).any(|v| *v)
    }

    /// Check whether a registry entry may be exposed.
    pub fn permits(&self, descriptor: &ToolDescriptor) -> bool {
        self.allows(descriptor.category, descriptor.action)
    }
}

/// Select the permitted registry entries, in registry order.
pub fn select(permissions: &Permissions) -> Vec<&'static ToolDescriptor> {
    registry().iter().filter(|d| permissions.permits(d)).collect()
}
