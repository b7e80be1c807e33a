//! Tool infrastructure: schemas, registry, permissions, bindings.
//!
//! The registry owns tool *metadata*; the remote client owns execution.
//! A [`ToolBinding`] joins the two for one selected tool.

pub mod binding;
pub mod params;
pub mod permissions;
pub mod registry;
pub mod schema;

pub use binding::{normalize_output, ToolBinding};
pub use permissions::{select, Action, Category, Permissions};
pub use registry::{find, registry, render_prompt, ToolDescriptor};
pub use schema::{FieldInfo, ParamSchema, ToolParams};
