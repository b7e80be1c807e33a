//! # Siren Agent Toolkit
//!
//! Exposes the Siren notification API (messaging, templates, users,
//! workflows, webhooks, chat) as tools for LLM agent frameworks:
//! - A static registry of tool descriptors with JSON-Schema argument contracts
//! - Default-deny permission filtering by category and action
//! - One adapter per framework calling convention (OpenAI, genai, MCP,
//!   structured run/arun, final-answer envelope)
//! - A reqwest client for the Siren REST API and an MCP stdio server
//!
//! ## Architecture
//!
//! ```text
//!   Permissions ──► select() ──► Toolkit<A> ──get_tools()──► [A; n]
//!                     ▲                                      │ invoke
//!               Tool Registry                                ▼
//!          (ToolDescriptor + ParamSchema)        ToolBinding::execute
//!                                           validate ─► RemoteClient::run
//!                                                          (SirenApi)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use siren_agent_toolkit::adapters::OpenAiToolkit;
//! use siren_agent_toolkit::tools::{Action, Category, Permissions};
//!
//! # fn main() -> siren_agent_toolkit::Result<()> {
//! let permissions = Permissions::new().allow(Category::Messaging, Action::Create);
//! let toolkit = OpenAiToolkit::with_api_key("sk-siren", permissions)?;
//! let tools = toolkit.definitions();
//! # let _ = tools;
//! # Ok(())
//! # }
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod adapters;
pub mod client;
pub mod mcp;
pub mod siren;
pub mod toolkit;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;
pub mod validation;

pub use client::RemoteClient;
pub use siren::SirenApi;
pub use toolkit::{ToolAdapter, Toolkit};
pub use types::{Config, Error, Result};
