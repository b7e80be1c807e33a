//! `siren-mcp`: Siren tools over the Model Context Protocol (stdio).
//!
//! ```text
//! siren-mcp --tools=all --api-key=$SIREN_API_KEY
//! siren-mcp --tools=messaging.create,messaging.read --env=dev
//! ```

use clap::Parser;
use siren_agent_toolkit::adapters::McpToolkit;
use siren_agent_toolkit::mcp::McpServer;
use siren_agent_toolkit::tools::Permissions;
use siren_agent_toolkit::{Config, Error};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "siren-mcp", version, about = "Siren notification tools as an MCP server")]
struct Args {
    /// Tools to expose: `all`, or comma-separated `<category>.<action>` selectors
    #[arg(long, value_delimiter = ',')]
    tools: Vec<String>,

    /// Siren API key
    #[arg(long, env = "SIREN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Siren deployment: prod or dev
    #[arg(long, env = "SIREN_ENV")]
    env: Option<String>,

    /// Explicit API endpoint, overrides --env
    #[arg(long, env = "SIREN_BASE_URL")]
    base_url: Option<String>,

    /// JSON configuration file; flags and environment override it
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> siren_agent_toolkit::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        }
        .with_env()?;

        if let Some(key) = self.api_key {
            config.api.api_key = key;
        }
        if let Some(env) = self.env {
            config.api.env = env.parse()?;
        }
        if self.base_url.is_some() {
            config.api.base_url = self.base_url;
        }
        if !self.tools.is_empty() {
            config.permissions = Permissions::from_selectors(&self.tools)?;
        }
        if config.permissions.is_empty() {
            return Err(Error::config(
                "no tools selected: pass --tools=all or --tools=<category>.<action>,...",
            ));
        }
        if config.api.api_key.trim().is_empty() {
            return Err(Error::config(
                "Siren API key not provided: pass --api-key or set SIREN_API_KEY",
            ));
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config()?;

    siren_agent_toolkit::observability::init_tracing_with(&config.observability);

    let toolkit = McpToolkit::new(&config)?;
    tracing::info!(
        tools = ?toolkit.tool_names(),
        base_url = %config.api.resolved_base_url(),
        "siren-mcp starting"
    );

    McpServer::new(toolkit).serve_stdio().await?;
    Ok(())
}
