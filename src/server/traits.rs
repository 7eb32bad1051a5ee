//! Core traits for handling server-side MCP requests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{
    GetPromptResult, ListResourcesResult, PromptInfo, ReadResourceResult, ToolInfo,
};

/// Handler for tool execution.
///
/// Each implementation pairs a static descriptor (checked once at
/// registration) with the behavior invoked by `tools/call`.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Descriptor advertised by `tools/list`: name, description, input schema.
    fn info(&self) -> ToolInfo;

    /// Execute the tool with the raw argument object, producing result text.
    async fn handle(&self, args: Value) -> Result<String>;
}

/// Handler for prompt templating.
#[async_trait]
pub trait PromptHandler: Send + Sync {
    /// Descriptor advertised by `prompts/list`.
    fn info(&self) -> PromptInfo;

    /// Render the template with the given arguments.
    async fn handle(&self, args: HashMap<String, String>) -> Result<GetPromptResult>;
}

/// Handler for resource access.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// List available resources.
    async fn list(&self) -> Result<ListResourcesResult>;

    /// Read the resource at the given URI.
    async fn read(&self, uri: &str) -> Result<ReadResourceResult>;
}
