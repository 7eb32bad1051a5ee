//! Builder pattern for constructing [`Server`] instances.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::server::core::Server;
use crate::server::{PromptHandler, ResourceHandler, ToolHandler};
use crate::types::{
    Implementation, PromptCapabilities, ResourceCapabilities, ServerCapabilities, ToolCapabilities,
};

/// Builder for a [`Server`].
///
/// Handlers are collected in registration order; `tools/list`, `prompts/list`
/// and `resources/list` report them in the same order on every call. Name
/// collisions and missing required fields are rejected by [`build`].
///
/// [`build`]: ServerBuilder::build
#[derive(Default)]
pub struct ServerBuilder {
    name: Option<String>,
    version: Option<String>,
    tools: Vec<Arc<dyn ToolHandler>>,
    prompts: Vec<Arc<dyn PromptHandler>>,
    resources: Option<Arc<dyn ResourceHandler>>,
}

impl ServerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server name. Required.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the server version. Required.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Register a tool handler. The tool's name comes from its descriptor.
    pub fn tool(mut self, handler: impl ToolHandler + 'static) -> Self {
        self.tools.push(Arc::new(handler));
        self
    }

    /// Register a prompt handler. The prompt's name comes from its descriptor.
    pub fn prompt(mut self, handler: impl PromptHandler + 'static) -> Self {
        self.prompts.push(Arc::new(handler));
        self
    }

    /// Set the resource handler.
    pub fn resources(mut self, handler: impl ResourceHandler + 'static) -> Self {
        self.resources = Some(Arc::new(handler));
        self
    }

    /// Build the [`Server`], validating the registry once.
    pub fn build(self) -> Result<Server> {
        let name = self
            .name
            .ok_or_else(|| Error::validation("Server name is required"))?;
        let version = self
            .version
            .ok_or_else(|| Error::validation("Server version is required"))?;

        let mut tools: IndexMap<String, Arc<dyn ToolHandler>> = IndexMap::new();
        for handler in self.tools {
            let tool_name = handler.info().name;
            if tools.insert(tool_name.clone(), handler).is_some() {
                return Err(Error::validation(format!(
                    "Duplicate tool registration: {tool_name}"
                )));
            }
        }

        let mut prompts: IndexMap<String, Arc<dyn PromptHandler>> = IndexMap::new();
        for handler in self.prompts {
            let prompt_name = handler.info().name;
            if prompts.insert(prompt_name.clone(), handler).is_some() {
                return Err(Error::validation(format!(
                    "Duplicate prompt registration: {prompt_name}"
                )));
            }
        }

        let capabilities = ServerCapabilities {
            tools: (!tools.is_empty()).then(ToolCapabilities::default),
            resources: self
                .resources
                .is_some()
                .then(ResourceCapabilities::default),
            prompts: (!prompts.is_empty()).then(PromptCapabilities::default),
        };

        Ok(Server::new(
            Implementation { name, version },
            capabilities,
            tools,
            prompts,
            self.resources,
        ))
    }
}

impl std::fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("tools", &self.tools.len())
            .field("prompts", &self.prompts.len())
            .field("resources", &self.resources.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct TestTool;

    #[async_trait]
    impl ToolHandler for TestTool {
        fn info(&self) -> crate::types::ToolInfo {
            crate::types::ToolInfo {
                name: "test-tool".into(),
                description: None,
                input_schema: json!({"type": "object"}),
            }
        }

        async fn handle(&self, _args: Value) -> Result<String> {
            Ok("ok".into())
        }
    }

    #[test]
    fn test_builder_required_fields() {
        assert!(ServerBuilder::new().version("1.0.0").build().is_err());
        assert!(ServerBuilder::new().name("test").build().is_err());
        assert!(ServerBuilder::new()
            .name("test")
            .version("1.0.0")
            .build()
            .is_ok());
    }

    #[test]
    fn test_builder_rejects_duplicate_tools() {
        let result = ServerBuilder::new()
            .name("test")
            .version("1.0.0")
            .tool(TestTool)
            .tool(TestTool)
            .build();
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_builder_sets_capabilities() {
        let server = ServerBuilder::new()
            .name("test")
            .version("1.0.0")
            .tool(TestTool)
            .build()
            .unwrap();
        assert!(server.capabilities().tools.is_some());
        assert!(server.capabilities().resources.is_none());
        assert!(server.capabilities().prompts.is_none());
    }
}
