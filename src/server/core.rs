//! Transport-independent dispatch core.
//!
//! [`Server`] owns the capability registry and routes each decoded request to
//! the matching handler, mapping every failure to a typed JSON-RPC error. It
//! has no knowledge of the underlying transport.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{Error, ErrorCode, Result};
use crate::server::builder::ServerBuilder;
use crate::server::{PromptHandler, ResourceHandler, ToolHandler};
use crate::types::jsonrpc::{JSONRPCMessage, JSONRPCResponse, RequestId};
use crate::types::{
    CallToolParams, CallToolResult, Content, GetPromptParams, GetPromptResult, Implementation,
    InitializeParams, InitializeResult, ListPromptsResult, ListResourcesResult, ListToolsResult,
    ReadResourceParams, ReadResourceResult, ServerCapabilities,
};
use crate::{DEFAULT_PROTOCOL_VERSION, SUPPORTED_PROTOCOL_VERSIONS};

/// The weather MCP server: capability registry plus dispatcher.
pub struct Server {
    info: Implementation,
    capabilities: ServerCapabilities,
    tools: IndexMap<String, Arc<dyn ToolHandler>>,
    prompts: IndexMap<String, Arc<dyn PromptHandler>>,
    resources: Option<Arc<dyn ResourceHandler>>,
    initialized: RwLock<bool>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("info", &self.info)
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("prompts", &self.prompts.keys().collect::<Vec<_>>())
            .field("resources", &self.resources.is_some())
            .finish()
    }
}

impl Server {
    /// Start building a server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub(crate) fn new(
        info: Implementation,
        capabilities: ServerCapabilities,
        tools: IndexMap<String, Arc<dyn ToolHandler>>,
        prompts: IndexMap<String, Arc<dyn PromptHandler>>,
        resources: Option<Arc<dyn ResourceHandler>>,
    ) -> Self {
        Self {
            info,
            capabilities,
            tools,
            prompts,
            resources,
            initialized: RwLock::new(false),
        }
    }

    /// Server implementation metadata.
    pub fn info(&self) -> &Implementation {
        &self.info
    }

    /// Capabilities advertised during initialization.
    pub fn capabilities(&self) -> &ServerCapabilities {
        &self.capabilities
    }

    /// Whether the initialize handshake has completed.
    pub async fn is_initialized(&self) -> bool {
        *self.initialized.read().await
    }

    /// Decode one raw line from the transport and dispatch it.
    ///
    /// Returns `None` for notifications (no response expected). Undecodable
    /// input yields a parse-error response with a null id.
    pub async fn handle_message(&self, raw: &str) -> Option<JSONRPCResponse> {
        match serde_json::from_str::<JSONRPCMessage>(raw) {
            Ok(JSONRPCMessage::Request(request)) => Some(
                self.handle_request(request.id, &request.method, request.params)
                    .await,
            ),
            Ok(JSONRPCMessage::Notification(notification)) => {
                tracing::debug!(method = %notification.method, "notification ignored");
                None
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse incoming message");
                let err = Error::protocol(ErrorCode::PARSE_ERROR, format!("Parse error: {e}"));
                Some(JSONRPCResponse::error(None, err.to_wire()))
            },
        }
    }

    /// Route a single request to its handler and produce a response.
    pub async fn handle_request(
        &self,
        id: RequestId,
        method: &str,
        params: Option<Value>,
    ) -> JSONRPCResponse {
        tracing::debug!(%id, method, "handling request");

        if method == "initialize" {
            return match parse_params::<InitializeParams>(params) {
                Ok(init) => respond(id, self.initialize(init).await),
                Err(e) => JSONRPCResponse::error(Some(id), e.to_wire()),
            };
        }

        if !self.is_initialized().await {
            let err = Error::protocol(
                ErrorCode::SERVER_NOT_INITIALIZED,
                "Server not initialized. Call initialize first.",
            );
            return JSONRPCResponse::error(Some(id), err.to_wire());
        }

        match method {
            "ping" => respond(id, Ok(serde_json::json!({}))),
            "tools/list" => respond(id, self.list_tools()),
            "tools/call" => match parse_params::<CallToolParams>(params) {
                Ok(call) => respond(id, self.call_tool(call).await),
                Err(e) => JSONRPCResponse::error(Some(id), e.to_wire()),
            },
            "resources/list" => respond(id, self.list_resources().await),
            "resources/read" => match parse_params::<ReadResourceParams>(params) {
                Ok(read) => respond(id, self.read_resource(&read.uri).await),
                Err(e) => JSONRPCResponse::error(Some(id), e.to_wire()),
            },
            "prompts/list" => respond(id, self.list_prompts()),
            "prompts/get" => match parse_params::<GetPromptParams>(params) {
                Ok(get) => respond(id, self.get_prompt(get).await),
                Err(e) => JSONRPCResponse::error(Some(id), e.to_wire()),
            },
            other => {
                JSONRPCResponse::error(Some(id), Error::method_not_found(other).to_wire())
            },
        }
    }

    /// Handle the initialize handshake, negotiating a protocol version.
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let negotiated =
            if SUPPORTED_PROTOCOL_VERSIONS.contains(&params.protocol_version.as_str()) {
                params.protocol_version
            } else {
                DEFAULT_PROTOCOL_VERSION.to_string()
            };

        *self.initialized.write().await = true;
        tracing::info!(
            client = %params.client_info.name,
            version = %negotiated,
            "initialized"
        );

        Ok(InitializeResult {
            protocol_version: negotiated,
            capabilities: self.capabilities.clone(),
            server_info: self.info.clone(),
            instructions: None,
        })
    }

    fn list_tools(&self) -> Result<ListToolsResult> {
        Ok(ListToolsResult {
            tools: self.tools.values().map(|handler| handler.info()).collect(),
            next_cursor: None,
        })
    }

    async fn call_tool(&self, params: CallToolParams) -> Result<CallToolResult> {
        let handler = self
            .tools
            .get(&params.name)
            .ok_or_else(|| Error::unknown_tool(&params.name))?;

        let text = handler.handle(params.arguments).await?;
        Ok(CallToolResult {
            content: vec![Content::Text { text }],
            is_error: false,
        })
    }

    async fn list_resources(&self) -> Result<ListResourcesResult> {
        match &self.resources {
            Some(handler) => handler.list().await,
            None => Ok(ListResourcesResult {
                resources: vec![],
                next_cursor: None,
            }),
        }
    }

    async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult> {
        let handler = self
            .resources
            .as_ref()
            .ok_or_else(|| Error::unknown_resource(uri))?;
        handler.read(uri).await
    }

    fn list_prompts(&self) -> Result<ListPromptsResult> {
        Ok(ListPromptsResult {
            prompts: self
                .prompts
                .values()
                .map(|handler| handler.info())
                .collect(),
            next_cursor: None,
        })
    }

    async fn get_prompt(&self, params: GetPromptParams) -> Result<GetPromptResult> {
        let handler = self
            .prompts
            .get(&params.name)
            .ok_or_else(|| Error::invalid_params(format!("Unknown prompt: {}", params.name)))?;
        handler.handle(params.arguments).await
    }
}

/// Decode request params, treating absent params as an empty object.
fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T> {
    let value = params.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| Error::invalid_params(e.to_string()))
}

/// Fold a handler outcome into a JSON-RPC response.
fn respond<T: Serialize>(id: RequestId, outcome: Result<T>) -> JSONRPCResponse {
    match outcome.and_then(|result| serde_json::to_value(result).map_err(Error::from)) {
        Ok(value) => JSONRPCResponse::result(id, value),
        Err(e) => {
            tracing::debug!(error = %e, "request failed");
            JSONRPCResponse::error(Some(id), e.to_wire())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::jsonrpc::ResponsePayload;

    fn bare_server() -> Server {
        Server::builder()
            .name("test-server")
            .version("0.0.1")
            .build()
            .unwrap()
    }

    fn initialize_params() -> Value {
        serde_json::json!({
            "protocolVersion": DEFAULT_PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "0.0.1"}
        })
    }

    #[tokio::test]
    async fn test_requests_gated_until_initialize() {
        let server = bare_server();

        let response = server
            .handle_request(RequestId::from(1), "tools/list", None)
            .await;
        match response.payload {
            ResponsePayload::Error(e) => assert_eq!(e.code, -32002),
            ResponsePayload::Result(_) => panic!("expected not-initialized error"),
        }

        server
            .handle_request(RequestId::from(2), "initialize", Some(initialize_params()))
            .await;
        assert!(server.is_initialized().await);

        let response = server
            .handle_request(RequestId::from(3), "tools/list", None)
            .await;
        assert!(matches!(response.payload, ResponsePayload::Result(_)));
    }

    #[tokio::test]
    async fn test_unsupported_version_falls_back_to_default() {
        let server = bare_server();
        let mut params = initialize_params();
        params["protocolVersion"] = Value::String("1999-01-01".into());

        let response = server
            .handle_request(RequestId::from(1), "initialize", Some(params))
            .await;
        match response.payload {
            ResponsePayload::Result(result) => {
                assert_eq!(result["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
                assert_eq!(result["serverInfo"]["name"], "test-server");
            },
            ResponsePayload::Error(e) => panic!("initialize failed: {}", e.message),
        }
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = bare_server();
        server
            .handle_request(RequestId::from(1), "initialize", Some(initialize_params()))
            .await;

        let response = server
            .handle_request(RequestId::from(2), "moon/phase", None)
            .await;
        match response.payload {
            ResponsePayload::Error(e) => assert_eq!(e.code, -32601),
            ResponsePayload::Result(_) => panic!("expected method-not-found"),
        }
    }

    #[tokio::test]
    async fn test_parse_error_has_null_id() {
        let server = bare_server();
        let response = server.handle_message("{nonsense").await.unwrap();
        assert!(response.id.is_none());
        match response.payload {
            ResponsePayload::Error(e) => assert_eq!(e.code, -32700),
            ResponsePayload::Result(_) => panic!("expected parse error"),
        }
    }

    #[tokio::test]
    async fn test_notifications_produce_no_response() {
        let server = bare_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }
}
