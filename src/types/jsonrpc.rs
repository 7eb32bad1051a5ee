//! JSON-RPC 2.0 message envelopes used on the stdio transport.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// A uniquely identifying ID for a request in JSON-RPC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    /// String request ID.
    String(String),
    /// Numeric request ID.
    Number(i64),
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A request that expects a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JSONRPCRequest {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request identifier echoed back in the response.
    pub id: RequestId,
    /// Method name, e.g. `tools/call`.
    pub method: String,
    /// Method parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A notification which does not expect a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JSONRPCNotification {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Method name, e.g. `notifications/initialized`.
    pub method: String,
    /// Notification parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Any valid message the server can decode off the wire.
///
/// Untagged: a request carries an `id`, a notification does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JSONRPCMessage {
    /// Request expecting a response.
    Request(JSONRPCRequest),
    /// One-way notification.
    Notification(JSONRPCNotification),
}

/// Error object carried in an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JSONRPCError {
    /// The error code that occurred.
    pub code: i32,
    /// A concise single-sentence description of the error.
    pub message: String,
    /// Additional sender-defined error information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Result or error payload of a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePayload {
    /// Successful result value.
    Result(Value),
    /// Error object.
    Error(JSONRPCError),
}

/// A response to a request, containing either the result or error.
///
/// `id` is `None` (serialized as `null`) only for errors that could not be
/// associated with a request, such as parse failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JSONRPCResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Identifier of the request being answered.
    pub id: Option<RequestId>,
    /// Result or error payload.
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

impl JSONRPCResponse {
    /// Build a success response.
    pub fn result(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            payload: ResponsePayload::Result(result),
        }
    }

    /// Build an error response.
    pub fn error(id: Option<RequestId>, error: JSONRPCError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            payload: ResponsePayload::Error(error),
        }
    }
}
