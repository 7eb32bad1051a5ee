//! Error types for the weather MCP server.
//!
//! Every failure in the server is expressed as an [`Error`] and propagated to
//! the JSON-RPC boundary; there is no local recovery or retry anywhere.

use std::fmt;
use thiserror::Error;

use crate::types::jsonrpc::JSONRPCError;

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the weather server.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON-RPC protocol errors
    #[error("Protocol error: {code} - {message}")]
    Protocol {
        /// Error code as defined in JSON-RPC spec
        code: ErrorCode,
        /// Human-readable error message
        message: String,
        /// Optional additional error data
        data: Option<serde_json::Value>,
    },

    /// Missing or invalid process configuration (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Weather Data Provider failures: HTTP errors, non-2xx status,
    /// unresolvable city, malformed response body
    #[error("Weather provider error: {0}")]
    Provider(String),

    /// Persistent store failures: missing file, unreadable file, invalid JSON
    #[error("Storage error: {0}")]
    Storage(String),

    /// Tool name not present in the capability registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Resource URI not present in the capability registry
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// A schema-required argument was absent or not a string
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Server assembly errors (duplicate registrations, missing fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level errors on the stdio stream
    #[error("Transport error: {0}")]
    Transport(String),
}

/// JSON-RPC error code for wire responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    /// Parse error (-32700)
    pub const PARSE_ERROR: Self = Self(-32700);
    /// Invalid request (-32600)
    pub const INVALID_REQUEST: Self = Self(-32600);
    /// Method not found (-32601)
    pub const METHOD_NOT_FOUND: Self = Self(-32601);
    /// Invalid params (-32602)
    pub const INVALID_PARAMS: Self = Self(-32602);
    /// Internal error (-32603)
    pub const INTERNAL_ERROR: Self = Self(-32603);
    /// Request received before the initialize handshake (-32002)
    pub const SERVER_NOT_INITIALIZED: Self = Self(-32002);

    /// Convert error code to i32 value.
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl Error {
    /// Create a new protocol error.
    pub fn protocol(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Protocol {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a weather provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an unknown tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create an unknown resource error.
    pub fn unknown_resource(uri: impl Into<String>) -> Self {
        Self::UnknownResource(uri.into())
    }

    /// Create a missing argument error.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid params error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::Protocol {
            code: ErrorCode::INVALID_PARAMS,
            message: message.into(),
            data: None,
        }
    }

    /// Create a method not found error.
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::Protocol {
            code: ErrorCode::METHOD_NOT_FOUND,
            message: format!("Method not found: {}", method.into()),
            data: None,
        }
    }

    /// Get the JSON-RPC error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Protocol { code, .. } => *code,
            Self::UnknownTool(_) => ErrorCode::METHOD_NOT_FOUND,
            Self::UnknownResource(_) | Self::MissingArgument(_) => ErrorCode::INVALID_PARAMS,
            Self::Config(_)
            | Self::Provider(_)
            | Self::Storage(_)
            | Self::Validation(_)
            | Self::Serialization(_)
            | Self::Transport(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Convert into a JSON-RPC error object for the wire.
    pub fn to_wire(&self) -> JSONRPCError {
        let data = match self {
            Self::Protocol { data, .. } => data.clone(),
            _ => None,
        };
        JSONRPCError {
            code: self.error_code().as_i32(),
            message: self.to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::provider("city not found");
        assert!(matches!(err, Error::Provider(_)));

        let err = Error::protocol(ErrorCode::INVALID_REQUEST, "bad request");
        assert!(matches!(err, Error::Protocol { .. }));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::PARSE_ERROR.as_i32(), -32700);
        assert_eq!(
            Error::unknown_tool("get_moonphase").error_code(),
            ErrorCode::METHOD_NOT_FOUND
        );
        assert_eq!(
            Error::missing_argument("city").error_code(),
            ErrorCode::INVALID_PARAMS
        );
        assert_eq!(
            Error::storage("history.json missing").error_code(),
            ErrorCode::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_to_wire() {
        let wire = Error::unknown_resource("weather://moonphase").to_wire();
        assert_eq!(wire.code, -32602);
        assert!(wire.message.contains("weather://moonphase"));
        assert!(wire.data.is_none());
    }
}
