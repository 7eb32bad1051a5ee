//! # weather-mcp
//!
//! An MCP (Model Context Protocol) server exposing weather operations backed
//! by the OpenWeather API and two flat JSON files:
//!
//! - Tools: `get_weather`, `get_sunrise_and_sunset_in_EST`, `add_favorite_city`
//! - Resources: `weather://history`, `weather://favorites`
//! - Prompts: `weather_report`, `compare_cities`
//!
//! The server speaks newline-delimited JSON-RPC 2.0 over stdio and processes
//! one request at a time. All failures propagate to the JSON-RPC boundary as
//! typed errors; nothing is retried or repaired locally.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weather_mcp::{server::weather_server, FileStore, OpenWeatherClient};
//!
//! # async fn example() -> weather_mcp::Result<()> {
//! let provider = Arc::new(OpenWeatherClient::new("api-key"));
//! let store = Arc::new(FileStore::in_dir("weather_data".as_ref()));
//!
//! let server = weather_server(provider, store)?;
//! server.run_stdio().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![deny(unsafe_code)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::result_large_err)]

pub mod config;
pub mod error;
pub mod provider;
pub mod server;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, ErrorCode, Result};
pub use provider::{OpenWeatherClient, WeatherProvider, WeatherSnapshot};
pub use server::{PromptHandler, ResourceHandler, Server, ServerBuilder, ToolHandler};
pub use storage::{FileStore, HistoryEntry, MemoryStore, WeatherStore};
pub use types::{
    CallToolResult, Content, GetPromptResult, Implementation, PromptInfo, ResourceInfo, Role,
    ServerCapabilities, ToolInfo,
};

/// Latest protocol version this server understands.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

/// Protocol version offered when the client requests an unsupported one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-03-26";

/// All protocol versions accepted during initialization.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &[
    LATEST_PROTOCOL_VERSION,
    "2025-03-26",
    "2024-11-05",
    "2024-10-07",
];
