//! Server-side MCP implementation: capability registry, dispatch core,
//! handlers, and the stdio transport.

pub mod builder;
pub mod core;
pub mod prompts;
pub mod resources;
mod stdio;
pub mod tools;
mod traits;

use std::sync::Arc;

pub use builder::ServerBuilder;
pub use core::Server;
pub use traits::{PromptHandler, ResourceHandler, ToolHandler};

use crate::error::Result;
use crate::provider::WeatherProvider;
use crate::storage::WeatherStore;

use prompts::{CompareCitiesPrompt, WeatherReportPrompt};
use resources::StoreResources;
use tools::{AddFavoriteTool, GetWeatherTool, SunriseSunsetTool};

/// Assemble the weather server with its full capability registry: three
/// tools, two resources, and two prompt templates.
///
/// Declarations are constructed once here and stay immutable for the process
/// lifetime; listing order matches registration order.
pub fn weather_server(
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn WeatherStore>,
) -> Result<Server> {
    Server::builder()
        .name("weather-server")
        .version(env!("CARGO_PKG_VERSION"))
        .tool(GetWeatherTool::new(provider.clone(), store.clone()))
        .tool(SunriseSunsetTool::new(provider, store.clone()))
        .tool(AddFavoriteTool::new(store.clone()))
        .prompt(WeatherReportPrompt)
        .prompt(CompareCitiesPrompt)
        .resources(StoreResources::new(store))
        .build()
}
