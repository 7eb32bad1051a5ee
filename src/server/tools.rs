//! The three weather tools.
//!
//! `get_weather` and `get_sunrise_and_sunset_in_EST` call the Weather Data
//! Provider and append to the history log; `add_favorite_city` only touches
//! the favorites set. A failed history write fails the whole call — the
//! append is part of the operation's contract, so the primary result is
//! suppressed rather than reported alongside a silently lost entry.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::America::New_York;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::provider::{WeatherProvider, WeatherSnapshot};
use crate::server::ToolHandler;
use crate::storage::{HistoryEntry, WeatherStore};
use crate::types::ToolInfo;

/// Input contract shared by all three tools: a required `city` string.
fn city_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "city": {
                "type": "string",
                "description": "City name (e.g. 'London', 'NewYork')"
            }
        },
        "required": ["city"]
    })
}

/// Extract the required `city` argument. Non-empty is the only validation;
/// spelling and resolution are the provider's problem.
fn require_city(args: &Value) -> Result<String> {
    args.get("city")
        .and_then(Value::as_str)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::missing_argument("city"))
}

/// Append one entry to the history log via read-modify-write.
async fn append_history(store: &dyn WeatherStore, snapshot: &WeatherSnapshot) -> Result<()> {
    let mut history = store.load_history().await?;
    history.push(HistoryEntry::record(snapshot));
    store.save_history(&history).await
}

/// Format an epoch timestamp as a 12-hour clock time in America/New_York.
///
/// chrono-tz applies EST or EDT according to the calendar date, so the same
/// UTC clock time formats differently across a daylight-saving boundary.
fn eastern_clock_time(epoch: i64) -> Result<String> {
    let utc = DateTime::from_timestamp(epoch, 0)
        .ok_or_else(|| Error::provider(format!("timestamp {epoch} out of range")))?;
    Ok(utc.with_timezone(&New_York).format("%I:%M %p").to_string())
}

/// `get_weather`: current temperature and conditions for a city.
pub struct GetWeatherTool {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn WeatherStore>,
}

impl GetWeatherTool {
    /// Create the tool over a provider and store.
    pub fn new(provider: Arc<dyn WeatherProvider>, store: Arc<dyn WeatherStore>) -> Self {
        Self { provider, store }
    }
}

impl fmt::Debug for GetWeatherTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetWeatherTool").finish_non_exhaustive()
    }
}

#[async_trait]
impl ToolHandler for GetWeatherTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: "get_weather".into(),
            description: Some(
                "Get the current weather for a city. Returns temperature and conditions.".into(),
            ),
            input_schema: city_schema(),
        }
    }

    async fn handle(&self, args: Value) -> Result<String> {
        let city = require_city(&args)?;
        let snapshot = self.provider.current(&city).await?;
        append_history(self.store.as_ref(), &snapshot).await?;
        Ok(format!(
            "{}: {}°C, {}",
            snapshot.city, snapshot.temperature, snapshot.description
        ))
    }
}

/// `get_sunrise_and_sunset_in_EST`: sunrise and sunset clock times for a
/// city, expressed in America/New_York.
pub struct SunriseSunsetTool {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn WeatherStore>,
}

impl SunriseSunsetTool {
    /// Create the tool over a provider and store.
    pub fn new(provider: Arc<dyn WeatherProvider>, store: Arc<dyn WeatherStore>) -> Self {
        Self { provider, store }
    }
}

impl fmt::Debug for SunriseSunsetTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SunriseSunsetTool").finish_non_exhaustive()
    }
}

#[async_trait]
impl ToolHandler for SunriseSunsetTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: "get_sunrise_and_sunset_in_EST".into(),
            description: Some(
                "Get the sunrise and sunset for a city. Returns sunrise and sunset timings."
                    .into(),
            ),
            input_schema: city_schema(),
        }
    }

    async fn handle(&self, args: Value) -> Result<String> {
        let city = require_city(&args)?;
        let snapshot = self.provider.current(&city).await?;
        append_history(self.store.as_ref(), &snapshot).await?;

        let sunrise = eastern_clock_time(snapshot.sunrise)?;
        let sunset = eastern_clock_time(snapshot.sunset)?;
        Ok(format!(
            "In {}, the sun rises at {sunrise} EST and sets at {sunset} EST",
            snapshot.city
        ))
    }
}

/// `add_favorite_city`: insert a city into the favorites set.
///
/// Membership is exact string match; "London" and "london" are distinct.
/// Never calls the provider and never writes history.
pub struct AddFavoriteTool {
    store: Arc<dyn WeatherStore>,
}

impl AddFavoriteTool {
    /// Create the tool over a store.
    pub fn new(store: Arc<dyn WeatherStore>) -> Self {
        Self { store }
    }
}

impl fmt::Debug for AddFavoriteTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddFavoriteTool").finish_non_exhaustive()
    }
}

#[async_trait]
impl ToolHandler for AddFavoriteTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: "add_favorite_city".into(),
            description: Some(
                "Add a city to the favorites list. Cities already present are left unchanged."
                    .into(),
            ),
            input_schema: city_schema(),
        }
    }

    async fn handle(&self, args: Value) -> Result<String> {
        let city = require_city(&args)?;
        let mut favorites = self.store.load_favorites().await?;

        if favorites.iter().any(|existing| existing == &city) {
            return Ok(format!("{city} already in favorites"));
        }

        favorites.push(city.clone());
        self.store.save_favorites(&favorites).await?;
        Ok(format!("Added {city} to favorites"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_require_city() {
        assert_eq!(
            require_city(&json!({"city": "London"})).unwrap(),
            "London"
        );
        assert!(matches!(
            require_city(&json!({})),
            Err(Error::MissingArgument(_))
        ));
        assert!(matches!(
            require_city(&json!({"city": ""})),
            Err(Error::MissingArgument(_))
        ));
        assert!(matches!(
            require_city(&json!({"city": 42})),
            Err(Error::MissingArgument(_))
        ));
        assert!(matches!(
            require_city(&Value::Null),
            Err(Error::MissingArgument(_))
        ));
    }

    #[test]
    fn test_eastern_clock_time_honors_dst() {
        // 2021-01-15 12:00 UTC: New York is on EST (UTC-5).
        assert_eq!(eastern_clock_time(1610712000).unwrap(), "07:00 AM");
        // 2021-07-15 12:00 UTC: New York is on EDT (UTC-4).
        assert_eq!(eastern_clock_time(1626350400).unwrap(), "08:00 AM");
        // 2021-01-15 22:00 UTC: zero-padded 12-hour PM formatting.
        assert_eq!(eastern_clock_time(1610748000).unwrap(), "05:00 PM");
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let tool = AddFavoriteTool::new(store.clone());

        let text = tool.handle(json!({"city": "Paris"})).await.unwrap();
        assert_eq!(text, "Added Paris to favorites");
        assert_eq!(store.load_favorites().await.unwrap(), vec!["Paris"]);

        let text = tool.handle(json!({"city": "Paris"})).await.unwrap();
        assert_eq!(text, "Paris already in favorites");
        assert_eq!(store.load_favorites().await.unwrap(), vec!["Paris"]);
    }

    #[tokio::test]
    async fn test_add_favorite_is_case_sensitive() {
        let store = Arc::new(MemoryStore::new());
        let tool = AddFavoriteTool::new(store.clone());

        tool.handle(json!({"city": "London"})).await.unwrap();
        tool.handle(json!({"city": "london"})).await.unwrap();
        assert_eq!(
            store.load_favorites().await.unwrap(),
            vec!["London", "london"]
        );
    }
}
