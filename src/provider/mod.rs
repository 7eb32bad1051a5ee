//! Weather Data Provider: the OpenWeather current-conditions API.
//!
//! The dispatcher depends on the [`WeatherProvider`] trait, not on the HTTP
//! client, so tests can substitute a stub without any network access.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::DEFAULT_API_BASE;
use crate::error::{Error, Result};

/// Current conditions for a city, as returned by the provider.
///
/// Transient: created per request and either flattened into a history entry
/// or formatted into result text, never persisted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// City the snapshot was requested for, echoed verbatim.
    pub city: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Condition description, e.g. "light rain".
    pub description: String,
    /// Sunrise time as epoch seconds (UTC).
    pub sunrise: i64,
    /// Sunset time as epoch seconds (UTC).
    pub sunset: i64,
}

/// Source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for a city.
    ///
    /// Unresolvable cities, transport failures and malformed bodies all
    /// surface as [`Error::Provider`]; nothing is retried.
    async fn current(&self, city: &str) -> Result<WeatherSnapshot>;
}

// Wire format of the OpenWeather /data/2.5/weather response, reduced to the
// fields this server consumes.
#[derive(Debug, Deserialize)]
struct CurrentConditions {
    main: MainSection,
    weather: Vec<ConditionSection>,
    sys: SysSection,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    description: String,
}

#[derive(Debug, Deserialize)]
struct SysSection {
    sunrise: i64,
    sunset: i64,
}

/// HTTP client for the OpenWeather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client against the production OpenWeather origin.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the API origin. Used for tests and self-hosted mirrors.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        tracing::debug!(city, %url, "fetching current conditions");

        let response = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| Error::provider(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::provider(format!(
                "OpenWeather returned {status} for '{city}'"
            )));
        }

        let body: CurrentConditions = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("malformed response body: {e}")))?;

        let condition = body
            .weather
            .first()
            .ok_or_else(|| Error::provider("response contained no weather conditions"))?;

        Ok(WeatherSnapshot {
            city: city.to_string(),
            temperature: body.main.temp,
            description: condition.description.clone(),
            sunrise: body.sys.sunrise,
            sunset: body.sys.sunset,
        })
    }
}
