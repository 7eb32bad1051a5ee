//! Process configuration sourced from the environment.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default OpenWeather API origin.
pub const DEFAULT_API_BASE: &str = "https://api.openweathermap.org";

/// Default directory holding the persisted JSON collections.
pub const DEFAULT_DATA_DIR: &str = "weather_data";

/// Runtime configuration for the weather server.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeather API key. Required; the process refuses to start without it.
    pub api_key: String,
    /// OpenWeather API origin. Overridable for tests via `OPENWEATHER_API_BASE`.
    pub api_base: String,
    /// Directory containing `history.json` and `favorites.json`.
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Fails with [`Error::Config`] if `OPENWEATHER_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::config("OPENWEATHER_API_KEY is not set"))?;

        let api_base =
            env::var("OPENWEATHER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let data_dir = env::var("WEATHER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            api_key,
            api_base,
            data_dir,
        })
    }

    /// Path of the history collection.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }

    /// Path of the favorites collection.
    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join("favorites.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-wide, so all cases run in one test.
    #[test]
    fn test_from_env() {
        env::remove_var("OPENWEATHER_API_KEY");
        env::remove_var("OPENWEATHER_API_BASE");
        env::remove_var("WEATHER_DATA_DIR");
        assert!(matches!(Config::from_env(), Err(Error::Config(_))));

        env::set_var("OPENWEATHER_API_KEY", "");
        assert!(matches!(Config::from_env(), Err(Error::Config(_))));

        env::set_var("OPENWEATHER_API_KEY", "test-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.history_path(), PathBuf::from("weather_data/history.json"));
        assert_eq!(
            config.favorites_path(),
            PathBuf::from("weather_data/favorites.json")
        );

        env::set_var("OPENWEATHER_API_BASE", "http://127.0.0.1:9999");
        env::set_var("WEATHER_DATA_DIR", "/tmp/wx");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:9999");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/wx"));

        env::remove_var("OPENWEATHER_API_KEY");
        env::remove_var("OPENWEATHER_API_BASE");
        env::remove_var("WEATHER_DATA_DIR");
    }
}
