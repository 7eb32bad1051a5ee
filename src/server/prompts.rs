//! Prompt Builder: natural-language templates with declared arguments.
//!
//! Pure string templating; no provider or store access.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::server::PromptHandler;
use crate::types::{Content, GetPromptResult, PromptArgument, PromptInfo, PromptMessage, Role};

/// Look up a declared required argument.
fn require<'a>(args: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    args.get(name)
        .map(String::as_str)
        .ok_or_else(|| Error::missing_argument(name))
}

/// Wrap template text in a single user-role message.
fn user_message(description: String, text: String) -> GetPromptResult {
    GetPromptResult {
        description: Some(description),
        messages: vec![PromptMessage {
            role: Role::User,
            content: Content::Text { text },
        }],
    }
}

/// `weather_report`: ask for a full report on one city.
#[derive(Debug)]
pub struct WeatherReportPrompt;

#[async_trait]
impl PromptHandler for WeatherReportPrompt {
    fn info(&self) -> PromptInfo {
        PromptInfo {
            name: "weather_report".into(),
            description: Some("Request a detailed weather report for a city".into()),
            arguments: Some(vec![PromptArgument {
                name: "city".into(),
                description: Some("City to report on".into()),
                required: true,
            }]),
        }
    }

    async fn handle(&self, args: HashMap<String, String>) -> Result<GetPromptResult> {
        let city = require(&args, "city")?;
        Ok(user_message(
            format!("Weather report for {city}"),
            format!(
                "Please give me a weather report for {city}: the current temperature and \
                 conditions, what I should wear, and what outdoor or indoor activities \
                 you would suggest."
            ),
        ))
    }
}

/// `compare_cities`: ask for a comparison across a comma-separated city list.
#[derive(Debug)]
pub struct CompareCitiesPrompt;

#[async_trait]
impl PromptHandler for CompareCitiesPrompt {
    fn info(&self) -> PromptInfo {
        PromptInfo {
            name: "compare_cities".into(),
            description: Some("Compare current weather across several cities".into()),
            arguments: Some(vec![PromptArgument {
                name: "cities".into(),
                description: Some("Comma-separated city names".into()),
                required: true,
            }]),
        }
    }

    async fn handle(&self, args: HashMap<String, String>) -> Result<GetPromptResult> {
        let cities = require(&args, "cities")?;
        Ok(user_message(
            format!("Weather comparison for {cities}"),
            format!(
                "Compare the current temperature and conditions in the following cities: \
                 {cities}. Conclude with which city is best for outdoor activity right now."
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_weather_report_embeds_city() {
        let args = HashMap::from([("city".to_string(), "Lisbon".to_string())]);
        let result = WeatherReportPrompt.handle(args).await.unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].role, Role::User);
        let Content::Text { text } = &result.messages[0].content;
        assert!(text.contains("Lisbon"));
        assert!(text.contains("wear"));
    }

    #[tokio::test]
    async fn test_compare_cities_embeds_list() {
        let args = HashMap::from([("cities".to_string(), "Oslo, Rome, Cairo".to_string())]);
        let result = CompareCitiesPrompt.handle(args).await.unwrap();
        let Content::Text { text } = &result.messages[0].content;
        assert!(text.contains("Oslo, Rome, Cairo"));
        assert!(text.contains("outdoor activity"));
    }

    #[tokio::test]
    async fn test_missing_argument() {
        let err = WeatherReportPrompt.handle(HashMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::MissingArgument(ref name) if name == "city"));

        let err = CompareCitiesPrompt.handle(HashMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::MissingArgument(ref name) if name == "cities"));
    }
}
