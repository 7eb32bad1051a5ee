//! Resource Reader: virtual addresses over the persistent store.
//!
//! Reads go through the store on every call; nothing is cached, so the
//! content always reflects the latest on-disk state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::server::ResourceHandler;
use crate::storage::WeatherStore;
use crate::types::{ListResourcesResult, ReadResourceResult, ResourceContents, ResourceInfo};

/// Virtual address of the history log.
pub const HISTORY_URI: &str = "weather://history";

/// Virtual address of the favorites set.
pub const FAVORITES_URI: &str = "weather://favorites";

const JSON_MIME: &str = "application/json";

/// Resolves the two weather resources against the store.
pub struct StoreResources {
    store: Arc<dyn WeatherStore>,
}

impl StoreResources {
    /// Create the resource reader over a store.
    pub fn new(store: Arc<dyn WeatherStore>) -> Self {
        Self { store }
    }

    fn contents(uri: &str, text: String) -> ReadResourceResult {
        ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: Some(JSON_MIME.to_string()),
                text: Some(text),
            }],
        }
    }
}

impl std::fmt::Debug for StoreResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreResources").finish_non_exhaustive()
    }
}

#[async_trait]
impl ResourceHandler for StoreResources {
    async fn list(&self) -> Result<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                ResourceInfo {
                    uri: HISTORY_URI.to_string(),
                    name: "Weather Query History".to_string(),
                    description: Some("Past weather queries in call order".to_string()),
                    mime_type: Some(JSON_MIME.to_string()),
                },
                ResourceInfo {
                    uri: FAVORITES_URI.to_string(),
                    name: "Favorite Cities".to_string(),
                    description: Some("Saved city names, most recent last".to_string()),
                    mime_type: Some(JSON_MIME.to_string()),
                },
            ],
            next_cursor: None,
        })
    }

    async fn read(&self, uri: &str) -> Result<ReadResourceResult> {
        // Serialized with the same serializer FileStore persists with, so a
        // read always equals the latest successful write.
        match uri {
            HISTORY_URI => {
                let history = self.store.load_history().await?;
                Ok(Self::contents(uri, serde_json::to_string_pretty(&history)?))
            },
            FAVORITES_URI => {
                let favorites = self.store.load_favorites().await?;
                Ok(Self::contents(
                    uri,
                    serde_json::to_string_pretty(&favorites)?,
                ))
            },
            other => Err(Error::unknown_resource(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_list_is_stable() {
        let reader = StoreResources::new(Arc::new(MemoryStore::new()));
        let first = reader.list().await.unwrap();
        let second = reader.list().await.unwrap();
        assert_eq!(first.resources, second.resources);
        assert_eq!(first.resources[0].uri, HISTORY_URI);
        assert_eq!(first.resources[1].uri, FAVORITES_URI);
    }

    #[tokio::test]
    async fn test_read_reflects_store_state() {
        let store = Arc::new(MemoryStore::new());
        let reader = StoreResources::new(store.clone());

        let result = reader.read(FAVORITES_URI).await.unwrap();
        assert_eq!(result.contents[0].text.as_deref(), Some("[]"));

        store
            .save_favorites(&["Paris".to_string(), "Oslo".to_string()])
            .await
            .unwrap();
        let result = reader.read(FAVORITES_URI).await.unwrap();
        let favorites: Vec<String> =
            serde_json::from_str(result.contents[0].text.as_deref().unwrap()).unwrap();
        assert_eq!(favorites, vec!["Paris", "Oslo"]);
    }

    #[tokio::test]
    async fn test_unknown_uri() {
        let reader = StoreResources::new(Arc::new(MemoryStore::new()));
        let err = reader.read("weather://moonphase").await.unwrap_err();
        assert!(matches!(err, Error::UnknownResource(_)));
    }
}
