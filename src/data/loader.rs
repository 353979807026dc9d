//! One-shot dataset fetch.
//!
//! Loading either fully succeeds or fails with [`MapError::DatasetLoad`]; there
//! is no retry and nothing is rendered from a partial dataset.

use crate::data::geojson::QuakeCollection;
use crate::{MapError, Result};
use async_trait::async_trait;
use futures::TryFutureExt;
use once_cell::sync::Lazy;

/// Shared async HTTP client for dataset downloads
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Fetches the raw dataset text from some location.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<String>;
}

/// Reads datasets from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

#[async_trait]
impl DatasetLoader for FileLoader {
    async fn fetch(&self, location: &str) -> Result<String> {
        #[cfg(feature = "tokio-runtime")]
        let text = tokio::fs::read_to_string(location).await?;
        #[cfg(not(feature = "tokio-runtime"))]
        let text = std::fs::read_to_string(location)?;
        Ok(text)
    }
}

/// Downloads datasets over HTTP(S).
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpLoader;

#[async_trait]
impl DatasetLoader for HttpLoader {
    async fn fetch(&self, location: &str) -> Result<String> {
        let response = HTTP_CLIENT.get(location).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Whether a location should be fetched over the network.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Loads and parses the dataset at `location` with the matching loader.
pub async fn load_dataset(location: &str, magnitude_property: &str) -> Result<QuakeCollection> {
    if is_remote(location) {
        load_with(&HttpLoader, location, magnitude_property).await
    } else {
        load_with(&FileLoader, location, magnitude_property).await
    }
}

/// Loads and parses the dataset at `location` through `loader`.
pub async fn load_with(
    loader: &dyn DatasetLoader,
    location: &str,
    magnitude_property: &str,
) -> Result<QuakeCollection> {
    log::info!("loading dataset from {}", location);

    let text = loader
        .fetch(location)
        .map_err(|e| MapError::dataset_load(location, e))
        .await?;

    let collection = QuakeCollection::from_geojson_str(&text, magnitude_property)
        .map_err(|e| MapError::dataset_load(location, e))?;

    log::info!(
        "loaded {} quakes from {} ({} features skipped)",
        collection.len(),
        location,
        collection.skipped()
    );
    Ok(collection)
}
