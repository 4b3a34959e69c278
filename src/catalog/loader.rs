//! Fetching the paintings and bios documents.
//!
//! The paintings document is required: without it there is no quiz. The
//! bios document is best effort; if it cannot be fetched or parsed the
//! catalog is built without bios and the profile card falls back to the
//! fields embedded in each painting.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::fs;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::config::DataSettings;
use crate::domain::{ArtistBio, Painting};

use super::store::Catalog;

/// Catalog load failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Failed to fetch {name}: {message}")]
    Fetch { name: String, message: String },

    #[error("Timed out fetching {name} after {seconds}s")]
    Timeout { name: String, seconds: u64 },

    #[error("Failed to parse {name}: {message}")]
    Parse { name: String, message: String },
}

/// Somewhere JSON documents can be fetched from by name
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Fetch the raw text of a document
    async fn fetch(&self, name: &str) -> Result<String, CatalogError>;
}

/// Documents stored as files in a directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, name: &str) -> Result<String, CatalogError> {
        let path = self.root.join(name);
        fs::read_to_string(&path)
            .await
            .map_err(|e| CatalogError::Fetch {
                name: name.to_string(),
                message: format!("{}: {}", path.display(), e),
            })
    }
}

/// Documents served under an HTTP base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build document URL
    fn document_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch(&self, name: &str) -> Result<String, CatalogError> {
        let url = self.document_url(name);
        let fetch_error = |message: String| CatalogError::Fetch {
            name: name.to_string(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("{} returned {}", url, response.status())));
        }

        response.text().await.map_err(|e| fetch_error(e.to_string()))
    }
}

/// Documents held in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(name.into(), body.into());
        self
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} documents)", self.documents.len())
    }

    async fn fetch(&self, name: &str) -> Result<String, CatalogError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::Fetch {
                name: name.to_string(),
                message: "no such document".to_string(),
            })
    }
}

/// Pick a source for a configured location: http(s) URLs or a directory
pub fn source_for(location: &str) -> Box<dyn DocumentSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(DirectorySource::new(location))
    }
}

async fn fetch_document<T: DeserializeOwned>(
    source: &dyn DocumentSource,
    name: &str,
    limit: Duration,
) -> Result<Vec<T>, CatalogError> {
    let body = timeout(limit, source.fetch(name))
        .await
        .map_err(|_| CatalogError::Timeout {
            name: name.to_string(),
            seconds: limit.as_secs(),
        })??;

    debug!(document = name, bytes = body.len(), "Fetched document");

    serde_json::from_str(&body).map_err(|e| CatalogError::Parse {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Load the catalog: paintings are required, bios are best effort
#[instrument(skip_all, fields(source = %source.describe()))]
pub async fn load_catalog(
    source: &dyn DocumentSource,
    settings: &DataSettings,
) -> Result<Catalog, CatalogError> {
    let limit = settings.fetch_timeout();

    let (paintings, bios) = tokio::join!(
        fetch_document::<Painting>(source, &settings.paintings, limit),
        fetch_document::<ArtistBio>(source, &settings.bios, limit),
    );

    let paintings = paintings?;

    let bios = bios.unwrap_or_else(|e| {
        warn!(error = %e, "Artist bios unavailable, continuing without them");
        Vec::new()
    });

    let catalog = Catalog::new(paintings, bios);
    info!(
        paintings = catalog.len(),
        eligible = catalog.eligible_count(),
        bios = catalog.bios().len(),
        "Catalog loaded"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DataSettings {
        DataSettings {
            location: "memory".to_string(),
            paintings: "paintings.json".to_string(),
            bios: "bios.json".to_string(),
            fetch_timeout_seconds: 5,
        }
    }

    #[test]
    fn test_source_selection() {
        assert_eq!(source_for("https://example.org/data").describe(), "https://example.org/data");
        assert_eq!(source_for("assets/data").describe(), "assets/data");
    }

    #[test]
    fn test_document_url_joins_cleanly() {
        let source = HttpSource::new("https://example.org/data/");
        assert_eq!(
            source.document_url("paintings.json"),
            "https://example.org/data/paintings.json"
        );
    }

    #[tokio::test]
    async fn test_missing_bios_are_not_fatal() {
        let source = MemorySource::new()
            .with_document("paintings.json", r#"[{"artist": "A", "url": "u1"}]"#);

        let catalog = load_catalog(&source, &settings()).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.bios().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_bios_are_not_fatal() {
        let source = MemorySource::new()
            .with_document("paintings.json", r#"[{"artist": "A", "url": "u1"}]"#)
            .with_document("bios.json", "{not json");

        let catalog = load_catalog(&source, &settings()).await.unwrap();
        assert!(catalog.bios().is_empty());
    }

    #[tokio::test]
    async fn test_missing_paintings_are_fatal() {
        let source = MemorySource::new().with_document("bios.json", "[]");

        let err = load_catalog(&source, &settings()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Fetch { ref name, .. } if name == "paintings.json"));
    }

    #[tokio::test]
    async fn test_malformed_paintings_are_fatal() {
        let source = MemorySource::new().with_document("paintings.json", r#"{"artist": "A"}"#);

        let err = load_catalog(&source, &settings()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
