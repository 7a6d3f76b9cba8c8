//! ResourceFetcher trait for abstracting byte acquisition.
//!
//! Images and fonts are fetched through this seam so the engine can run
//! against the network, a cache, or pre-populated memory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Request for '{url}' failed with HTTP status {status}")]
    Http { url: String, status: u16 },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

#[async_trait]
pub trait ResourceFetcher: Send + Sync + Debug {
    /// Fetch the bytes behind a URL.
    async fn fetch(&self, url: &str) -> Result<SharedResourceData, ResourceError>;

    /// Returns a human-readable name for this fetcher (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A fetcher that serves pre-populated bytes and records every request.
///
/// Works without a network, which makes it the fetcher of choice for
/// offline runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    resources: RwLock<HashMap<String, SharedResourceData>>,
    requests: RwLock<Vec<String>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, url: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let url = url.into();
        let mut resources = self
            .resources
            .write()
            .map_err(|_| ResourceError::LoadFailed {
                path: url.clone(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources.insert(url, Arc::new(data));
        Ok(())
    }

    /// Builder-style [`add`](Self::add) for fixtures.
    pub fn with(self, url: impl Into<String>, data: Vec<u8>) -> Result<Self, ResourceError> {
        self.add(url, data)?;
        Ok(self)
    }

    /// Every URL requested so far, in order.
    ///
    /// Returns an empty list if the lock is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().map(|r| r.clone()).unwrap_or_default()
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.resources.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

#[async_trait]
impl ResourceFetcher for InMemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<SharedResourceData, ResourceError> {
        if let Ok(mut requests) = self.requests.write() {
            requests.push(url.to_string());
        }
        let resources = self
            .resources
            .read()
            .map_err(|_| ResourceError::LoadFailed {
                path: url.to_string(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources
            .get(url)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(url.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryFetcher"
    }
}
