use async_trait::async_trait;
use quire_traits::{ResourceError, ResourceFetcher, SharedResourceData};
use std::sync::Arc;

/// Fetches resources over HTTP(S).
///
/// Non-success status codes are reported as [`ResourceError::Http`].
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (timeouts, proxies, headers).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn load_failed(url: &str, err: reqwest::Error) -> ResourceError {
    ResourceError::LoadFailed {
        path: url.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<SharedResourceData, ResourceError> {
        log::debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| load_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| load_failed(url, e))?;
        log::debug!("Fetched {} ({} bytes)", url, bytes.len());
        Ok(Arc::new(bytes.to_vec()))
    }

    fn name(&self) -> &'static str {
        "HttpFetcher"
    }
}
