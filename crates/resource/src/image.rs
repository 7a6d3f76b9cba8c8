use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quire_traits::{ImageResolver, ResourceError, ResourceFetcher};
use std::sync::Arc;

/// The image resolver used when the caller does not provide one.
///
/// `data:` URLs pass through untouched, `http(s)` URLs are fetched and
/// inlined as base64 data URLs, and anything else is handed to the
/// rendering engine verbatim.
#[derive(Debug, Clone)]
pub struct DefaultImageResolver {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl DefaultImageResolver {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ImageResolver for DefaultImageResolver {
    async fn resolve(&self, src: &str) -> Result<String, ResourceError> {
        if src.starts_with("data:") {
            return Ok(src.to_string());
        }
        if src.starts_with("http://") || src.starts_with("https://") {
            let bytes = self.fetcher.fetch(src).await?;
            return Ok(to_data_url(&bytes, sniff_mime_type(&bytes, src)));
        }
        Ok(src.to_string())
    }
}

pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Guesses a MIME type from magic bytes, then from the URL's extension.
pub fn sniff_mime_type(bytes: &[u8], url: &str) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => return "image/png",
        [0xFF, 0xD8, 0xFF, ..] => return "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => return "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => return "image/webp",
        _ => {}
    }

    let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
