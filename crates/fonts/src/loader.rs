//! Builds `FontResource`s from remote files.

use quire_traits::{ResourceError, ResourceFetcher};
use serde::{Deserialize, Serialize};

use crate::resource::{FontResource, FontVariant};

/// URLs of one family's faces. Only `normal` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontUrlSet {
    pub normal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolditalics: Option<String>,
}

impl FontUrlSet {
    pub fn new(normal: impl Into<String>) -> Self {
        Self {
            normal: normal.into(),
            ..Default::default()
        }
    }

    fn optional(&self) -> [(FontVariant, Option<&str>); 3] {
        [
            (FontVariant::Bold, self.bold.as_deref()),
            (FontVariant::Italics, self.italics.as_deref()),
            (FontVariant::BoldItalics, self.bolditalics.as_deref()),
        ]
    }
}

/// Fetches each face in turn and assembles the family.
///
/// # Errors
///
/// Fails on the first face that cannot be fetched.
pub async fn build_font_resource_from_urls(
    fetcher: &dyn ResourceFetcher,
    family: &str,
    urls: &FontUrlSet,
) -> Result<FontResource, ResourceError> {
    log::debug!("Fetching font {} from {}", family, urls.normal);
    let normal = fetcher.fetch(&urls.normal).await?;
    let mut resource = FontResource::new(family, normal.to_vec());

    for (variant, url) in urls.optional() {
        if let Some(url) = url {
            let data = fetcher.fetch(url).await?;
            resource = resource.with_variant(variant, data.to_vec());
        }
    }
    Ok(resource)
}
