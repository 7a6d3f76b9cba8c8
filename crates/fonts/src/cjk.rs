//! Default CJK typeface acquisition.

use quire_traits::{ResourceError, ResourceFetcher};
use serde::{Deserialize, Serialize};

use crate::loader::{FontUrlSet, build_font_resource_from_urls};
use crate::resource::FontResource;

pub const DEFAULT_CJK_FAMILY: &str = "NotoSansSC";

pub const DEFAULT_CJK_FONT_URL: &str = "https://cdn.jsdelivr.net/gh/googlefonts/noto-cjk@main/Sans/OTF/SimplifiedChinese/NotoSansCJKsc-Regular.otf";

/// Overrides for the family fetched when a document needs CJK glyphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultCjkOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DefaultCjkOptions {
    pub fn family(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_CJK_FAMILY)
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_CJK_FONT_URL)
    }
}

/// Fetches the regular face of the default CJK family.
pub async fn load_default_cjk_font(
    fetcher: &dyn ResourceFetcher,
    options: &DefaultCjkOptions,
) -> Result<FontResource, ResourceError> {
    build_font_resource_from_urls(fetcher, options.family(), &FontUrlSet::new(options.url())).await
}
