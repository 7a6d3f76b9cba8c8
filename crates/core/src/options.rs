//! Per-conversion configuration.

use std::path::Path;

use quire_fonts::{DefaultCjkOptions, FontResource, OfflineFontsOptions};
use quire_style::{Margins, PageOrientation, PageSize};
use serde::Deserialize;

use crate::error::PipelineError;

/// Everything a conversion can be configured with from JSON.
///
/// Runtime collaborators such as image resolvers and VFS factories are set
/// on the [`Converter`](crate::Converter) instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionOptions {
    pub page_size: PageSize,
    /// `[left, top, right, bottom]` in points.
    pub page_margins: Margins,
    pub page_orientation: PageOrientation,
    pub fonts: Vec<FontResource>,
    pub offline_fonts: Option<OfflineFontsOptions>,
    /// Offline and explicit fonts win collisions with network fonts.
    pub prefer_offline_fonts: bool,
    pub default_cjk: DefaultCjkOptions,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            page_margins: Margins::page_default(),
            page_orientation: PageOrientation::default(),
            fonts: Vec::new(),
            offline_fonts: None,
            prefer_offline_fonts: true,
            default_cjk: DefaultCjkOptions::default(),
        }
    }
}

impl ConversionOptions {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
