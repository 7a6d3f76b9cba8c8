//! Offline font bundles: validation, family detection and the recommended
//! default family.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Deserializer};

use crate::detect::{detect_fonts_from_vfs, detect_required_font_types, select_best_font};
use crate::error::FontError;
use crate::fallback::complete_definitions;
use crate::resource::{FontDefinitions, OfflineFontConfig, Vfs};
use crate::vfs::{validate_font_definitions, validate_vfs, validate_vfs_consistency};

/// Where an offline bundle's VFS comes from.
#[derive(Clone)]
pub enum VfsSource {
    Inline(Vfs),
    Factory(Arc<dyn Fn() -> Vfs + Send + Sync>),
    AsyncFactory(Arc<dyn Fn() -> BoxFuture<'static, Vfs> + Send + Sync>),
}

impl VfsSource {
    pub async fn load(&self) -> Vfs {
        match self {
            VfsSource::Inline(vfs) => vfs.clone(),
            VfsSource::Factory(factory) => factory(),
            VfsSource::AsyncFactory(factory) => factory().await,
        }
    }
}

impl Default for VfsSource {
    fn default() -> Self {
        VfsSource::Inline(Vfs::new())
    }
}

impl fmt::Debug for VfsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsSource::Inline(vfs) => f.debug_tuple("Inline").field(&vfs.len()).finish(),
            VfsSource::Factory(_) => f.write_str("Factory(..)"),
            VfsSource::AsyncFactory(_) => f.write_str("AsyncFactory(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for VfsSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vfs::deserialize(deserializer).map(VfsSource::Inline)
    }
}

impl From<Vfs> for VfsSource {
    fn from(vfs: Vfs) -> Self {
        VfsSource::Inline(vfs)
    }
}

/// A user-supplied font bundle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineFontsOptions {
    #[serde(default)]
    pub vfs: VfsSource,
    #[serde(default)]
    pub font_definitions: Option<FontDefinitions>,
    #[serde(default)]
    pub default_cjk_font: Option<String>,
    #[serde(default)]
    pub disable_network_fonts: bool,
}

impl OfflineFontsOptions {
    pub fn new(vfs: impl Into<VfsSource>) -> Self {
        Self {
            vfs: vfs.into(),
            ..Default::default()
        }
    }

    pub fn with_definitions(mut self, definitions: FontDefinitions) -> Self {
        self.font_definitions = Some(definitions);
        self
    }

    pub fn with_default_cjk_font(mut self, family: impl Into<String>) -> Self {
        self.default_cjk_font = Some(family.into());
        self
    }

    pub fn offline_only(mut self) -> Self {
        self.disable_network_fonts = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedOfflineFonts {
    pub config: OfflineFontConfig,
    pub recommended_default_font: Option<String>,
    pub disable_network_fonts: bool,
    pub warnings: Vec<String>,
}

/// Validates a bundle and turns it into a complete `OfflineFontConfig`.
///
/// Families are detected from file names when no definitions are given.
/// Definitions pointing at missing files are repaired by backfill and
/// reported in `warnings`; families left without a normal face are dropped.
///
/// # Errors
///
/// Returns `FontError::InvalidBundle` when a VFS payload is not base64 or a
/// supplied definition lacks a family name or normal face.
pub async fn process_offline_fonts(
    options: &OfflineFontsOptions,
    source_text: Option<&str>,
) -> Result<ProcessedOfflineFonts, FontError> {
    let vfs = options.vfs.load().await;
    if !validate_vfs(&vfs) {
        return Err(FontError::InvalidBundle(
            "VFS entries must be non-empty base64 strings".to_string(),
        ));
    }

    let mut warnings = Vec::new();
    let definitions = match &options.font_definitions {
        Some(definitions) => {
            if !validate_font_definitions(definitions) {
                return Err(FontError::InvalidBundle(
                    "every font definition needs a family name and a normal file".to_string(),
                ));
            }
            let consistency = validate_vfs_consistency(&vfs, definitions);
            if !consistency.is_valid {
                log::warn!(
                    "Offline font definitions reference missing files: {}",
                    consistency.missing_files.join(", ")
                );
                warnings.push(format!(
                    "Missing font files: {}",
                    consistency.missing_files.join(", ")
                ));
            }
            definitions.clone()
        }
        None => {
            let detected = detect_fonts_from_vfs(&vfs);
            log::debug!("Detected {} font families in offline VFS", detected.available_fonts.len());
            detected.font_definitions
        }
    };

    let (font_definitions, dropped) = complete_definitions(&definitions, &vfs);
    warnings.extend(dropped);

    let config = OfflineFontConfig {
        available_fonts: font_definitions.keys().cloned().collect(),
        font_definitions,
        vfs,
    };
    let recommended_default_font = recommend_default_font(&config, options, source_text);

    Ok(ProcessedOfflineFonts {
        config,
        recommended_default_font,
        disable_network_fonts: options.disable_network_fonts,
        warnings,
    })
}

fn recommend_default_font(
    config: &OfflineFontConfig,
    options: &OfflineFontsOptions,
    source_text: Option<&str>,
) -> Option<String> {
    if let Some(cjk) = options.default_cjk_font.as_deref().filter(|f| config.has_family(f)) {
        return Some(cjk.to_string());
    }
    if let Some(text) = source_text {
        let required = detect_required_font_types(text);
        return select_best_font(&required, &config.available_fonts, options.default_cjk_font.as_deref());
    }
    config.available_fonts.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::FontDefinition;
    use futures::FutureExt;

    fn bundle(files: &[&str]) -> Vfs {
        files.iter().map(|f| (f.to_string(), "AAEC".to_string())).collect()
    }

    #[tokio::test]
    async fn test_regular_only_bundle_is_backfilled() {
        let options = OfflineFontsOptions::new(bundle(&["MyFont-Regular.ttf"]));
        let processed = process_offline_fonts(&options, None).await.unwrap();

        let def = &processed.config.font_definitions["MyFont"];
        assert_eq!(def.normal, "MyFont-Regular.ttf");
        assert_eq!(def.bold.as_deref(), Some("MyFont-Regular.ttf"));
        assert_eq!(def.italics.as_deref(), Some("MyFont-Regular.ttf"));
        assert_eq!(def.bolditalics.as_deref(), Some("MyFont-Regular.ttf"));
        assert_eq!(processed.recommended_default_font.as_deref(), Some("MyFont"));
        assert!(processed.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_non_base64_payload_rejects_bundle() {
        let mut vfs = bundle(&["A-Regular.ttf"]);
        vfs.insert("B-Regular.ttf".into(), "not base64!".into());
        let err = process_offline_fonts(&OfflineFontsOptions::new(vfs), None).await;
        assert!(matches!(err, Err(FontError::InvalidBundle(_))));
    }

    #[tokio::test]
    async fn test_definition_without_normal_rejects_bundle() {
        let mut defs = FontDefinitions::new();
        defs.insert("A".into(), FontDefinition::new(""));
        let options = OfflineFontsOptions::new(bundle(&["A-Regular.ttf"])).with_definitions(defs);
        assert!(matches!(
            process_offline_fonts(&options, None).await,
            Err(FontError::InvalidBundle(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_files_warn_and_drop_family() {
        let mut defs = FontDefinitions::new();
        defs.insert("Ghost".into(), FontDefinition::new("Ghost-Regular.ttf"));
        let mut partial = FontDefinition::new("Real-Regular.ttf");
        partial.bold = Some("Real-Bold.ttf".into());
        defs.insert("Real".into(), partial);

        let options = OfflineFontsOptions::new(bundle(&["Real-Regular.ttf"])).with_definitions(defs);
        let processed = process_offline_fonts(&options, None).await.unwrap();

        assert_eq!(processed.config.available_fonts, ["Real"]);
        assert_eq!(
            processed.config.font_definitions["Real"].bold.as_deref(),
            Some("Real-Regular.ttf")
        );
        assert_eq!(processed.warnings.len(), 2);
    }

    #[tokio::test]
    async fn test_recommendation_prefers_cjk_for_cjk_text() {
        let vfs = bundle(&["Inter-Regular.ttf", "NotoSansSC-Regular.otf"]);
        let options = OfflineFontsOptions::new(vfs);

        let latin = process_offline_fonts(&options, Some("hello")).await.unwrap();
        assert_eq!(latin.recommended_default_font.as_deref(), Some("Inter"));

        let cjk = process_offline_fonts(&options, Some("你好")).await.unwrap();
        assert_eq!(cjk.recommended_default_font.as_deref(), Some("NotoSansSC"));

        let pinned = OfflineFontsOptions::new(bundle(&["Inter-Regular.ttf", "Mincho-Regular.ttf"]))
            .with_default_cjk_font("Mincho");
        let pinned = process_offline_fonts(&pinned, Some("hello")).await.unwrap();
        assert_eq!(pinned.recommended_default_font.as_deref(), Some("Mincho"));
    }

    #[tokio::test]
    async fn test_factory_sources() {
        let sync = OfflineFontsOptions::new(VfsSource::Factory(Arc::new(|| bundle(&["S-Regular.ttf"]))));
        let processed = process_offline_fonts(&sync, None).await.unwrap();
        assert_eq!(processed.config.available_fonts, ["S"]);

        let source = VfsSource::AsyncFactory(Arc::new(|| async { bundle(&["Lazy-Regular.ttf"]) }.boxed()));
        let processed = process_offline_fonts(&OfflineFontsOptions::new(source).offline_only(), None)
            .await
            .unwrap();
        assert_eq!(processed.config.available_fonts, ["Lazy"]);
        assert!(processed.disable_network_fonts);
    }

    #[test]
    fn test_options_deserialize_from_camel_case() {
        let options: OfflineFontsOptions = serde_json::from_value(serde_json::json!({
            "vfs": { "A-Regular.ttf": "AAEC" },
            "defaultCjkFont": "A",
            "disableNetworkFonts": true
        }))
        .unwrap();
        assert!(matches!(&options.vfs, VfsSource::Inline(v) if v.len() == 1));
        assert_eq!(options.default_cjk_font.as_deref(), Some("A"));
        assert!(options.disable_network_fonts);
        assert!(options.font_definitions.is_none());
    }
}
