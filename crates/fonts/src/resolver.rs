//! Resolves every font source of a conversion into one complete config.

use std::sync::Arc;

use quire_traits::ResourceFetcher;

use crate::cjk::{DefaultCjkOptions, load_default_cjk_font};
use crate::detect::{RequiredFontTypes, covers_cjk, detect_required_font_types, select_best_font};
use crate::fallback::{
    FontFallbackConfig, complete_definitions, create_font_fallback, merge_font_configs, merge_with_priority,
    resolve_font_fallback,
};
use crate::offline::{OfflineFontsOptions, ProcessedOfflineFonts, process_offline_fonts};
use crate::registry::FontRegistry;
use crate::resource::{FontResource, OfflineFontConfig, config_from_resources};

/// Combines explicit resources, an offline bundle and, when the text needs
/// it, a network-fetched CJK family.
#[derive(Debug, Clone)]
pub struct FontResolver {
    fetcher: Option<Arc<dyn ResourceFetcher>>,
    default_cjk: DefaultCjkOptions,
    prefer_offline: bool,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self {
            fetcher: None,
            default_cjk: DefaultCjkOptions::default(),
            prefer_offline: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFonts {
    pub config: OfflineFontConfig,
    pub default_font: Option<String>,
    pub warnings: Vec<String>,
    pub required: RequiredFontTypes,
    /// A CJK family was fetched over the network for this document.
    pub cjk_acquired: bool,
}

impl ResolvedFonts {
    pub fn register(&self, registry: &FontRegistry) {
        registry.register(&self.config);
    }
}

impl FontResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Without a fetcher no network fonts are acquired.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ResourceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_default_cjk(mut self, options: DefaultCjkOptions) -> Self {
        self.default_cjk = options;
        self
    }

    /// Whether local fonts win family and file collisions with fetched ones.
    pub fn prefer_offline(mut self, prefer: bool) -> Self {
        self.prefer_offline = prefer;
        self
    }

    /// Never fails: every problem degrades to a warning and a smaller font set.
    pub async fn resolve(
        &self,
        fonts: &[FontResource],
        offline: Option<&OfflineFontsOptions>,
        source_text: Option<&str>,
    ) -> ResolvedFonts {
        let mut warnings = Vec::new();

        let processed = match offline {
            Some(options) => match process_offline_fonts(options, source_text).await {
                Ok(processed) => Some(processed),
                Err(e) => {
                    log::warn!("Offline fonts rejected, continuing without them: {}", e);
                    warnings.push(format!("Offline fonts ignored: {}", e));
                    None
                }
            },
            None => None,
        };
        let disable_network = offline.is_some_and(|o| o.disable_network_fonts);

        let explicit = config_from_resources(fonts);
        let local = match &processed {
            Some(p) => {
                warnings.extend(p.warnings.iter().cloned());
                merge_font_configs(&[&explicit, &p.config])
            }
            None => explicit,
        };

        let required = detect_required_font_types(source_text.unwrap_or_default());
        let network = if required.needs_cjk && !local.available_fonts.iter().any(|f| covers_cjk(f)) {
            self.acquire_cjk(disable_network, &mut warnings).await
        } else {
            None
        };
        let cjk_acquired = network.is_some();

        let merged = match &network {
            Some(network) if self.prefer_offline => merge_with_priority(&local, network),
            Some(network) => merge_with_priority(network, &local),
            None => local,
        };

        let (font_definitions, dropped) = complete_definitions(&merged.font_definitions, &merged.vfs);
        warnings.extend(dropped);
        let config = OfflineFontConfig {
            available_fonts: font_definitions.keys().cloned().collect(),
            font_definitions,
            vfs: merged.vfs,
        };

        let default_font = self.default_font(&config, &required, cjk_acquired, processed.as_ref());
        ResolvedFonts {
            config,
            default_font,
            warnings,
            required,
            cjk_acquired,
        }
    }

    async fn acquire_cjk(&self, disable_network: bool, warnings: &mut Vec<String>) -> Option<OfflineFontConfig> {
        if disable_network {
            log::warn!("Text needs CJK glyphs but network fonts are disabled");
            warnings.push("CJK text detected but no CJK font is available offline".to_string());
            return None;
        }
        let Some(fetcher) = &self.fetcher else {
            log::debug!("No fetcher configured, skipping CJK font acquisition");
            return None;
        };
        match load_default_cjk_font(fetcher.as_ref(), &self.default_cjk).await {
            Ok(resource) => {
                log::info!("Loaded CJK font {}", resource.family);
                Some(config_from_resources(&[resource]))
            }
            Err(e) => {
                log::warn!("Failed to load CJK font {}: {}", self.default_cjk.family(), e);
                warnings.push(format!("CJK font unavailable: {}", e));
                None
            }
        }
    }

    fn default_font(
        &self,
        config: &OfflineFontConfig,
        required: &RequiredFontTypes,
        cjk_acquired: bool,
        processed: Option<&ProcessedOfflineFonts>,
    ) -> Option<String> {
        let cjk_family = self.default_cjk.family();
        let best = select_best_font(required, &config.available_fonts, Some(cjk_family));
        let requested = Some(cjk_family)
            .filter(|f| cjk_acquired && config.has_family(f))
            .or_else(|| processed.and_then(|p| p.recommended_default_font.as_deref()))
            .or(best.as_deref())?;
        let chain = if required.needs_cjk {
            FontFallbackConfig {
                primary_font: best.clone(),
                ..FontFallbackConfig::cjk()
            }
        } else {
            create_font_fallback(config, best.as_deref())
        };
        // Only registered families qualify.
        let chain = FontFallbackConfig {
            allow_system_fonts: false,
            ..chain
        };
        match resolve_font_fallback(requested, config, &chain) {
            Ok(family) => Some(family),
            Err(e) => {
                log::debug!("No default font for {}: {}", requested, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cjk::DEFAULT_CJK_FONT_URL;
    use crate::resource::Vfs;
    use quire_traits::InMemoryFetcher;

    fn fetcher_with_cjk() -> Arc<InMemoryFetcher> {
        Arc::new(InMemoryFetcher::new().with(DEFAULT_CJK_FONT_URL, vec![4, 2]).unwrap())
    }

    fn resolver(fetcher: &Arc<InMemoryFetcher>) -> FontResolver {
        FontResolver::new().with_fetcher(fetcher.clone())
    }

    #[tokio::test]
    async fn test_cjk_text_triggers_fetch() {
        let fetcher = fetcher_with_cjk();
        let resolved = resolver(&fetcher).resolve(&[], None, Some("你好 world")).await;

        assert!(resolved.required.needs_cjk);
        assert!(resolved.cjk_acquired);
        assert_eq!(fetcher.requests(), [DEFAULT_CJK_FONT_URL]);
        assert_eq!(resolved.default_font.as_deref(), Some("NotoSansSC"));
        assert!(resolved.config.font_definitions["NotoSansSC"].is_complete(&resolved.config.vfs));
    }

    #[tokio::test]
    async fn test_latin_text_never_fetches() {
        let fetcher = fetcher_with_cjk();
        let fonts = [FontResource::new("Inter", vec![1])];
        let resolved = resolver(&fetcher).resolve(&fonts, None, Some("plain text")).await;

        assert!(fetcher.requests().is_empty());
        assert!(!resolved.cjk_acquired);
        assert_eq!(resolved.default_font.as_deref(), Some("Inter"));
    }

    #[tokio::test]
    async fn test_offline_cjk_family_skips_fetch() {
        let fetcher = fetcher_with_cjk();
        let vfs: Vfs = [("NotoSansJP-Regular.otf".to_string(), "AAEC".to_string())].into_iter().collect();
        let offline = OfflineFontsOptions::new(vfs);
        let resolved = resolver(&fetcher).resolve(&[], Some(&offline), Some("日本語")).await;

        assert!(fetcher.requests().is_empty());
        assert_eq!(resolved.default_font.as_deref(), Some("NotoSansJP"));
    }

    #[tokio::test]
    async fn test_disabled_network_and_fetch_failure_degrade() {
        let fetcher = fetcher_with_cjk();
        let offline = OfflineFontsOptions::default().offline_only();
        let resolved = resolver(&fetcher).resolve(&[], Some(&offline), Some("中文")).await;
        assert!(fetcher.requests().is_empty());
        assert_eq!(resolved.warnings.len(), 1);
        assert_eq!(resolved.default_font, None);

        let empty = Arc::new(InMemoryFetcher::new());
        let fonts = [FontResource::new("Inter", vec![1])];
        let resolved = resolver(&empty).resolve(&fonts, None, Some("中文")).await;
        assert!(!resolved.cjk_acquired);
        assert_eq!(resolved.default_font.as_deref(), Some("Inter"));
        assert!(resolved.warnings[0].contains("CJK font unavailable"));
    }

    #[tokio::test]
    async fn test_invalid_offline_bundle_is_ignored() {
        let vfs: Vfs = [("Bad-Regular.ttf".to_string(), "***".to_string())].into_iter().collect();
        let fonts = [FontResource::new("Inter", vec![1])];
        let resolved = FontResolver::new()
            .resolve(&fonts, Some(&OfflineFontsOptions::new(vfs)), None)
            .await;

        assert_eq!(resolved.config.available_fonts, ["Inter"]);
        assert!(resolved.warnings[0].starts_with("Offline fonts ignored"));
    }

    #[tokio::test]
    async fn test_merge_priority_flag() {
        let fetcher = fetcher_with_cjk();
        let fonts = [FontResource::new("NotoSansSC", vec![1])];
        let vfs: Vfs = [("Other-Regular.ttf".to_string(), "AAEC".to_string())].into_iter().collect();
        let offline = OfflineFontsOptions::new(vfs);

        // An explicit NotoSansSC already covers CJK, so nothing is fetched.
        let resolved = resolver(&fetcher).resolve(&fonts, Some(&offline), Some("中文")).await;
        assert!(!resolved.cjk_acquired);
        assert_eq!(resolved.config.vfs["NotoSansSC-Regular.ttf"], "AQ==");

        let fonts = [FontResource::new("Latin", vec![1])];
        let network_first = resolver(&fetcher).prefer_offline(false);
        let resolved = network_first.resolve(&fonts, None, Some("中文")).await;
        assert_eq!(resolved.config.available_fonts, ["NotoSansSC", "Latin"]);

        let offline_first = resolver(&fetcher).resolve(&fonts, None, Some("中文")).await;
        assert_eq!(offline_first.config.available_fonts, ["Latin", "NotoSansSC"]);
    }

    #[tokio::test]
    async fn test_register_into_registry() {
        let registry = FontRegistry::new();
        let resolved = FontResolver::new()
            .resolve(&[FontResource::new("Inter", vec![1])], None, None)
            .await;
        resolved.register(&registry);
        assert_eq!(registry.families(), ["Inter"]);
    }

    #[tokio::test]
    async fn test_default_font_comes_from_registered_families() {
        let resolved = FontResolver::new().resolve(&[], None, Some("plain text")).await;
        assert_eq!(resolved.default_font, None);

        let vfs: Vfs = [("Mono-Regular.ttf".to_string(), "AAEC".to_string())].into_iter().collect();
        let fonts = [FontResource::new("Latin", vec![1])];
        let resolved = FontResolver::new()
            .resolve(&fonts, Some(&OfflineFontsOptions::new(vfs)), Some("plain text"))
            .await;
        let default = resolved.default_font.unwrap();
        assert!(resolved.config.has_family(&default));
    }
}
