//! One conversion request from tree to document definition.

use std::sync::Arc;

use quire_fonts::{FontRegistry, FontResolver};
use quire_idf::SemanticNode;
use quire_mapping::{MapContext, map_tree_to_content};
use quire_resource::{DefaultImageResolver, HttpFetcher};
use quire_style::Stylesheet;
use quire_traits::{ImageResolver, ResourceFetcher};

use crate::document::DocumentDefinition;
use crate::error::PipelineError;
use crate::options::ConversionOptions;

/// Maps trees, resolves their fonts and assembles document definitions.
///
/// Fonts are registered into a shared [`FontRegistry`]. Converters cloned
/// from one another, or built with the same registry, serialize their
/// registration steps.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConversionOptions,
    stylesheet: Stylesheet,
    image_resolver: Option<Arc<dyn ImageResolver>>,
    fetcher: Option<Arc<dyn ResourceFetcher>>,
    registry: FontRegistry,
    offline: bool,
}

impl Converter {
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            options,
            stylesheet: Stylesheet::github(),
            image_resolver: None,
            fetcher: None,
            registry: FontRegistry::new(),
            offline: false,
        }
    }

    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    pub fn with_image_resolver(mut self, resolver: Arc<dyn ImageResolver>) -> Self {
        self.image_resolver = Some(resolver);
        self
    }

    /// Used for images and fonts alike. Defaults to an [`HttpFetcher`].
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ResourceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_registry(mut self, registry: FontRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Never touch the network: no HTTP fetcher is installed and image
    /// sources pass through unresolved unless a resolver is injected.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    fn fetcher(&self) -> Option<Arc<dyn ResourceFetcher>> {
        match &self.fetcher {
            Some(fetcher) => Some(fetcher.clone()),
            None if self.offline => None,
            None => Some(Arc::new(HttpFetcher::new())),
        }
    }

    fn image_resolver(&self, fetcher: Option<&Arc<dyn ResourceFetcher>>) -> Option<Arc<dyn ImageResolver>> {
        if let Some(resolver) = &self.image_resolver {
            return Some(resolver.clone());
        }
        fetcher.map(|f| Arc::new(DefaultImageResolver::new(f.clone())) as Arc<dyn ImageResolver>)
    }

    fn font_resolver(&self, fetcher: Option<Arc<dyn ResourceFetcher>>) -> FontResolver {
        let resolver = FontResolver::new()
            .with_default_cjk(self.options.default_cjk.clone())
            .prefer_offline(self.options.prefer_offline_fonts);
        match fetcher {
            Some(fetcher) => resolver.with_fetcher(fetcher),
            None => resolver,
        }
    }

    /// Converts a tree. Script detection runs on `source_text`, or on the
    /// tree's own text when none is given.
    pub async fn convert(
        &self,
        tree: &SemanticNode,
        source_text: Option<&str>,
    ) -> Result<DocumentDefinition, PipelineError> {
        let fetcher = self.fetcher();
        let ctx = MapContext {
            image_resolver: self.image_resolver(fetcher.as_ref()),
        };
        let content = map_tree_to_content(tree, &ctx).await?;

        let tree_text;
        let text = match source_text {
            Some(text) => text,
            None => {
                tree_text = tree.text_content();
                tree_text.as_str()
            }
        };

        let resolver = self.font_resolver(fetcher);
        let resolved = {
            let _registration = self.registry.registration_lock().await;
            let resolved = resolver
                .resolve(&self.options.fonts, self.options.offline_fonts.as_ref(), Some(text))
                .await;
            resolved.register(&self.registry);
            resolved
        };
        if !resolved.warnings.is_empty() {
            log::info!("Font resolution finished with {} warnings", resolved.warnings.len());
        }

        let mut document = DocumentDefinition::new(content, &self.stylesheet, &self.options);
        document.fonts = self.registry.fonts_snapshot();
        document.default_style.font = resolved.default_font;
        Ok(document)
    }

    /// Converts a HAST JSON tree.
    pub async fn convert_json(
        &self,
        hast_json: &str,
        source_text: Option<&str>,
    ) -> Result<DocumentDefinition, PipelineError> {
        let tree = SemanticNode::from_hast_json(hast_json)?;
        self.convert(&tree, source_text).await
    }
}
