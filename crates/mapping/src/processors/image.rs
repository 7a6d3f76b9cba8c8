use crate::blocks::{IMAGE_MARGIN, image_alt_text, image_unavailable};
use crate::processor::{NodeProcessor, ProcessContext};
use async_trait::async_trait;
use quire_idf::{BlockProps, ContentNode, Element, ImageNode};

/// Resolves `src` through the context's resolver. A failed resolution
/// degrades to the alt text or a placeholder.
#[derive(Debug, Default)]
pub struct ImageProcessor;

#[async_trait]
impl NodeProcessor for ImageProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("img")
    }

    async fn process(&self, element: &Element, ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        let alt = element.attr("alt").unwrap_or_default();
        let Some(src) = element.attr("src").filter(|s| !s.is_empty()) else {
            return if alt.is_empty() {
                Vec::new()
            } else {
                vec![image_alt_text(alt)]
            };
        };

        match ctx.image_resolver().resolve(src).await {
            Ok(data) => vec![ContentNode::Image(ImageNode {
                image: data,
                props: BlockProps {
                    margin: Some(IMAGE_MARGIN),
                    ..Default::default()
                },
            })],
            Err(e) => {
                log::warn!("Failed to resolve image {}: {}", src, e);
                if alt.is_empty() {
                    vec![image_unavailable(src)]
                } else {
                    vec![image_alt_text(alt)]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::ProcessorManager;
    use quire_traits::{FnImageResolver, PassthroughImageResolver, ResourceError};
    use serde_json::json;

    fn img(src: &str, alt: &str) -> Element {
        let mut el = Element::new("img");
        if !src.is_empty() {
            el = el.with_attr("src", src);
        }
        if !alt.is_empty() {
            el = el.with_attr("alt", alt);
        }
        el
    }

    #[tokio::test]
    async fn test_resolved_image_gets_margin() {
        let manager = ProcessorManager::with_defaults();
        let resolver = PassthroughImageResolver;
        let ctx = ProcessContext::new(&manager, &resolver);
        let out = ImageProcessor.process(&img("data:image/png;base64,AA==", ""), &ctx).await;
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!([{"image": "data:image/png;base64,AA==", "margin": [0.0, 4.0, 0.0, 8.0]}])
        );
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_alt_or_placeholder() {
        let manager = ProcessorManager::with_defaults();
        let resolver = FnImageResolver::new(|src: String| async move {
            Err::<String, _>(ResourceError::NotFound(src))
        });
        let ctx = ProcessContext::new(&manager, &resolver);

        let with_alt = ImageProcessor.process(&img("a.png", "A chart"), &ctx).await;
        assert_eq!(with_alt[0].as_text().unwrap().plain_text(), "A chart");

        let without_alt = ImageProcessor.process(&img("a.png", ""), &ctx).await;
        assert_eq!(
            without_alt[0].as_text().unwrap().plain_text(),
            "[image unavailable: a.png]"
        );
    }

    #[tokio::test]
    async fn test_missing_src() {
        let manager = ProcessorManager::with_defaults();
        let resolver = PassthroughImageResolver;
        let ctx = ProcessContext::new(&manager, &resolver);
        assert!(ImageProcessor.process(&img("", ""), &ctx).await.is_empty());
        assert_eq!(ImageProcessor.process(&img("", "alt"), &ctx).await.len(), 1);
    }
}
