use crate::blocks::horizontal_rule;
use crate::processor::{NodeProcessor, ProcessContext};
use crate::svg::serialize_svg;
use async_trait::async_trait;
use quire_idf::{BlockProps, ContentNode, Element, Inline, SvgNode};

/// A `br` outside any text stream becomes a paragraph holding a newline.
#[derive(Debug, Default)]
pub struct BreakProcessor;

#[async_trait]
impl NodeProcessor for BreakProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("br")
    }

    async fn process(&self, _element: &Element, _ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        vec![ContentNode::text(vec![Inline::Str("\n".to_string())], "p")]
    }
}

#[derive(Debug, Default)]
pub struct HorizontalRuleProcessor;

#[async_trait]
impl NodeProcessor for HorizontalRuleProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("hr")
    }

    async fn process(&self, _element: &Element, _ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        vec![horizontal_rule()]
    }
}

/// Block-level inline SVG, passed to the renderer as markup.
#[derive(Debug, Default)]
pub struct SvgProcessor;

#[async_trait]
impl NodeProcessor for SvgProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("svg")
    }

    async fn process(&self, element: &Element, _ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        vec![ContentNode::Svg(SvgNode {
            svg: serialize_svg(element),
            props: BlockProps::default(),
        })]
    }
}

#[cfg(test)]
mod tests {
    use crate::processors::test_support::*;
    use quire_idf::Element;
    use quire_idf::SemanticNode;
    use serde_json::json;

    #[tokio::test]
    async fn test_break_rule_and_svg() {
        let svg = SemanticNode::Element(Element::new("svg").with_attr("strokeWidth", "2"));
        let out = map_json(vec![el("br", vec![]), el("hr", vec![]), svg]).await;
        assert_eq!(out[0], json!({"text": ["\n"], "style": "p"}));
        assert_eq!(out[1]["canvas"][0]["lineWidth"], json!(3.5));
        assert_eq!(out[1]["margin"], json!([0.0, 0.0, 0.0, 24.0]));
        assert_eq!(out[2], json!({"svg": "<svg stroke-width=\"2\"></svg>"}));
    }
}
