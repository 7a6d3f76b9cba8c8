use crate::buffer::RunBuffer;
use crate::inline::{TextStyle, inline};
use crate::processor::{NodeProcessor, ProcessContext};
use crate::svg::serialize_svg;
use crate::utils::{is_heading_tag, is_inline_tag, trim_blank_edges};
use async_trait::async_trait;
use quire_idf::{BlockProps, ContentNode, Element, Inline, SemanticNode, SvgNode};
use quire_style::{PdfStyle, extract_style_from_attributes};
use std::slice;

/// `p` and `div`.
///
/// A paragraph holding only inline content becomes one text node. One that
/// also holds media or block children is split: text before each such
/// child is flushed into its own node and the child is mapped in place.
#[derive(Debug, Default)]
pub struct ParagraphProcessor;

#[async_trait]
impl NodeProcessor for ParagraphProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("p") || element.is("div")
    }

    async fn process(&self, element: &Element, ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        let overrides = extract_style_from_attributes(element.attr("style"));
        let base = TextStyle::default();

        if !element.element_children().any(breaks_text_flow) {
            let runs = inline(&element.children, &base);
            return paragraph(runs, &overrides).into_iter().collect();
        }

        let mut buffer = RunBuffer::new(|runs: Vec<Inline>| paragraph(runs, &overrides));
        for child in &element.children {
            match child {
                SemanticNode::Text(value) => buffer.push(Inline::Str(value.clone())),
                SemanticNode::Element(el) if el.is("svg") => {
                    buffer.commit([ContentNode::Svg(SvgNode {
                        svg: serialize_svg(el),
                        props: BlockProps::default(),
                    })]);
                }
                SemanticNode::Element(el) if el.is("img") => {
                    buffer.flush();
                    let images = ctx.visit_element(el).await;
                    buffer.commit(images);
                }
                SemanticNode::Element(el) if is_inline_tag(&el.tag) || el.is("code") => {
                    buffer.push_runs(inline(slice::from_ref(child), &base));
                }
                SemanticNode::Element(el) => {
                    buffer.flush();
                    let blocks = ctx.visit_element(el).await;
                    buffer.commit(blocks);
                }
                SemanticNode::Root { .. } => {}
            }
        }
        buffer.finish()
    }
}

/// Children that force the split path.
fn breaks_text_flow(child: &Element) -> bool {
    matches!(
        child.tag.as_str(),
        "img" | "svg" | "ul" | "ol" | "blockquote" | "table" | "div" | "pre"
    ) || is_heading_tag(&child.tag)
}

fn paragraph(mut runs: Vec<Inline>, overrides: &PdfStyle) -> Option<ContentNode> {
    trim_blank_edges(&mut runs);
    if runs.is_empty() {
        return None;
    }
    let mut node = ContentNode::text(runs, "p");
    node.props_mut().overrides = overrides.clone();
    Some(node)
}
