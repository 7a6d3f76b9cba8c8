use crate::processor::{NodeProcessor, ProcessContext};
use async_trait::async_trait;
use quire_idf::{BlockProps, ContentNode, Element, SemanticNode, TableBody, TableNode};
use quire_style::Margins;

const QUOTE_STYLE: &str = "blockquote";
const DEFAULT_MARGIN: Margins = Margins::new(8.0, 2.0, 0.0, 2.0);

/// Maps every child through the dispatcher, tags the results as quoted
/// and wraps them in a single-cell table drawn with the quote bar.
/// A quote with no visible content emits nothing.
#[derive(Debug, Default)]
pub struct BlockquoteProcessor;

#[async_trait]
impl NodeProcessor for BlockquoteProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("blockquote")
    }

    async fn process(&self, element: &Element, ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        let mut inner = Vec::new();
        for child in &element.children {
            match child {
                SemanticNode::Text(value) => {
                    let text = value.trim();
                    if !text.is_empty() {
                        inner.push(
                            ContentNode::text(text, QUOTE_STYLE).with_margin(Margins::new(0.0, 2.0, 0.0, 2.0)),
                        );
                    }
                }
                SemanticNode::Element(el) => {
                    inner.extend(ctx.visit_element(el).await.into_iter().map(quoted));
                }
                SemanticNode::Root { .. } => {}
            }
        }

        let Some(cell) = ContentNode::from_blocks(inner) else {
            return Vec::new();
        };
        vec![ContentNode::Table(TableNode {
            table: TableBody {
                body: vec![vec![cell]],
                ..Default::default()
            },
            layout: Some("blockquoteLayout".to_string()),
            props: BlockProps::styled(QUOTE_STYLE),
        })]
    }
}

fn quoted(mut node: ContentNode) -> ContentNode {
    let props = node.props_mut();
    props.margin = Some(match props.margin {
        Some(margin) => margin.indented(8.0, 2.0),
        None => DEFAULT_MARGIN,
    });
    if !props.style.contains(QUOTE_STYLE) {
        props.style.push(QUOTE_STYLE);
    }
    node
}
