//! The default processors, one per family of block elements.

mod blockquote;
mod code;
mod heading;
mod image;
mod list;
mod misc;
mod paragraph;
mod table;

pub use blockquote::BlockquoteProcessor;
pub use code::CodeProcessor;
pub use heading::HeadingProcessor;
pub use image::ImageProcessor;
pub use list::ListProcessor;
pub use misc::{BreakProcessor, HorizontalRuleProcessor, SvgProcessor};
pub use paragraph::ParagraphProcessor;
pub use table::TableProcessor;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{MapContext, ProcessorManager};
    use quire_idf::{ContentNode, SemanticNode};
    use serde_json::Value;

    pub fn el(tag: &str, children: Vec<SemanticNode>) -> SemanticNode {
        SemanticNode::element(tag, children)
    }

    pub fn text(value: &str) -> SemanticNode {
        SemanticNode::text(value)
    }

    pub async fn map(nodes: Vec<SemanticNode>) -> Vec<ContentNode> {
        ProcessorManager::with_defaults()
            .map_tree(&SemanticNode::root(nodes), &MapContext::default())
            .await
            .unwrap()
    }

    pub async fn map_json(nodes: Vec<SemanticNode>) -> Value {
        serde_json::to_value(map(nodes).await).unwrap()
    }
}
