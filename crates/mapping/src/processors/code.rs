use crate::blocks::code_block;
use crate::processor::{NodeProcessor, ProcessContext};
use crate::utils::has_multiline_text;
use async_trait::async_trait;
use quire_idf::{ContentNode, Element};

/// `pre` is always a block. A `code` reached at block level is a block
/// only when its text spans lines.
#[derive(Debug, Default)]
pub struct CodeProcessor;

#[async_trait]
impl NodeProcessor for CodeProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("pre") || element.is("code")
    }

    async fn process(&self, element: &Element, _ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        let text = element.text_content();
        if text.trim().is_empty() {
            return Vec::new();
        }
        if element.is("pre") || has_multiline_text(element) {
            vec![code_block(text)]
        } else {
            vec![ContentNode::text(text, "code")]
        }
    }
}
