use crate::blocks::heading_rule;
use crate::processor::{NodeProcessor, ProcessContext};
use async_trait::async_trait;
use quire_idf::{ContentNode, Element};

/// `h1`..`h6`. The two top levels are followed by a separator rule.
#[derive(Debug, Default)]
pub struct HeadingProcessor;

#[async_trait]
impl NodeProcessor for HeadingProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.heading_level().is_some()
    }

    async fn process(&self, element: &Element, _ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        let Some(level) = element.heading_level() else {
            return Vec::new();
        };
        let mut out = vec![ContentNode::text(element.text_content(), &format!("h{level}"))];
        if level <= 2 {
            out.push(heading_rule());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::processors::test_support::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_top_levels_get_a_rule() {
        let out = map_json(vec![
            el("h1", vec![text("Title")]),
            el("h3", vec![text("Sub"), el("em", vec![text("section")])]),
        ])
        .await;
        assert_eq!(out[0], json!({"text": "Title", "style": "h1"}));
        assert_eq!(out[1]["canvas"][0]["lineWidth"], json!(1.0));
        assert_eq!(out[2], json!({"text": "Subsection", "style": "h3"}));
        assert_eq!(out.as_array().unwrap().len(), 3);
    }
}
