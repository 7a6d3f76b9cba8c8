//! Builders for the fixed block shapes several processors share.

use quire_idf::{BlockProps, ContentNode, RuleNode, TableBody, TableNode, TextNode};
use quire_style::stylesheet::BORDER_MUTED;
use quire_style::{Color, Margins, PdfStyle};

/// Printable width of an A4 page inside the default margins.
pub const RULE_WIDTH: f32 = 515.0;

/// Spacing around paragraphs and code runs inside list items.
pub const ITEM_MARGIN: Margins = Margins::new(0.0, 2.0, 0.0, 2.0);

pub const IMAGE_MARGIN: Margins = Margins::new(0.0, 4.0, 0.0, 8.0);

const ALT_TEXT_COLOR: Color = Color::gray(0x66);
const PLACEHOLDER_COLOR: Color = Color::gray(0x99);

/// The separator drawn under `h1` and `h2`.
pub fn heading_rule() -> ContentNode {
    ContentNode::Rule(RuleNode::horizontal(RULE_WIDTH, 1.0, BORDER_MUTED, Margins::bottom(16.0)))
}

/// The rule emitted for `hr`.
pub fn horizontal_rule() -> ContentNode {
    ContentNode::Rule(RuleNode::horizontal(RULE_WIDTH, 3.5, BORDER_MUTED, Margins::bottom(24.0)))
}

/// A one-cell borderless table holding preformatted text.
pub fn code_block(text: impl Into<String>) -> ContentNode {
    let cell = ContentNode::Text(TextNode {
        text: text.into().into(),
        props: BlockProps {
            border: Some([false; 4]),
            ..Default::default()
        },
        preserve_leading_spaces: true,
    });
    ContentNode::Table(TableNode {
        table: TableBody {
            body: vec![vec![cell]],
            widths: Some(vec!["*".to_string()]),
            header_rows: 0,
        },
        layout: Some("codeBlockLayout".to_string()),
        props: BlockProps::styled("codeBlock"),
    })
}

/// Muted italic paragraph used in place of an image.
fn muted_italic(text: String, color: Color) -> ContentNode {
    let mut node = ContentNode::text(text, "p");
    node.props_mut().overrides = PdfStyle {
        color: Some(color),
        italics: Some(true),
        ..Default::default()
    };
    node
}

pub fn image_alt_text(alt: &str) -> ContentNode {
    muted_italic(alt.to_string(), ALT_TEXT_COLOR)
}

pub fn image_unavailable(src: &str) -> ContentNode {
    muted_italic(format!("[image unavailable: {src}]"), PLACEHOLDER_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_block_shape() {
        assert_eq!(
            serde_json::to_value(code_block("  let x = 1;")).unwrap(),
            json!({
                "table": {
                    "body": [[{
                        "text": "  let x = 1;",
                        "border": [false, false, false, false],
                        "preserveLeadingSpaces": true
                    }]],
                    "widths": ["*"]
                },
                "layout": "codeBlockLayout",
                "style": "codeBlock"
            })
        );
    }

    #[test]
    fn test_image_fallbacks() {
        assert_eq!(
            serde_json::to_value(image_unavailable("x.png")).unwrap(),
            json!({
                "text": "[image unavailable: x.png]",
                "style": "p",
                "color": "#999999",
                "italics": true
            })
        );
        assert_eq!(
            serde_json::to_value(image_alt_text("a cat")).unwrap()["color"],
            json!("#666666")
        );
    }

    #[test]
    fn test_rule_widths() {
        let ContentNode::Rule(rule) = horizontal_rule() else {
            panic!("expected a rule");
        };
        assert_eq!(rule.props.margin, Some(Margins::bottom(24.0)));
    }
}
