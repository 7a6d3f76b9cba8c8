//! The inline style accumulator.
//!
//! Walks text-level nodes carrying a [`TextStyle`] down the tree. Flags
//! combine by union, so nesting order never matters; `link` and colors
//! take the innermost value.

use crate::svg::serialize_svg;
use quire_idf::{Element, Inline, SemanticNode, StyleRefs, StyledText};
use quire_style::{Color, TextDecoration, extract_style_from_attributes};

/// Nesting depth past which inline elements no longer add to the style;
/// their text is emitted in the style reached so far.
const MAX_INLINE_DEPTH: usize = 256;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub code: bool,
    pub link: Option<String>,
    pub color: Option<Color>,
    pub background: Option<Color>,
    pub font_size: Option<f32>,
    /// Extra style dictionary entries, outermost first.
    pub tags: Vec<String>,
}

impl TextStyle {
    /// Whether text under this style needs a styled run.
    pub fn is_active(&self) -> bool {
        *self != TextStyle::default()
    }

    pub fn merge(&self, add: &TextStyle) -> TextStyle {
        let mut tags = self.tags.clone();
        for tag in &add.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        TextStyle {
            bold: self.bold || add.bold,
            italic: self.italic || add.italic,
            underline: self.underline || add.underline,
            strike: self.strike || add.strike,
            code: self.code || add.code,
            link: add.link.clone().or_else(|| self.link.clone()),
            color: add.color.or(self.color),
            background: add.background.or(self.background),
            font_size: add.font_size.or(self.font_size),
            tags,
        }
    }

    /// The contribution an element makes to the cascade, from its tag and
    /// its `style` attribute.
    pub fn for_element(element: &Element) -> TextStyle {
        let mut style = match element.tag.as_str() {
            "strong" | "b" => TextStyle { bold: true, ..Default::default() },
            "em" | "i" => TextStyle { italic: true, ..Default::default() },
            "s" | "strike" | "del" => TextStyle { strike: true, ..Default::default() },
            "u" => TextStyle { underline: true, ..Default::default() },
            "code" => TextStyle { code: true, ..Default::default() },
            "a" => TextStyle {
                link: element.attr("href").map(str::to_string),
                ..Default::default()
            },
            _ => TextStyle::default(),
        };

        let declared = extract_style_from_attributes(element.attr("style"));
        style.bold |= declared.bold == Some(true);
        style.italic |= declared.italics == Some(true);
        match declared.decoration {
            Some(TextDecoration::Underline) => style.underline = true,
            Some(TextDecoration::LineThrough) => style.strike = true,
            None => {}
        }
        style.color = declared.color;
        style.background = declared.background;
        style.font_size = declared.font_size;
        style
    }

    /// Wraps `text` in a run carrying this style.
    pub fn apply(&self, text: impl Into<String>) -> Inline {
        let text = text.into();
        if !self.is_active() {
            return Inline::Str(text);
        }
        let mut decoration = Vec::new();
        if self.underline {
            decoration.push(TextDecoration::Underline);
        }
        if self.strike {
            decoration.push(TextDecoration::LineThrough);
        }
        let mut style = StyleRefs::new();
        if self.code {
            style.push("code");
        }
        if self.link.is_some() {
            style.push("a");
        }
        for tag in &self.tags {
            style.push(tag.clone());
        }
        Inline::Styled(StyledText {
            text,
            bold: self.bold,
            italics: self.italic,
            decoration,
            style,
            link: self.link.clone(),
            color: self.color,
            background: self.background,
            font_size: self.font_size,
        })
    }
}

/// Builds the runs for a sequence of inline nodes under `base`.
pub fn inline(nodes: &[SemanticNode], base: &TextStyle) -> Vec<Inline> {
    let mut parts = Vec::new();
    collect(nodes, base, 0, &mut parts);
    parts
}

fn collect(nodes: &[SemanticNode], base: &TextStyle, depth: usize, parts: &mut Vec<Inline>) {
    for node in nodes {
        match node {
            SemanticNode::Text(value) => {
                if !value.is_empty() {
                    parts.push(base.apply(value.as_str()));
                }
            }
            SemanticNode::Element(element) => collect_element(element, base, depth + 1, parts),
            SemanticNode::Root { children } => collect(children, base, depth, parts),
        }
    }
}

fn collect_element(element: &Element, base: &TextStyle, depth: usize, parts: &mut Vec<Inline>) {
    if depth > MAX_INLINE_DEPTH {
        log::debug!("Inline nesting deeper than {} levels, flattening <{}>", MAX_INLINE_DEPTH, element.tag);
        let text = element.text_content();
        if !text.is_empty() {
            parts.push(base.apply(text));
        }
        return;
    }
    match element.tag.as_str() {
        "br" => parts.push(Inline::Str("\n".to_string())),
        "img" => {
            let alt = element.attr("alt").filter(|a| !a.is_empty()).unwrap_or("[image]");
            parts.push(base.apply(alt));
        }
        "svg" => parts.push(Inline::Svg {
            svg: serialize_svg(element),
        }),
        "strong" | "b" | "em" | "i" | "s" | "strike" | "del" | "u" | "code" | "a" | "span" => {
            let current = base.merge(&TextStyle::for_element(element));
            collect(&element.children, &current, depth, parts);
        }
        _ if element.has_attr("style") => {
            let current = base.merge(&TextStyle::for_element(element));
            collect(&element.children, &current, depth, parts);
        }
        _ => {
            let text = element.text_content();
            if !text.is_empty() {
                parts.push(base.apply(text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn el(tag: &str, children: Vec<SemanticNode>) -> SemanticNode {
        SemanticNode::element(tag, children)
    }

    fn text(s: &str) -> SemanticNode {
        SemanticNode::text(s)
    }

    fn runs_json(nodes: &[SemanticNode]) -> serde_json::Value {
        serde_json::to_value(inline(nodes, &TextStyle::default())).unwrap()
    }

    #[test]
    fn test_plain_text_stays_plain() {
        assert_eq!(runs_json(&[text("a"), text(""), text("b")]), json!(["a", "b"]));
    }

    #[test]
    fn test_emphasis_order_is_irrelevant() {
        let bold_italic = [el("strong", vec![el("em", vec![text("x")])])];
        let italic_bold = [el("i", vec![el("b", vec![text("x")])])];
        assert_eq!(runs_json(&bold_italic), runs_json(&italic_bold));
        assert_eq!(
            runs_json(&bold_italic),
            json!([{"text": "x", "bold": true, "italics": true}])
        );
    }

    #[test]
    fn test_link_innermost_wins() {
        let nested = SemanticNode::Element(
            Element::new("a").with_attr("href", "outer").with_children(vec![SemanticNode::Element(
                Element::new("a").with_attr("href", "inner").with_children(vec![text("x")]),
            )]),
        );
        assert_eq!(
            runs_json(&[nested]),
            json!([{"text": "x", "style": "a", "link": "inner"}])
        );
    }

    #[test]
    fn test_decorations_and_code() {
        let nodes = [el("u", vec![el("del", vec![el("code", vec![text("x")])])])];
        assert_eq!(
            runs_json(&nodes),
            json!([{"text": "x", "decoration": ["underline", "lineThrough"], "style": "code"}])
        );
    }

    #[test]
    fn test_break_image_and_unknown() {
        let img = SemanticNode::Element(Element::new("img").with_attr("alt", "logo"));
        let nodes = [
            text("a"),
            el("br", vec![]),
            img,
            el("img", vec![]),
            el("b", vec![el("kbd", vec![text("k"), el("i", vec![text("!")])])]),
        ];
        assert_eq!(
            runs_json(&nodes),
            json!(["a", "\n", "logo", "[image]", {"text": "k!", "bold": true}])
        );
    }

    #[test]
    fn test_span_style_attribute_cascades() {
        let span = SemanticNode::Element(
            Element::new("span")
                .with_attr("style", "color: red; font-weight: bold")
                .with_children(vec![el("em", vec![text("hot")])]),
        );
        assert_eq!(
            runs_json(&[span]),
            json!([{"text": "hot", "bold": true, "italics": true, "color": "#FF0000"}])
        );
    }

    #[test]
    fn test_tags_concatenate_without_duplicates() {
        let outer = TextStyle { tags: vec!["h1".into()], ..Default::default() };
        let merged = outer.merge(&TextStyle { tags: vec!["h1".into(), "x".into()], ..Default::default() });
        assert_eq!(merged.tags, vec!["h1".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_deep_nesting_is_flattened_past_the_limit() {
        let mut node = text("deep");
        for _ in 0..2000 {
            node = el("strong", vec![node]);
        }
        assert_eq!(runs_json(&[node]), json!([{"text": "deep", "bold": true}]));
    }
}
