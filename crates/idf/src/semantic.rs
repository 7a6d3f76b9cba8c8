//! The input tree, as produced by an external markdown or HTML parser.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Malformed tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tree root must be a root or element node, found {0}")]
    InvalidRoot(&'static str),
}

/// A node of the parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticNode {
    Root { children: Vec<SemanticNode> },
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Always lowercase.
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<SemanticNode>,
}

impl Element {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self {
            tag: tag.as_ref().to_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SemanticNode>) -> Self {
        self.children = children;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// The heading level for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        let level = self.tag.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&level).then_some(level)
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(SemanticNode::as_element)
    }

    /// All descendant text concatenated, with `br` read as a newline.
    pub fn text_content(&self) -> String {
        let mut acc = String::new();
        collect_text(&self.children, &mut acc);
        acc
    }
}

fn collect_text(children: &[SemanticNode], acc: &mut String) {
    for child in children {
        match child {
            SemanticNode::Text(value) => acc.push_str(value),
            SemanticNode::Element(el) if el.is("br") => acc.push('\n'),
            SemanticNode::Element(el) => collect_text(&el.children, acc),
            SemanticNode::Root { children } => collect_text(children, acc),
        }
    }
}

impl SemanticNode {
    pub fn text(value: impl Into<String>) -> Self {
        SemanticNode::Text(value.into())
    }

    pub fn root(children: Vec<SemanticNode>) -> Self {
        SemanticNode::Root { children }
    }

    /// Shorthand for an element with no attributes.
    pub fn element(tag: &str, children: Vec<SemanticNode>) -> Self {
        SemanticNode::Element(Element::new(tag).with_children(children))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            SemanticNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SemanticNode::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SemanticNode::Root { .. } => "root",
            SemanticNode::Element(_) => "element",
            SemanticNode::Text(_) => "text",
        }
    }

    /// Flattened text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut acc = String::new();
        collect_text(std::slice::from_ref(self), &mut acc);
        acc
    }

    /// Loads a HAST (`{type, tagName, properties, children, value}`) tree.
    ///
    /// Comments, doctypes and other non-content nodes are dropped.
    pub fn from_hast_json(json: &str) -> Result<Self, TreeError> {
        let node: HastNode = serde_json::from_str(json)?;
        Self::from_hast(node)
    }

    pub fn from_hast_value(value: Value) -> Result<Self, TreeError> {
        let node: HastNode = serde_json::from_value(value)?;
        Self::from_hast(node)
    }

    fn from_hast(node: HastNode) -> Result<Self, TreeError> {
        let kind = node.kind();
        match node.into_semantic() {
            Some(SemanticNode::Text(_)) => Err(TreeError::InvalidRoot("text")),
            Some(tree) => Ok(tree),
            None => Err(TreeError::InvalidRoot(kind)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum HastNode {
    Root {
        #[serde(default)]
        children: Vec<HastNode>,
    },
    Element {
        #[serde(rename = "tagName")]
        tag_name: String,
        #[serde(default)]
        properties: BTreeMap<String, Value>,
        #[serde(default)]
        children: Vec<HastNode>,
    },
    Text {
        #[serde(default)]
        value: String,
    },
    #[serde(other)]
    Other,
}

impl HastNode {
    fn kind(&self) -> &'static str {
        match self {
            HastNode::Root { .. } => "root",
            HastNode::Element { .. } => "element",
            HastNode::Text { .. } => "text",
            HastNode::Other => "non-content node",
        }
    }

    fn into_semantic(self) -> Option<SemanticNode> {
        match self {
            HastNode::Root { children } => Some(SemanticNode::Root {
                children: convert_children(children),
            }),
            HastNode::Element {
                tag_name,
                properties,
                children,
            } => {
                let mut element = Element::new(tag_name);
                element.attributes = properties
                    .into_iter()
                    .filter_map(|(name, value)| {
                        let value = property_value(value)?;
                        let name = if name == "className" { "class".to_string() } else { name };
                        Some((name, value))
                    })
                    .collect();
                element.children = convert_children(children);
                Some(SemanticNode::Element(element))
            }
            HastNode::Text { value } => Some(SemanticNode::Text(value)),
            HastNode::Other => None,
        }
    }
}

fn convert_children(children: Vec<HastNode>) -> Vec<SemanticNode> {
    children.into_iter().filter_map(HastNode::into_semantic).collect()
}

/// `false` and `null` mean the attribute is absent.
fn property_value(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(property_value)
                .collect::<Vec<_>>()
                .join(" "),
        ),
        Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_hast_tree() {
        let tree = SemanticNode::from_hast_value(json!({
            "type": "root",
            "children": [
                {"type": "doctype"},
                {"type": "element", "tagName": "P", "properties": {"className": ["a", "b"], "hidden": false, "colSpan": 2},
                 "children": [{"type": "text", "value": "hi"}, {"type": "comment", "value": "x"}]}
            ]
        }))
        .unwrap();

        let SemanticNode::Root { children } = tree else {
            panic!("expected root");
        };
        assert_eq!(children.len(), 1);
        let p = children[0].as_element().unwrap();
        assert_eq!(p.tag, "p");
        assert_eq!(p.attr("class"), Some("a b"));
        assert_eq!(p.attr("colSpan"), Some("2"));
        assert!(!p.has_attr("hidden"));
        assert_eq!(p.children, vec![SemanticNode::text("hi")]);
    }

    #[test]
    fn test_invalid_roots() {
        assert!(matches!(
            SemanticNode::from_hast_value(json!({"type": "text", "value": "x"})),
            Err(TreeError::InvalidRoot("text"))
        ));
        assert!(matches!(
            SemanticNode::from_hast_value(json!({"type": "comment"})),
            Err(TreeError::InvalidRoot(_))
        ));
        assert!(matches!(
            SemanticNode::from_hast_value(json!({"type": "element"})),
            Err(TreeError::Json(_))
        ));
        assert!(SemanticNode::from_hast_json("[1, 2").is_err());
    }

    #[test]
    fn test_text_content_reads_breaks() {
        let p = Element::new("p").with_children(vec![
            SemanticNode::text("a"),
            SemanticNode::element("br", vec![]),
            SemanticNode::element("em", vec![SemanticNode::text("b")]),
        ]);
        assert_eq!(p.text_content(), "a\nb");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(Element::new("H3").heading_level(), Some(3));
        assert_eq!(Element::new("h7").heading_level(), None);
        assert_eq!(Element::new("hr").heading_level(), None);
    }
}
