//! The output tree, serialized in the rendering engine's document-content
//! JSON model.
//!
//! Every node flattens its [`BlockProps`] next to its payload key, so a
//! paragraph serializes as `{"text": ..., "style": "p"}` and a list as
//! `{"ul": [...], "style": "ul"}`.

use quire_style::{Alignment, Color, Margins, PdfStyle, TextDecoration};
use serde::{Serialize, Serializer};

/// Names of entries in the style dictionary applied to a node.
///
/// Serialized as a bare string when there is exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRefs(Vec<String>);

impl StyleRefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|s| s == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for StyleRefs {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for StyleRefs {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<Vec<String>> for StyleRefs {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl Serialize for StyleRefs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.as_slice() {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

/// Properties shared by every block-level node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockProps {
    #[serde(skip_serializing_if = "StyleRefs::is_empty")]
    pub style: StyleRefs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Cell borders as `[left, top, right, bottom]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<[bool; 4]>,
    #[serde(flatten)]
    pub overrides: PdfStyle,
}

impl BlockProps {
    pub fn styled(name: &str) -> Self {
        Self {
            style: StyleRefs::from(name),
            ..Default::default()
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentNode {
    Text(TextNode),
    List(ListNode),
    Table(TableNode),
    Image(ImageNode),
    Rule(RuleNode),
    Stack(StackNode),
    Svg(SvgNode),
}

impl ContentNode {
    /// A text node with a single style reference.
    pub fn text(content: impl Into<TextContent>, style: &str) -> Self {
        ContentNode::Text(TextNode {
            text: content.into(),
            props: BlockProps::styled(style),
            preserve_leading_spaces: false,
        })
    }

    pub fn stack(items: Vec<ContentNode>) -> Self {
        ContentNode::Stack(StackNode {
            stack: items,
            props: BlockProps::default(),
        })
    }

    /// Collapses a list of blocks to a single node. One block is used as-is,
    /// several are stacked, none yields `None`.
    pub fn from_blocks(mut blocks: Vec<ContentNode>) -> Option<Self> {
        match blocks.len() {
            0 => None,
            1 => blocks.pop(),
            _ => Some(ContentNode::stack(blocks)),
        }
    }

    pub fn props(&self) -> &BlockProps {
        match self {
            ContentNode::Text(n) => &n.props,
            ContentNode::List(n) => &n.props,
            ContentNode::Table(n) => &n.props,
            ContentNode::Image(n) => &n.props,
            ContentNode::Rule(n) => &n.props,
            ContentNode::Stack(n) => &n.props,
            ContentNode::Svg(n) => &n.props,
        }
    }

    pub fn props_mut(&mut self) -> &mut BlockProps {
        match self {
            ContentNode::Text(n) => &mut n.props,
            ContentNode::List(n) => &mut n.props,
            ContentNode::Table(n) => &mut n.props,
            ContentNode::Image(n) => &mut n.props,
            ContentNode::Rule(n) => &mut n.props,
            ContentNode::Stack(n) => &mut n.props,
            ContentNode::Svg(n) => &mut n.props,
        }
    }

    pub fn with_margin(mut self, margin: Margins) -> Self {
        self.props_mut().margin = Some(margin);
        self
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentNode::Text(_) => "text",
            ContentNode::List(_) => "list",
            ContentNode::Table(_) => "table",
            ContentNode::Image(_) => "image",
            ContentNode::Rule(_) => "rule",
            ContentNode::Stack(_) => "stack",
            ContentNode::Svg(_) => "svg",
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            ContentNode::Text(n) => Some(n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub text: TextContent,
    #[serde(flatten)]
    pub props: BlockProps,
    #[serde(skip_serializing_if = "is_false")]
    pub preserve_leading_spaces: bool,
}

impl TextNode {
    /// The plain text with all styling dropped.
    pub fn plain_text(&self) -> String {
        self.text.plain_text()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextContent {
    Plain(String),
    Runs(Vec<Inline>),
}

impl TextContent {
    pub fn plain_text(&self) -> String {
        match self {
            TextContent::Plain(s) => s.clone(),
            TextContent::Runs(runs) => runs.iter().map(Inline::plain_text).collect(),
        }
    }
}

impl From<&str> for TextContent {
    fn from(s: &str) -> Self {
        TextContent::Plain(s.to_string())
    }
}

impl From<String> for TextContent {
    fn from(s: String) -> Self {
        TextContent::Plain(s)
    }
}

impl From<Vec<Inline>> for TextContent {
    fn from(runs: Vec<Inline>) -> Self {
        TextContent::Runs(runs)
    }
}

/// One run of a text stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Inline {
    Str(String),
    Styled(StyledText),
    Svg { svg: String },
}

impl Inline {
    pub fn plain_text(&self) -> &str {
        match self {
            Inline::Str(s) => s,
            Inline::Styled(st) => &st.text,
            Inline::Svg { .. } => "",
        }
    }

    /// True for plain or styled text made only of whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Str(s) => s.trim().is_empty(),
            Inline::Styled(st) => st.text.trim().is_empty(),
            Inline::Svg { .. } => false,
        }
    }

    /// Mutable access to the text of a plain or styled run.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Inline::Str(s) => Some(s),
            Inline::Styled(st) => Some(&mut st.text),
            Inline::Svg { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledText {
    pub text: String,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italics: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_decorations")]
    pub decoration: Vec<TextDecoration>,
    #[serde(skip_serializing_if = "StyleRefs::is_empty")]
    pub style: StyleRefs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

fn serialize_decorations<S>(decorations: &[TextDecoration], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match decorations {
        [single] => single.serialize(serializer),
        many => many.serialize(serializer),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListItems {
    Ul(Vec<ContentNode>),
    Ol(Vec<ContentNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListNode {
    #[serde(flatten)]
    pub items: ListItems,
    #[serde(flatten)]
    pub props: BlockProps,
}

impl ListNode {
    pub fn new(ordered: bool, items: Vec<ContentNode>) -> Self {
        let (items, style) = if ordered {
            (ListItems::Ol(items), "ol")
        } else {
            (ListItems::Ul(items), "ul")
        };
        Self {
            items,
            props: BlockProps::styled(style),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBody {
    pub body: Vec<Vec<ContentNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widths: Option<Vec<String>>,
    /// Leading rows repeated on every page the table spans.
    #[serde(skip_serializing_if = "is_zero")]
    pub header_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableNode {
    pub table: TableBody,
    /// Name of a layout in the stylesheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(flatten)]
    pub props: BlockProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageNode {
    /// A data URL, or a reference the renderer resolves itself.
    pub image: String,
    #[serde(flatten)]
    pub props: BlockProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasLine {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub line_width: f32,
    pub line_color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CanvasShape {
    Line(CanvasLine),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleNode {
    pub canvas: Vec<CanvasShape>,
    #[serde(flatten)]
    pub props: BlockProps,
}

impl RuleNode {
    /// A full-width horizontal line.
    pub fn horizontal(width: f32, line_width: f32, color: Color, margin: Margins) -> Self {
        Self {
            canvas: vec![CanvasShape::Line(CanvasLine {
                x1: 0.0,
                y1: 0.0,
                x2: width,
                y2: 0.0,
                line_width,
                line_color: color,
            })],
            props: BlockProps {
                margin: Some(margin),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackNode {
    pub stack: Vec<ContentNode>,
    #[serde(flatten)]
    pub props: BlockProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgNode {
    pub svg: String,
    #[serde(flatten)]
    pub props: BlockProps,
}
