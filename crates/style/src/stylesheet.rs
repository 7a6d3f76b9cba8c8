//! The named style dictionary and table layouts handed to the rendering
//! engine alongside the content tree.

use super::dimension::Margins;
use super::text::TextDecoration;
use quire_types::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Muted foreground shared by h6 and blockquotes.
pub const MUTED_TEXT: Color = Color::rgb(0x59, 0x63, 0x6E);
/// Line color of heading rules, table grids and the blockquote bar.
pub const BORDER_MUTED: Color = Color::rgb(0xD1, 0xD9, 0xE0);
/// Background of inline code and code blocks.
pub const CODE_BACKGROUND: Color = Color::rgb(0xF0, 0xF1, 0xF2);
pub const LINK_BLUE: Color = Color::rgb(0x09, 0x69, 0xDA);
pub const ZEBRA_FILL: Color = Color::rgb(0xF6, 0xF8, 0xFA);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stylesheet {
    pub styles: BTreeMap<String, NamedStyle>,
    pub layouts: BTreeMap<String, TableLayout>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::github()
    }
}

impl Stylesheet {
    /// Typography modelled on GitHub's markdown rendering.
    pub fn github() -> Self {
        let heading = |size: f32, bottom: f32| NamedStyle {
            font_size: Some(size),
            bold: Some(true),
            margin_bottom: Some(bottom),
            ..Default::default()
        };
        let list = NamedStyle {
            margin_bottom: Some(16.0),
            margin_left: Some(12.0),
            ..Default::default()
        };
        let italics = NamedStyle { italics: Some(true), ..Default::default() };

        let styles = BTreeMap::from([
            ("h1".to_string(), heading(28.0, 8.4)),
            ("h2".to_string(), heading(21.0, 6.3)),
            ("h3".to_string(), heading(17.5, 16.0)),
            ("h4".to_string(), heading(14.0, 16.0)),
            ("h5".to_string(), heading(12.25, 16.0)),
            ("h6".to_string(), NamedStyle { color: Some(MUTED_TEXT), ..heading(11.9, 16.0) }),
            (
                "p".to_string(),
                NamedStyle {
                    font_size: Some(14.0),
                    margin: Some(Margins::bottom(16.0)),
                    ..Default::default()
                },
            ),
            (
                "blockquote".to_string(),
                NamedStyle {
                    font_size: Some(14.0),
                    color: Some(MUTED_TEXT),
                    margin_bottom: Some(16.0),
                    ..Default::default()
                },
            ),
            (
                "a".to_string(),
                NamedStyle {
                    color: Some(LINK_BLUE),
                    decoration: Some(TextDecoration::Underline),
                    ..Default::default()
                },
            ),
            ("ul".to_string(), list.clone()),
            ("ol".to_string(), list),
            (
                "del".to_string(),
                NamedStyle { decoration: Some(TextDecoration::LineThrough), ..Default::default() },
            ),
            ("b".to_string(), NamedStyle { bold: Some(true), ..Default::default() }),
            ("table".to_string(), NamedStyle { margin_bottom: Some(16.0), ..Default::default() }),
            ("th".to_string(), NamedStyle { bold: Some(true), ..Default::default() }),
            ("td".to_string(), NamedStyle::default()),
            (
                "code".to_string(),
                NamedStyle { background: Some(CODE_BACKGROUND), ..Default::default() },
            ),
            (
                "codeBlock".to_string(),
                NamedStyle {
                    font_size: Some(11.9),
                    margin: Some(Margins::bottom(16.0)),
                    ..Default::default()
                },
            ),
            (
                "u".to_string(),
                NamedStyle { decoration: Some(TextDecoration::Underline), ..Default::default() },
            ),
            ("em".to_string(), italics.clone()),
            ("i".to_string(), italics),
        ]);

        let layouts = BTreeMap::from([
            ("blockquoteLayout".to_string(), TableLayout::blockquote()),
            ("tableLayout".to_string(), TableLayout::grid()),
            ("codeBlockLayout".to_string(), TableLayout::code_block()),
        ]);

        Self { styles, layouts }
    }

    pub fn style(&self, name: &str) -> Option<&NamedStyle> {
        self.styles.get(name)
    }

    pub fn layout(&self, name: &str) -> Option<&TableLayout> {
        self.layouts.get(name)
    }
}

/// One entry of the style dictionary.
#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NamedStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f32>,
}

/// Width of a family of table rules, indexed from the outer edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LineRule {
    Uniform { width: f32 },
    /// Only the leading rule is drawn.
    FirstOnly { width: f32 },
}

impl LineRule {
    pub fn width_at(&self, index: usize) -> f32 {
        match *self {
            LineRule::Uniform { width } => width,
            LineRule::FirstOnly { width } if index == 0 => width,
            LineRule::FirstOnly { .. } => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FillRule {
    Solid { color: Color },
    /// Even body rows are filled; the header row never is.
    Zebra { color: Color },
}

impl FillRule {
    pub fn fill_at(&self, row: usize) -> Option<Color> {
        match *self {
            FillRule::Solid { color } => Some(color),
            FillRule::Zebra { color } => (row != 0 && row % 2 == 0).then_some(color),
        }
    }
}

/// A declarative table layout the renderer evaluates per rule and row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayout {
    pub h_line_width: LineRule,
    pub v_line_width: LineRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_line_color: Option<Color>,
    pub padding_left: f32,
    pub padding_right: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillRule>,
}

impl TableLayout {
    /// A single left bar.
    pub fn blockquote() -> Self {
        Self {
            h_line_width: LineRule::Uniform { width: 0.0 },
            v_line_width: LineRule::FirstOnly { width: 3.0 },
            h_line_color: None,
            v_line_color: Some(BORDER_MUTED),
            padding_left: 14.0,
            padding_right: 14.0,
            padding_top: None,
            padding_bottom: None,
            fill: None,
        }
    }

    pub fn grid() -> Self {
        Self {
            h_line_width: LineRule::Uniform { width: 1.0 },
            v_line_width: LineRule::Uniform { width: 1.0 },
            h_line_color: Some(BORDER_MUTED),
            v_line_color: Some(BORDER_MUTED),
            padding_left: 13.0,
            padding_right: 13.0,
            padding_top: Some(6.0),
            padding_bottom: Some(6.0),
            fill: Some(FillRule::Zebra { color: ZEBRA_FILL }),
        }
    }

    pub fn code_block() -> Self {
        Self {
            h_line_width: LineRule::Uniform { width: 0.0 },
            v_line_width: LineRule::Uniform { width: 0.0 },
            h_line_color: None,
            v_line_color: None,
            padding_left: 16.0,
            padding_right: 16.0,
            padding_top: Some(16.0),
            padding_bottom: Some(16.0),
            fill: Some(FillRule::Solid { color: CODE_BACKGROUND }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_github_headings() {
        let sheet = Stylesheet::github();
        let h6 = sheet.style("h6").unwrap();
        assert_eq!(h6.bold, Some(true));
        assert_eq!(h6.color.unwrap().to_hex(), "#59636E");
        assert_eq!(sheet.style("h1").unwrap().font_size, Some(28.0));
    }

    #[test]
    fn test_style_serialization_shape() {
        let sheet = Stylesheet::github();
        assert_eq!(
            serde_json::to_value(sheet.style("p").unwrap()).unwrap(),
            json!({"fontSize": 14.0, "margin": [0.0, 0.0, 0.0, 16.0]})
        );
        assert_eq!(
            serde_json::to_value(sheet.style("del").unwrap()).unwrap(),
            json!({"decoration": "lineThrough"})
        );
    }

    #[test]
    fn test_layout_rules() {
        let sheet = Stylesheet::github();
        let quote = sheet.layout("blockquoteLayout").unwrap();
        assert_eq!(quote.v_line_width.width_at(0), 3.0);
        assert_eq!(quote.v_line_width.width_at(1), 0.0);

        let grid = sheet.layout("tableLayout").unwrap();
        let fill = grid.fill.unwrap();
        assert_eq!(fill.fill_at(0), None);
        assert_eq!(fill.fill_at(1), None);
        assert_eq!(fill.fill_at(2), Some(ZEBRA_FILL));
    }
}
