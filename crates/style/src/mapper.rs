//! Translation of parsed CSS into the rendering engine's style vocabulary.

use crate::css::{ParsedStyles, convert_color, parse_style_attribute};
use crate::parsers::font_size_pt;
use crate::text::TextDecoration;
use quire_types::Color;
use serde::{Deserialize, Serialize};

/// Style overrides merged directly onto a content node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl PdfStyle {
    pub fn is_empty(&self) -> bool {
        *self == PdfStyle::default()
    }

    /// Fields set on `other` replace the ones on `self`.
    pub fn merge(&mut self, other: &PdfStyle) {
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.background.is_some() {
            self.background = other.background;
        }
        if other.bold.is_some() {
            self.bold = other.bold;
        }
        if other.italics.is_some() {
            self.italics = other.italics;
        }
        if other.decoration.is_some() {
            self.decoration = other.decoration;
        }
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
    }
}

pub fn map_css_style(parsed: &ParsedStyles) -> PdfStyle {
    PdfStyle {
        color: parsed.color.as_deref().and_then(convert_color),
        background: parsed.background_color.as_deref().and_then(convert_color),
        bold: parsed.font_weight.as_ref().map(|w| w.is_bold()),
        italics: parsed.font_style.map(|s| s.is_italic()),
        decoration: parsed.text_decoration,
        font_size: parsed.font_size.as_deref().and_then(|size| match font_size_pt(size) {
            Ok(points) => Some(points),
            Err(e) => {
                log::debug!("Ignoring font-size: {}", e);
                None
            }
        }),
    }
}

/// Reads an element's `style` attribute, if any, into overrides.
pub fn extract_style_from_attributes(style: Option<&str>) -> PdfStyle {
    style
        .map(|s| map_css_style(&parse_style_attribute(s)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_full_declaration() {
        let style = extract_style_from_attributes(Some(
            "color: #f00; background-color: hsl(120, 100%, 25%); font-weight: normal; \
             font-style: italic; text-decoration: line-through; font-size: 2em",
        ));
        assert_eq!(
            serde_json::to_value(&style).unwrap(),
            json!({
                "color": "#FF0000",
                "background": "#008000",
                "bold": false,
                "italics": true,
                "decoration": "lineThrough",
                "fontSize": 24.0
            })
        );
    }

    #[test]
    fn test_unparseable_values_are_omitted() {
        let style = extract_style_from_attributes(Some("color: nope; font-size: -3px"));
        assert!(style.is_empty());
        assert!(extract_style_from_attributes(None).is_empty());
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = PdfStyle { bold: Some(true), color: Some(Color::gray(0)), ..Default::default() };
        base.merge(&PdfStyle { color: Some(Color::gray(255)), ..Default::default() });
        assert_eq!(base.bold, Some(true));
        assert_eq!(base.color, Some(Color::gray(255)));
    }
}
