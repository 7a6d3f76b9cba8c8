use serde::{Deserialize, Serialize};

/// Horizontal alignment of a text block or table cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl Alignment {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "right" => Some(Alignment::Right),
            "center" => Some(Alignment::Center),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum TextDecoration {
    Underline,
    LineThrough,
}

impl TextDecoration {
    /// Reads a CSS `text-decoration` value. `underline` takes precedence.
    pub fn from_css(value: &str) -> Option<Self> {
        let value = value.to_lowercase();
        if value.contains("underline") {
            Some(TextDecoration::Underline)
        } else if value.contains("line-through") {
            Some(TextDecoration::LineThrough)
        } else {
            None
        }
    }
}
