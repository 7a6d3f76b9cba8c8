//! The document definition consumed by the print-layout engine.

use std::collections::BTreeMap;

use quire_fonts::FontDefinitions;
use quire_idf::ContentNode;
use quire_style::{Margins, NamedStyle, PageOrientation, PageSize, Stylesheet, TableLayout};
use serde::Serialize;

use crate::options::ConversionOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefaultStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    pub content: Vec<ContentNode>,
    pub styles: BTreeMap<String, NamedStyle>,
    pub layouts: BTreeMap<String, TableLayout>,
    pub page_size: PageSize,
    pub page_margins: Margins,
    pub page_orientation: PageOrientation,
    #[serde(skip_serializing_if = "FontDefinitions::is_empty")]
    pub fonts: FontDefinitions,
    pub default_style: DefaultStyle,
}

impl DocumentDefinition {
    pub fn new(content: Vec<ContentNode>, stylesheet: &Stylesheet, options: &ConversionOptions) -> Self {
        Self {
            content,
            styles: stylesheet.styles.clone(),
            layouts: stylesheet.layouts.clone(),
            page_size: options.page_size.clone(),
            page_margins: options.page_margins,
            page_orientation: options.page_orientation,
            fonts: FontDefinitions::new(),
            default_style: DefaultStyle::default(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_engine_shape() {
        let doc = DocumentDefinition::new(
            vec![ContentNode::text("Hi", "p")],
            &Stylesheet::github(),
            &ConversionOptions::default(),
        );
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["content"], json!([{"text": "Hi", "style": "p"}]));
        assert_eq!(value["pageSize"], json!("A4"));
        assert_eq!(value["pageMargins"], json!([40.0, 60.0, 40.0, 60.0]));
        assert_eq!(value["pageOrientation"], json!("portrait"));
        assert_eq!(value["defaultStyle"], json!({}));
        assert!(value.get("fonts").is_none());
        assert!(value["styles"]["h1"].is_object());
        assert!(value["layouts"]["codeBlockLayout"].is_object());
    }
}
