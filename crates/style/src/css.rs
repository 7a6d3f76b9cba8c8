//! Lenient readers for inline `style` attributes and CSS color values.
//!
//! Nothing here fails: a declaration or value that does not parse is
//! dropped and logged at debug level.

use crate::font::{FontStyle, FontWeight};
use crate::parsers::{declarations, named_color, parse_color, run_parser};
use crate::text::TextDecoration;
use quire_types::Color;

/// The subset of declarations the mapping engine understands, still in
/// CSS vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStyles {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    pub font_size: Option<String>,
}

/// Reads a `style` attribute. Later declarations override earlier ones.
pub fn parse_style_attribute(style: &str) -> ParsedStyles {
    let mut parsed = ParsedStyles::default();
    for (property, value) in declarations(style) {
        match property.as_str() {
            "color" => parsed.color = Some(value),
            "background-color" | "background" => {
                if let Some(color) = background_color_token(&value) {
                    parsed.background_color = Some(color);
                }
            }
            "font-weight" => match FontWeight::parse(&value) {
                Ok(weight) => parsed.font_weight = Some(weight),
                Err(e) => log::debug!("Ignoring font-weight: {}", e),
            },
            "font-style" => parsed.font_style = Some(FontStyle::parse(&value)),
            "text-decoration" => parsed.text_decoration = TextDecoration::from_css(&value),
            "font-size" => parsed.font_size = Some(value),
            other => log::trace!("Ignoring unsupported style property '{}'", other),
        }
    }
    parsed
}

/// Picks the color out of a `background` shorthand.
fn background_color_token(value: &str) -> Option<String> {
    let mut stripped = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("url(") {
        stripped.push_str(&rest[..start]);
        rest = match rest[start..].find(')') {
            Some(end) => &rest[start + end + 1..],
            None => "",
        };
    }
    stripped.push_str(rest);
    let stripped = stripped.trim();

    let token = stripped.split_whitespace().find(|part| {
        part.starts_with('#')
            || part.starts_with("rgb")
            || part.starts_with("hsl")
            || named_color(part).is_some()
    });
    match token {
        Some(token) => Some(token.to_string()),
        None if !stripped.is_empty() && stripped != "transparent" => Some(stripped.to_string()),
        None => None,
    }
}

/// Converts any supported CSS color to an opaque [`Color`].
///
/// `transparent`, `none` and anything unrecognised yield `None`.
pub fn convert_color(value: &str) -> Option<Color> {
    let value = value.trim().to_lowercase();
    if value.is_empty() || value == "transparent" || value == "none" {
        return None;
    }
    match run_parser(parse_color, &value) {
        Ok(color) => Some(color),
        Err(e) => {
            log::debug!("Ignoring color '{}': {}", value, e);
            None
        }
    }
}

pub fn is_valid_color(value: &str) -> bool {
    convert_color(value).is_some()
}

/// Perceived brightness (0-255) of a `#RRGGBB` or `#RGB` string.
pub fn color_brightness(hex: &str) -> Option<u8> {
    Color::parse_hex(hex).ok().map(|c| c.brightness())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_normalization() {
        assert_eq!(convert_color("#abc"), convert_color("#AABBCC"));
        assert_eq!(convert_color("#abc").unwrap().to_hex(), "#AABBCC");
    }

    #[test]
    fn test_convert_color_never_panics() {
        assert_eq!(convert_color("rgb(300,0,0)"), None);
        assert_eq!(convert_color("hsl(0,150%,50%)").unwrap().to_hex(), "#FF0000");
        assert_eq!(convert_color("transparent"), None);
        assert_eq!(convert_color("NONE"), None);
        assert_eq!(convert_color(""), None);
        assert_eq!(convert_color("rgb("), None);
        assert!(is_valid_color("  Red "));
    }

    #[test]
    fn test_brightness() {
        assert_eq!(color_brightness("#FFFFFF"), Some(255));
        assert_eq!(color_brightness("#000"), Some(0));
        assert_eq!(color_brightness("nope"), None);
    }

    #[test]
    fn test_parse_style_attribute() {
        let parsed = parse_style_attribute(
            "color: rgba(255, 0, 0, 0.5); font-weight: 700; font-style: oblique; \
             text-decoration: underline dotted; font-size: 16px; margin: 4px",
        );
        assert_eq!(parsed.color.as_deref(), Some("rgba(255, 0, 0, 0.5)"));
        assert!(parsed.font_weight.unwrap().is_bold());
        assert!(parsed.font_style.unwrap().is_italic());
        assert_eq!(parsed.text_decoration, Some(TextDecoration::Underline));
        assert_eq!(parsed.font_size.as_deref(), Some("16px"));
    }

    #[test]
    fn test_background_shorthand() {
        let parsed = parse_style_attribute("background: url(img.png) no-repeat #ff0");
        assert_eq!(parsed.background_color.as_deref(), Some("#ff0"));
        let parsed = parse_style_attribute("background: yellow");
        assert_eq!(parsed.background_color.as_deref(), Some("yellow"));
        let parsed = parse_style_attribute("background: transparent");
        assert_eq!(parsed.background_color, None);
    }

    #[test]
    fn test_malformed_input_is_empty() {
        assert_eq!(parse_style_attribute(";;:;color"), ParsedStyles::default());
        assert_eq!(parse_style_attribute("font-weight: heavy").font_weight, None);
    }
}
