//! Serializes an inline `svg` subtree back to markup for the renderer.
//!
//! The tree stores tag names lowercased and attribute names in the
//! parser's camelCase property form, so both are mapped back to the
//! spelling SVG expects.

use quire_idf::{Element, SemanticNode};

/// SVG attributes whose canonical spelling is camelCase.
const CASED_ATTRIBUTES: &[&str] = &[
    "viewBox",
    "preserveAspectRatio",
    "gradientTransform",
    "gradientUnits",
    "spreadMethod",
    "patternTransform",
    "patternUnits",
    "clipPathUnits",
    "maskContentUnits",
    "maskUnits",
    "markerHeight",
    "markerWidth",
    "markerUnits",
    "filterUnits",
    "primitiveUnits",
    "kernelMatrix",
    "kernelUnitLength",
    "baseFrequency",
    "numOctaves",
    "stitchTiles",
    "surfaceScale",
    "specularConstant",
    "specularExponent",
    "diffuseConstant",
    "in2",
    "xChannelSelector",
    "yChannelSelector",
    "zChannelSelector",
    "limitingConeAngle",
];

/// SVG elements whose canonical spelling is camelCase.
const CASED_ELEMENTS: &[&str] = &[
    "clipPath",
    "foreignObject",
    "linearGradient",
    "radialGradient",
    "textPath",
    "feBlend",
    "feColorMatrix",
    "feComposite",
    "feConvolveMatrix",
    "feDiffuseLighting",
    "feDisplacementMap",
    "feFlood",
    "feGaussianBlur",
    "feImage",
    "feMerge",
    "feMergeNode",
    "feMorphology",
    "feOffset",
    "fePointLight",
    "feSpotLight",
    "feTile",
    "feTurbulence",
];

pub fn serialize_svg(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    let tag = element_name(&element.tag);
    out.push('<');
    out.push_str(tag);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(&attribute_name(name));
        out.push_str("=\"");
        out.push_str(&escape(value, true));
        out.push('"');
    }
    out.push('>');
    for child in &element.children {
        match child {
            SemanticNode::Element(el) => write_element(el, out),
            SemanticNode::Text(text) => out.push_str(&escape(text, false)),
            SemanticNode::Root { .. } => {}
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn element_name(tag: &str) -> &str {
    CASED_ELEMENTS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(tag))
        .copied()
        .unwrap_or(tag)
}

/// Maps a property name to its SVG attribute name.
pub fn attribute_name(name: &str) -> String {
    if name == "xlinkHref" {
        return "xlink:href".to_string();
    }
    if name == "class" || CASED_ATTRIBUTES.contains(&name) {
        return name.to_string();
    }
    camel_to_kebab(name)
}

/// `strokeWidth` → `stroke-width`; `fooXMLBar` → `foo-xml-bar`.
fn camel_to_kebab(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('-');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

fn escape(text: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names() {
        assert_eq!(attribute_name("strokeWidth"), "stroke-width");
        assert_eq!(attribute_name("viewBox"), "viewBox");
        assert_eq!(attribute_name("xlinkHref"), "xlink:href");
        assert_eq!(attribute_name("fill"), "fill");
        assert_eq!(attribute_name("dataXMLValue"), "data-xml-value");
    }

    #[test]
    fn test_serialize_nested_svg() {
        let svg = Element::new("svg")
            .with_attr("viewBox", "0 0 10 10")
            .with_children(vec![
                SemanticNode::Element(Element::new("linearGradient").with_attr("gradientUnits", "userSpaceOnUse")),
                SemanticNode::Element(
                    Element::new("text")
                        .with_attr("fontSize", "3")
                        .with_children(vec![SemanticNode::text("a < b")]),
                ),
            ]);
        assert_eq!(
            serialize_svg(&svg),
            "<svg viewBox=\"0 0 10 10\"><linearGradient gradientUnits=\"userSpaceOnUse\"></linearGradient>\
             <text font-size=\"3\">a &lt; b</text></svg>"
        );
    }
}
