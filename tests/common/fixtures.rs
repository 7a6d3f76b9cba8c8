//! Builders for semantic trees and their HAST JSON form.

use quire::idf::{Element, SemanticNode};
use serde_json::{Value, json};

pub fn el(tag: &str, children: Vec<SemanticNode>) -> SemanticNode {
    SemanticNode::element(tag, children)
}

pub fn el_with(tag: &str, attrs: &[(&str, &str)], children: Vec<SemanticNode>) -> SemanticNode {
    let element = attrs
        .iter()
        .fold(Element::new(tag), |e, (k, v)| e.with_attr(*k, *v))
        .with_children(children);
    SemanticNode::Element(element)
}

pub fn text(value: &str) -> SemanticNode {
    SemanticNode::text(value)
}

pub fn root(children: Vec<SemanticNode>) -> SemanticNode {
    SemanticNode::root(children)
}

pub fn hast_el(tag: &str, properties: Value, children: Vec<Value>) -> Value {
    json!({"type": "element", "tagName": tag, "properties": properties, "children": children})
}

pub fn hast_text(value: &str) -> Value {
    json!({"type": "text", "value": value})
}

pub fn hast_root(children: Vec<Value>) -> Value {
    json!({"type": "root", "children": children})
}

/// A document mixing every block kind, repeated `sections` times.
pub fn long_document(sections: usize) -> SemanticNode {
    let section = |i: usize| {
        vec![
            el("h2", vec![text(&format!("Section {}", i))]),
            el(
                "p",
                vec![
                    text("Some "),
                    el("strong", vec![text("bold")]),
                    text(" and "),
                    el("a", vec![text("a link")]),
                    text("."),
                ],
            ),
            el(
                "ul",
                vec![
                    el("li", vec![text("first")]),
                    el("li", vec![el("p", vec![text("second")]), el("ul", vec![el("li", vec![text("nested")])])]),
                ],
            ),
            el("blockquote", vec![el("p", vec![text("quoted")])]),
            el("pre", vec![el("code", vec![text("fn main() {\n    run();\n}")])]),
            el(
                "table",
                vec![
                    el("thead", vec![el("tr", vec![el("th", vec![text("k")]), el("th", vec![text("v")])])]),
                    el("tbody", vec![el("tr", vec![el("td", vec![text("a")]), el("td", vec![text("1")])])]),
                ],
            ),
        ]
    };
    root((0..sections).flat_map(section).collect())
}
