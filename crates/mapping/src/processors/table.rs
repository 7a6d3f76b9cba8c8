use crate::inline::{TextStyle, inline};
use crate::processor::{NodeProcessor, ProcessContext};
use crate::utils::{is_heading_tag, trim_blank_edges};
use async_trait::async_trait;
use quire_idf::{
    BlockProps, ContentNode, Element, Inline, SemanticNode, StyleRefs, StyledText, TableBody,
    TableNode, TextContent, TextNode,
};
use quire_style::Alignment;
use std::slice;

/// `table`, laid out with the grid layout.
///
/// Cells holding block elements are flattened to runs joined by line
/// breaks; the engine's cells take a single text stream.
#[derive(Debug, Default)]
pub struct TableProcessor;

#[async_trait]
impl NodeProcessor for TableProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("table")
    }

    async fn process(&self, element: &Element, _ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        let mut body = Vec::new();
        let mut header_rows = 0;
        for (row, in_head) in table_rows(element) {
            let cells: Vec<ContentNode> = row
                .element_children()
                .filter(|c| c.is("th") || c.is("td"))
                .map(table_cell)
                .collect();
            if cells.is_empty() {
                continue;
            }
            if in_head {
                header_rows += 1;
            }
            body.push(cells);
        }

        if body.is_empty() {
            log::debug!("Skipping table without cells");
            return Vec::new();
        }
        vec![ContentNode::Table(TableNode {
            table: TableBody {
                body,
                widths: None,
                header_rows,
            },
            layout: Some("tableLayout".to_string()),
            props: BlockProps::styled("table"),
        })]
    }
}

/// Rows from `thead`/`tbody`/`tfoot` sections, or the table's own `tr`
/// children when it has no sections. Each row is paired with whether it
/// sits in the head.
fn table_rows(table: &Element) -> Vec<(&Element, bool)> {
    let sections: Vec<&Element> = table
        .element_children()
        .filter(|c| matches!(c.tag.as_str(), "thead" | "tbody" | "tfoot"))
        .collect();
    if sections.is_empty() {
        return table.element_children().filter(|c| c.is("tr")).map(|tr| (tr, false)).collect();
    }
    sections
        .into_iter()
        .flat_map(|section| {
            let in_head = section.is("thead");
            section.element_children().filter(|c| c.is("tr")).map(move |tr| (tr, in_head))
        })
        .collect()
}

fn table_cell(cell: &Element) -> ContentNode {
    let text = if cell.element_children().any(is_block_child) {
        complex_cell(cell)
    } else {
        simple_cell(cell)
    };
    // Left is the renderer default and stays implicit.
    let alignment = cell
        .attr("align")
        .and_then(Alignment::parse)
        .filter(|a| *a != Alignment::Left);
    ContentNode::Text(TextNode {
        text,
        props: BlockProps {
            alignment,
            ..BlockProps::styled(if cell.is("th") { "th" } else { "td" })
        },
        preserve_leading_spaces: false,
    })
}

fn is_block_child(el: &Element) -> bool {
    matches!(
        el.tag.as_str(),
        "ul" | "ol" | "p" | "div" | "blockquote" | "pre" | "table"
    ) || is_heading_tag(&el.tag)
}

fn simple_cell(cell: &Element) -> TextContent {
    let mut runs = inline(&cell.children, &TextStyle::default());
    trim_blank_edges(&mut runs);
    if runs.is_empty() {
        TextContent::Plain(String::new())
    } else {
        TextContent::Runs(runs)
    }
}

/// One paragraph-like piece of a complex cell.
enum Part {
    Plain(String),
    Runs(Vec<Inline>),
}

fn complex_cell(cell: &Element) -> TextContent {
    let base = TextStyle::default();
    let mut parts = Vec::new();
    for child in &cell.children {
        let el = match child {
            SemanticNode::Element(el) => el,
            SemanticNode::Text(value) => {
                let text = value.trim();
                if !text.is_empty() {
                    parts.push(Part::Plain(text.to_string()));
                }
                continue;
            }
            SemanticNode::Root { .. } => continue,
        };
        let part = match el.tag.as_str() {
            "ul" | "ol" => {
                let text = bullet_text(el);
                (!text.is_empty()).then_some(Part::Plain(text))
            }
            "p" | "div" => to_part(inline(&el.children, &base)),
            "blockquote" => to_part(
                inline(&el.children, &base).into_iter().map(|r| restyle(r, |st| st.italics = true)).collect(),
            ),
            "pre" | "code" => {
                let text = el.text_content();
                (!text.is_empty()).then(|| {
                    Part::Runs(vec![Inline::Styled(StyledText {
                        text,
                        style: StyleRefs::from("code"),
                        ..Default::default()
                    })])
                })
            }
            tag if is_heading_tag(tag) => to_part(
                inline(&el.children, &base).into_iter().map(|r| restyle(r, |st| st.bold = true)).collect(),
            ),
            _ => to_part(inline(slice::from_ref(child), &base)),
        };
        parts.extend(part);
    }
    join_parts(parts)
}

/// Lists inside a cell become `• item` lines.
fn bullet_text(list: &Element) -> String {
    list.element_children()
        .filter(|c| c.is("li"))
        .filter_map(|li| {
            let text: String = inline(&li.children, &TextStyle::default())
                .iter()
                .map(Inline::plain_text)
                .collect();
            let text = text.trim();
            (!text.is_empty()).then(|| format!("• {text}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unstyled content collapses to trimmed text; anything styled keeps its runs.
fn to_part(runs: Vec<Inline>) -> Option<Part> {
    if runs.iter().any(|r| !matches!(r, Inline::Str(_))) {
        return Some(Part::Runs(runs));
    }
    let text: String = runs.iter().map(Inline::plain_text).collect();
    let text = text.trim();
    (!text.is_empty()).then(|| Part::Plain(text.to_string()))
}

fn restyle(run: Inline, apply: impl Fn(&mut StyledText)) -> Inline {
    let mut styled = match run {
        Inline::Str(text) => StyledText {
            text,
            ..Default::default()
        },
        Inline::Styled(styled) => styled,
        svg @ Inline::Svg { .. } => return svg,
    };
    apply(&mut styled);
    Inline::Styled(styled)
}

fn join_parts(parts: Vec<Part>) -> TextContent {
    match parts.as_slice() {
        [] => return TextContent::Plain(String::new()),
        [Part::Plain(text)] => return TextContent::Plain(text.clone()),
        _ => {}
    }
    let mut runs = Vec::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            runs.push(Inline::Str("\n".to_string()));
        }
        match part {
            Part::Plain(text) => runs.push(Inline::Str(text)),
            Part::Runs(more) => runs.extend(more),
        }
    }
    TextContent::Runs(runs)
}
