use crate::blocks::{ITEM_MARGIN, code_block, horizontal_rule};
use crate::buffer::RunBuffer;
use crate::inline::{TextStyle, inline};
use crate::processor::{NodeProcessor, ProcessContext};
use crate::utils::{collapse_whitespace, is_inline_code, is_inline_tag, trim_run_edges};
use async_trait::async_trait;
use quire_idf::{ContentNode, Element, Inline, ListNode, SemanticNode, TextContent};
use quire_style::Margins;
use std::slice;

const CHECKED: &str = "☑ ";
const UNCHECKED: &str = "☐ ";

/// Blockquotes nested in an item are pulled in and spaced from the text.
const NESTED_QUOTE_MARGIN: Margins = Margins::new(8.0, 4.0, 0.0, 8.0);

/// `ul` and `ol`. Each `li` becomes one item node.
#[derive(Debug, Default)]
pub struct ListProcessor;

#[async_trait]
impl NodeProcessor for ListProcessor {
    fn can_handle(&self, element: &Element) -> bool {
        element.is("ul") || element.is("ol")
    }

    async fn process(&self, element: &Element, ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
        let mut items = Vec::new();
        for li in element.element_children().filter(|c| c.is("li")) {
            items.push(list_item(li, ctx).await);
        }
        vec![ContentNode::List(ListNode::new(element.is("ol"), items))]
    }
}

async fn list_item(li: &Element, ctx: &ProcessContext<'_>) -> ContentNode {
    let base = TextStyle::default();
    let mut buffer = RunBuffer::new(item_paragraph);

    for child in &li.children {
        match child {
            SemanticNode::Text(value) => {
                let mut text = value.as_str();
                if buffer.is_untouched() {
                    text = text.trim_start();
                }
                push_text(&mut buffer, text);
            }
            SemanticNode::Element(el) if is_checkbox(el) => {}
            SemanticNode::Element(el)
                if !el.is("img") && (is_inline_code(el) || is_inline_tag(&el.tag)) =>
            {
                for run in inline(slice::from_ref(child), &base) {
                    match run {
                        Inline::Str(s) if s == "\n" => {
                            if !buffer.pending().is_empty() {
                                buffer.push(Inline::Str(s));
                            }
                        }
                        Inline::Str(s) => push_text(&mut buffer, &s),
                        other => buffer.push(other),
                    }
                }
            }
            SemanticNode::Element(el) if el.is("p") || el.is("div") => {
                let runs = inline(&el.children, &base)
                    .into_iter()
                    .filter(|r| !matches!(r, Inline::Str(s) if s.trim().is_empty()))
                    .collect();
                buffer.flush();
                buffer.commit(item_paragraph(runs));
            }
            SemanticNode::Element(el) => {
                buffer.flush();
                let blocks = item_block(el, ctx).await;
                buffer.commit(blocks);
            }
            SemanticNode::Root { .. } => {}
        }
    }

    let mut blocks = buffer.finish();
    if let Some(checked) = task_state(li) {
        mark_task(&mut blocks, if checked { CHECKED } else { UNCHECKED });
    }
    ContentNode::from_blocks(blocks)
        .unwrap_or_else(|| ContentNode::text("", "p").with_margin(ITEM_MARGIN))
}

/// Collapses whitespace and drops a separator with nothing before it.
fn push_text<F>(buffer: &mut RunBuffer<F>, text: &str)
where
    F: Fn(Vec<Inline>) -> Option<ContentNode>,
{
    let text = collapse_whitespace(text);
    if text.is_empty() || (text == " " && buffer.pending().is_empty()) {
        return;
    }
    buffer.push(Inline::Str(text));
}

fn item_paragraph(mut runs: Vec<Inline>) -> Option<ContentNode> {
    trim_run_edges(&mut runs);
    if runs.is_empty() {
        return None;
    }
    Some(ContentNode::text(runs, "p").with_margin(ITEM_MARGIN))
}

async fn item_block(el: &Element, ctx: &ProcessContext<'_>) -> Vec<ContentNode> {
    match el.tag.as_str() {
        "blockquote" => ctx
            .visit_element(el)
            .await
            .into_iter()
            .map(|node| node.with_margin(NESTED_QUOTE_MARGIN))
            .collect(),
        "pre" | "code" => {
            let text = el.text_content();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![code_block(text)]
            }
        }
        "hr" => vec![horizontal_rule()],
        _ => ctx.visit_element(el).await,
    }
}

fn is_checkbox(el: &Element) -> bool {
    el.is("input") && el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
}

/// `Some(checked)` for a task-list item.
///
/// The checkbox may sit directly in the item or in its first paragraph;
/// a `checked` attribute on the item itself also marks it.
fn task_state(li: &Element) -> Option<bool> {
    let direct = li.element_children().find(|c| is_checkbox(c));
    let in_paragraph = || {
        li.element_children()
            .find(|c| c.is("p"))
            .and_then(|p| p.element_children().find(|c| is_checkbox(c)))
    };
    match direct.or_else(in_paragraph) {
        Some(input) => Some(input.has_attr("checked")),
        None if li.has_attr("checked") => Some(li.attr("checked") != Some("false")),
        None => None,
    }
}

/// Prefixes the first text block with the checkbox glyph.
fn mark_task(blocks: &mut Vec<ContentNode>, prefix: &str) {
    let first_text = blocks.iter_mut().find_map(|b| match b {
        ContentNode::Text(t) => Some(t),
        _ => None,
    });
    let Some(node) = first_text else {
        blocks.insert(0, ContentNode::text(prefix.trim_end(), "p").with_margin(ITEM_MARGIN));
        return;
    };
    match &mut node.text {
        TextContent::Plain(s) => s.insert_str(0, prefix),
        TextContent::Runs(runs) => match runs.first_mut() {
            Some(Inline::Str(s)) => s.insert_str(0, prefix),
            _ => runs.insert(0, Inline::Str(prefix.to_string())),
        },
    }
}
