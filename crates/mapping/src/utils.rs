use quire_idf::{Element, Inline, SemanticNode};

/// Tags the inline accumulator handles in place. `code` is absent: it can
/// be a block or a run and callers decide with [`is_inline_code`].
pub fn is_inline_tag(tag: &str) -> bool {
    matches!(
        tag,
        "a" | "strong" | "b" | "em" | "i" | "s" | "strike" | "del" | "u" | "span" | "br" | "img" | "svg"
    )
}

/// A `code` element whose own text carries no line break.
pub fn is_inline_code(element: &Element) -> bool {
    element.is("code") && !has_multiline_text(element)
}

/// True when a direct text child contains a newline.
pub fn has_multiline_text(element: &Element) -> bool {
    element
        .children
        .iter()
        .any(|c| matches!(c, SemanticNode::Text(t) if t.contains('\n')))
}

pub fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Collapses every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Drops whitespace-only plain runs from both ends.
pub fn trim_blank_edges(runs: &mut Vec<Inline>) {
    while runs.first().is_some_and(is_blank_str) {
        runs.remove(0);
    }
    while runs.last().is_some_and(is_blank_str) {
        runs.pop();
    }
}

fn is_blank_str(run: &Inline) -> bool {
    matches!(run, Inline::Str(s) if s.trim().is_empty())
}

/// Trims leading whitespace of the first run and trailing whitespace of the
/// last, removing runs that become empty.
pub fn trim_run_edges(runs: &mut Vec<Inline>) {
    while let Some(first) = runs.first_mut() {
        if let Some(text) = first.text_mut() {
            let trimmed = text.trim_start().to_string();
            *text = trimmed;
            if text.is_empty() {
                runs.remove(0);
                continue;
            }
        }
        break;
    }
    while let Some(last) = runs.last_mut() {
        if let Some(text) = last.text_mut() {
            let trimmed = text.trim_end().to_string();
            *text = trimmed;
            if text.is_empty() {
                runs.pop();
                continue;
            }
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace(" a \n\t b  "), " a b ");
    }

    #[test]
    fn test_trim_run_edges() {
        let mut runs = vec![
            Inline::Str("  ".into()),
            Inline::Str(" a ".into()),
            Inline::Str(" b ".into()),
            Inline::Str("\n".into()),
        ];
        trim_run_edges(&mut runs);
        assert_eq!(runs, vec![Inline::Str("a ".into()), Inline::Str(" b".into())]);
    }

    #[test]
    fn test_inline_code_detection() {
        let code = Element::new("code").with_children(vec![SemanticNode::text("x")]);
        assert!(is_inline_code(&code));
        let block = Element::new("code").with_children(vec![SemanticNode::text("x\ny")]);
        assert!(!is_inline_code(&block));
    }
}
