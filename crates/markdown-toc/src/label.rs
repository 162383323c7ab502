use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

const HEADING_PREFIX: &str = "# ";

/// Turn raw heading markdown into link text: inline formatting survives,
/// links are unwrapped to their content since links cannot nest. Brackets
/// that are plain text are escaped so they cannot end the link text early.
pub fn link_label(raw: &str) -> String {
    let source = format!("{HEADING_PREFIX}{raw}");
    let mut output = String::with_capacity(raw.len());
    let mut brackets = Vec::new();
    let mut cursor = HEADING_PREFIX.len();
    let mut depth = 0usize;
    let mut outer: Option<Range<usize>> = None;
    let mut inner: Option<Range<usize>> = None;

    for (event, range) in Parser::new_ext(&source, Options::empty()).into_offset_iter() {
        if let Event::Text(_) = event {
            record_text_brackets(&source, range.clone(), &mut brackets);
        }

        match event {
            Event::Start(Tag::Link(..)) => {
                if depth == 0 {
                    push_source(&mut output, &source, cursor..range.start, &brackets);
                    outer = Some(range);
                    inner = None;
                }
                depth += 1;
            }
            Event::End(Tag::Link(..)) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(content) = inner.take() {
                        push_source(&mut output, &source, content, &brackets);
                    }
                    if let Some(link) = outer.take() {
                        cursor = link.end;
                    }
                }
            }
            _ if depth > 0 => {
                inner = Some(match inner.take() {
                    Some(current) => current.start.min(range.start)..current.end.max(range.end),
                    None => range,
                });
            }
            _ => {}
        }
    }

    if cursor < source.len() {
        push_source(&mut output, &source, cursor..source.len(), &brackets);
    }

    output.trim().to_string()
}

/// Offsets of unescaped `[` and `]` inside a text event.
fn record_text_brackets(source: &str, range: Range<usize>, brackets: &mut Vec<usize>) {
    let bytes = source.as_bytes();
    for pos in range {
        if !matches!(bytes[pos], b'[' | b']') {
            continue;
        }
        let backslashes = bytes[..pos].iter().rev().take_while(|b| **b == b'\\').count();
        if backslashes % 2 == 0 {
            brackets.push(pos);
        }
    }
}

fn push_source(output: &mut String, source: &str, range: Range<usize>, brackets: &[usize]) {
    for (offset, ch) in source[range.clone()].char_indices() {
        if brackets.contains(&(range.start + offset)) {
            output.push('\\');
        }
        output.push(ch);
    }
}
