use crate::line::LineRecord;
use pulldown_cmark::{Event, Options, Parser};
use std::borrow::Cow;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Atx,
    Setext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownHeading {
    pub depth: usize,
    /// Inline markdown of the heading content, closing sequence removed.
    pub raw: String,
    /// Plain text with inline markup stripped and whitespace collapsed.
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: HeadingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeading {
    pub heading: MarkdownHeading,
    pub line_range: RangeInclusive<usize>,
}

pub fn detect_heading(lines: &[LineRecord], index: usize) -> Option<ParsedHeading> {
    detect_atx_heading(lines, index).or_else(|| detect_setext_heading(lines, index..=index))
}

pub(crate) fn detect_atx_heading(lines: &[LineRecord], index: usize) -> Option<ParsedHeading> {
    let line = lines.get(index)?;
    let (depth, content) = split_atx(&line.text)?;
    let raw = content.to_string();
    let text = heading_plain_text(&raw);

    Some(ParsedHeading {
        heading: MarkdownHeading {
            depth,
            raw,
            text,
            start: line.start,
            end: line.end,
            kind: HeadingKind::Atx,
        },
        line_range: index..=index,
    })
}

/// Split an ATX heading line into its depth and trimmed content.
fn split_atx(line: &str) -> Option<(usize, &str)> {
    if leading_indent_width(line) > 3 {
        return None;
    }

    let trimmed_start = line.trim_start();
    let pound_count = trimmed_start.chars().take_while(|ch| *ch == '#').count();
    if pound_count == 0 || pound_count > 6 {
        return None;
    }

    let after_hashes = &trimmed_start[pound_count..];
    if !after_hashes.is_empty() && !after_hashes.starts_with(char::is_whitespace) {
        return None;
    }

    let mut content = after_hashes.trim();
    let stripped_hashes = content.trim_end_matches('#');
    if stripped_hashes.len() < content.len() {
        if stripped_hashes.is_empty() {
            content = stripped_hashes;
        } else if stripped_hashes.ends_with(char::is_whitespace) {
            content = stripped_hashes.trim_end();
        }
    }

    Some((pound_count, content))
}

/// Setext heading whose content is the paragraph spanning `paragraph`, with the
/// underline on the line right after it.
pub(crate) fn detect_setext_heading(
    lines: &[LineRecord],
    paragraph: RangeInclusive<usize>,
) -> Option<ParsedHeading> {
    let (first_idx, last_idx) = (*paragraph.start(), *paragraph.end());
    let first = lines.get(first_idx)?;
    let next = lines.get(last_idx + 1)?;

    if leading_indent_width(&first.text) > 3 || leading_indent_width(&next.text) > 3 {
        return None;
    }

    if starts_other_block(first.text.trim()) {
        return None;
    }

    let depth = match_setext_depth(next.text.trim())?;
    let raw = lines[first_idx..=last_idx]
        .iter()
        .map(|line| line.text.trim())
        .filter(|content| !content.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if raw.is_empty() {
        return None;
    }
    let text = heading_plain_text(&raw);

    Some(ParsedHeading {
        heading: MarkdownHeading {
            depth,
            raw,
            text,
            start: first.start,
            end: next.end,
            kind: HeadingKind::Setext,
        },
        line_range: first_idx..=last_idx + 1,
    })
}

fn match_setext_depth(line: &str) -> Option<usize> {
    let fence_char = line.chars().next()?;
    if fence_char != '=' && fence_char != '-' {
        return None;
    }

    if line.len() < 3 || !line.chars().all(|ch| ch == fence_char) {
        return None;
    }

    Some(if fence_char == '=' { 1 } else { 2 })
}

/// Lines that open some other block can never be the content line of a setext heading.
fn starts_other_block(content: &str) -> bool {
    if starts_container(content) || split_atx(content).is_some() {
        return true;
    }

    match_setext_depth(content).is_some()
        || is_thematic_break(content)
        || content.starts_with("```")
        || content.starts_with("~~~")
}

/// Block quote or list item marker; the lines after it belong to that container.
pub(crate) fn starts_container(content: &str) -> bool {
    if content.starts_with('>') {
        return true;
    }

    let mut chars = content.chars();
    match chars.next() {
        Some('-' | '*' | '+') => matches!(chars.next(), None | Some(' ' | '\t')),
        Some(ch) if ch.is_ascii_digit() => {
            let rest = content.trim_start_matches(|c: char| c.is_ascii_digit());
            let digits = content.len() - rest.len();
            digits <= 9
                && (rest.starts_with(". ") || rest.starts_with(") ") || rest == "." || rest == ")")
        }
        _ => false,
    }
}

pub(crate) fn is_thematic_break(content: &str) -> bool {
    let Some(marker) = content.chars().next() else {
        return false;
    };
    if !matches!(marker, '-' | '*' | '_') {
        return false;
    }

    let mut count = 0usize;
    for ch in content.chars() {
        match ch {
            ' ' | '\t' => {}
            ch if ch == marker => count += 1,
            _ => return false,
        }
    }
    count >= 3
}

/// Render heading content as plain text, the way it reads on screen.
pub fn heading_plain_text(input: &str) -> String {
    let source = format!("# {}", escape_closing_hashes(input));
    let mut text_segments = Vec::new();

    for event in Parser::new_ext(&source, Options::empty()) {
        match event {
            Event::Text(cow) | Event::Code(cow) => text_segments.push(cow.into_string()),
            Event::SoftBreak | Event::HardBreak => text_segments.push(" ".to_string()),
            _ => {}
        }
    }

    text_segments
        .concat()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trailing `#`s in content are literal; escape them so the `# ` wrapper used
/// for parsing does not read them as a closing sequence.
fn escape_closing_hashes(input: &str) -> Cow<'_, str> {
    let body = input.trim_end_matches('#');
    let hashes = input.len() - body.len();
    if hashes == 0 || !(body.is_empty() || body.ends_with(char::is_whitespace)) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(format!("{body}{}", "\\#".repeat(hashes)))
}

pub(crate) fn leading_indent_width(line: &str) -> usize {
    let mut width = 0usize;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += 4,
            _ => break,
        }
    }
    width
}
