//! Heading discovery for markdown documents.
//!
//! Headings are found line by line. Fenced and indented code blocks, HTML
//! comments and a leading YAML front matter block are skipped, so `# comment`
//! lines inside a shell snippet never show up as headings. A setext heading
//! takes the whole paragraph above its underline as content.

mod heading;
mod line;

pub use heading::{detect_heading, heading_plain_text, HeadingKind, MarkdownHeading, ParsedHeading};
pub use line::{split_lines, LineRecord};

use heading::{
    detect_atx_heading, detect_setext_heading, is_thematic_break, leading_indent_width,
    starts_container,
};

/// Collect every top-level heading in `contents`, in document order.
pub fn collect_headings(contents: &str) -> Vec<ParsedHeading> {
    let lines = split_lines(contents);

    let mut front_matter = FrontMatterState::default();
    let mut blocks = BlockTracker::default();
    let mut paragraph = Paragraph::Idle;
    let mut skip_until: Option<usize> = None;
    let mut headings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if let Some(skip_idx) = skip_until {
            if idx <= skip_idx {
                continue;
            }
            skip_until = None;
        }

        if front_matter.consume(idx, line) {
            continue;
        }

        if blocks.process(&line.text) {
            paragraph = Paragraph::Idle;
            continue;
        }

        if let Some(parsed) = detect_atx_heading(&lines, idx) {
            paragraph = Paragraph::Idle;
            headings.push(parsed);
            continue;
        }

        paragraph = paragraph.advance(idx, &line.text);
        if let Paragraph::Open(start) = paragraph {
            if let Some(parsed) = detect_setext_heading(&lines, start..=idx) {
                skip_until = Some(*parsed.line_range.end());
                paragraph = Paragraph::Idle;
                headings.push(parsed);
            }
        }
    }

    headings
}

/// Which kind of text the scanner is in, so setext underlines can claim every
/// line of the paragraph above them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Paragraph {
    Idle,
    /// Plain paragraph starting at this line index.
    Open(usize),
    /// Text inside a list item or block quote, including lazy continuations.
    Container,
}

impl Paragraph {
    fn advance(self, idx: usize, line: &str) -> Paragraph {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_thematic_break(trimmed) {
            return Paragraph::Idle;
        }

        if leading_indent_width(line) <= 3 && starts_container(trimmed) {
            return Paragraph::Container;
        }

        match self {
            Paragraph::Idle => Paragraph::Open(idx),
            other => other,
        }
    }
}

#[derive(Default)]
struct FrontMatterState {
    active: bool,
    done: bool,
}

impl FrontMatterState {
    fn consume(&mut self, index: usize, line: &LineRecord) -> bool {
        if self.done {
            return false;
        }

        let trimmed = line.text.trim();

        if index == 0 && trimmed == "---" {
            self.active = true;
            return true;
        }

        if self.active {
            if trimmed == "---" || trimmed == "..." {
                self.active = false;
                self.done = true;
            }
            return true;
        }

        self.done = true;
        false
    }
}

/// Tracks blocks whose lines are never headings: code and HTML comments.
#[derive(Default)]
struct BlockTracker {
    fenced: Option<FencedBlock>,
    html_comment: bool,
    indented_active: bool,
    previous_blank: bool,
    seen_content: bool,
}

#[derive(Clone, Copy)]
struct FencedBlock {
    fence_char: char,
    fence_len: usize,
}

impl BlockTracker {
    /// Returns true when `line` belongs to a code block or HTML comment.
    fn process(&mut self, line: &str) -> bool {
        let in_code = self.classify(line);
        self.previous_blank = line.trim().is_empty();
        self.seen_content |= !self.previous_blank;
        in_code
    }

    fn classify(&mut self, line: &str) -> bool {
        if let Some(fence) = self.fenced {
            if is_closing_fence(line, fence) {
                self.fenced = None;
            }
            return true;
        }

        if self.html_comment {
            if line.contains(COMMENT_CLOSE) {
                self.html_comment = false;
            }
            return true;
        }

        if let Some(after_open) = comment_start(line) {
            self.indented_active = false;
            self.html_comment = !after_open.contains(COMMENT_CLOSE);
            return true;
        }

        if let Some(fence) = detect_fence_start(line) {
            self.indented_active = false;
            self.fenced = Some(fence);
            return true;
        }

        let is_blank = line.trim().is_empty();
        let is_indented = leading_indent_width(line) >= 4 && !is_blank;

        if self.indented_active {
            if is_blank || is_indented {
                return true;
            }
            self.indented_active = false;
            return false;
        }

        // Indented code cannot interrupt a paragraph.
        if is_indented && (self.previous_blank || !self.seen_content) {
            self.indented_active = true;
            return true;
        }

        false
    }
}

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Text after `<!--` when `line` opens an HTML comment block.
fn comment_start(line: &str) -> Option<&str> {
    if leading_indent_width(line) > 3 {
        return None;
    }
    line.trim_start().strip_prefix(COMMENT_OPEN)
}

fn detect_fence_start(line: &str) -> Option<FencedBlock> {
    if leading_indent_width(line) > 3 {
        return None;
    }

    let rest = line.trim_start();
    let first = rest.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = rest.chars().take_while(|ch| *ch == first).count();
    if count < 3 {
        return None;
    }

    // Backtick fences may not carry backticks in their info string.
    if first == '`' && rest[count..].contains('`') {
        return None;
    }

    Some(FencedBlock {
        fence_char: first,
        fence_len: count,
    })
}

fn is_closing_fence(line: &str, fence: FencedBlock) -> bool {
    if leading_indent_width(line) > 3 {
        return false;
    }

    let trimmed = line.trim();
    let count = trimmed.chars().take_while(|ch| *ch == fence.fence_char).count();
    count >= fence.fence_len && count == trimmed.chars().count()
}
