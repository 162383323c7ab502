use markdown_headings::{collect_headings, HeadingKind};
use pretty_assertions::assert_eq;

const MIXED: &str = "\
# Project

Intro paragraph.

## Child *Heading* with [Link](https://example.com)

Content under child heading.

Heading Two
-----------

```bash
# Fenced Heading
```

~~~
## Another Heading
~~~

    # Indented Heading

### Last ###
";

#[test]
fn should_collect_headings_in_document_order() {
    let headings = collect_headings(MIXED);
    let summary: Vec<(usize, &str)> = headings
        .iter()
        .map(|parsed| (parsed.heading.depth, parsed.heading.text.as_str()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (1, "Project"),
            (2, "Child Heading with Link"),
            (2, "Heading Two"),
            (3, "Last"),
        ]
    );
}

#[test]
fn should_keep_raw_inline_markup() {
    let headings = collect_headings(MIXED);
    assert_eq!(
        headings[1].heading.raw,
        "Child *Heading* with [Link](https://example.com)"
    );
    assert_eq!(headings[1].heading.kind, HeadingKind::Atx);
}

#[test]
fn should_report_byte_ranges_covering_setext_underline() {
    let headings = collect_headings(MIXED);
    let setext = &headings[2];

    assert_eq!(setext.heading.kind, HeadingKind::Setext);
    assert_eq!(
        &MIXED[setext.heading.start..setext.heading.end],
        "Heading Two\n-----------\n"
    );
    assert_eq!(setext.line_range.end() - setext.line_range.start(), 1);
}

#[test]
fn should_find_heading_without_trailing_newline() {
    let headings = collect_headings("text\n## Tail");
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].heading.end, "text\n## Tail".len());
}

#[test]
fn should_return_nothing_for_plain_text() {
    assert!(collect_headings("just words\n\nmore words\n").is_empty());
}

#[test]
fn should_skip_headings_inside_html_comments() {
    let doc = "# Shown\n\n<!--\n## Hidden draft\n\nDraft\n-----\n-->\n\n<!-- ## inline -->\n## Also shown\n";
    let texts: Vec<String> = collect_headings(doc)
        .into_iter()
        .map(|parsed| parsed.heading.text)
        .collect();

    assert_eq!(texts, vec!["Shown", "Also shown"]);
}

#[test]
fn should_take_whole_paragraph_as_setext_content() {
    let doc = "# Top\n\nA heading that\nwraps onto *two* lines\n===\n\nbody\n";
    let headings = collect_headings(doc);
    let setext = &headings[1];

    assert_eq!(setext.heading.depth, 1);
    assert_eq!(setext.heading.raw, "A heading that wraps onto *two* lines");
    assert_eq!(setext.heading.text, "A heading that wraps onto two lines");
    assert_eq!(
        &doc[setext.heading.start..setext.heading.end],
        "A heading that\nwraps onto *two* lines\n===\n"
    );
    assert_eq!(setext.line_range, 2..=4);
}

#[test]
fn should_not_extend_setext_content_past_block_boundaries() {
    let doc = "```\ncode\n```\nTitle\n-----\n";
    let headings = collect_headings(doc);

    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].heading.raw, "Title");
    assert_eq!(headings[0].heading.start, "```\ncode\n```\n".len());
}
