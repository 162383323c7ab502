use crate::search::TocEntry;

/// One list item. Items created only to hold a deeper list have no link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TocItem {
    pub link: Option<String>,
    pub children: Vec<TocItem>,
}

/// Nest entries by depth: the shallowest depth forms the top level, deeper
/// entries hang off the nearest preceding item.
pub fn build_tree(entries: &[TocEntry]) -> Vec<TocItem> {
    let Some(min_depth) = entries.iter().map(|entry| entry.depth).min() else {
        return Vec::new();
    };

    let mut root = Vec::new();
    for entry in entries {
        let link = format!("[{}](#{})", entry.label, entry.slug);
        insert(&mut root, entry.depth - min_depth, link);
    }
    root
}

fn insert(list: &mut Vec<TocItem>, level: usize, link: String) {
    if level == 0 {
        list.push(TocItem {
            link: Some(link),
            children: Vec::new(),
        });
        return;
    }

    if list.is_empty() {
        list.push(TocItem::default());
    }

    if let Some(parent) = list.last_mut() {
        insert(&mut parent.children, level - 1, link);
    }
}

/// Render the list as markdown, one trailing newline included.
pub fn render_list(items: &[TocItem], ordered: bool, tight: bool) -> String {
    render_list_with_separator(items, ordered, tight, "\n")
}

/// Like [`render_list`], ending every line with `line_sep`.
pub fn render_list_with_separator(
    items: &[TocItem],
    ordered: bool,
    tight: bool,
    line_sep: &str,
) -> String {
    let mut output = String::new();
    for line in list_lines(items, ordered, tight) {
        output.push_str(&line);
        output.push_str(line_sep);
    }
    output
}

fn list_lines(items: &[TocItem], ordered: bool, tight: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        if idx > 0 && !tight {
            lines.push(String::new());
        }

        let marker = if ordered {
            format!("{}.", idx + 1)
        } else {
            "-".to_string()
        };
        let indent = " ".repeat(marker.len() + 1);

        let mut body = Vec::new();
        if let Some(link) = &item.link {
            body.push(link.clone());
        }
        if !item.children.is_empty() {
            if item.link.is_some() && !tight {
                body.push(String::new());
            }
            body.extend(list_lines(&item.children, ordered, tight));
        }

        for (line_idx, line) in body.into_iter().enumerate() {
            if line_idx == 0 {
                lines.push(format!("{marker} {line}"));
            } else if line.is_empty() {
                lines.push(line);
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
    }

    lines
}
