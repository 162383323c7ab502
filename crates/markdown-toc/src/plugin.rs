use markdown_headings::collect_headings;
use markdown_transform::{Plugin, TransformResult};
use tracing::debug;

use crate::options::TocOptions;
use crate::render::{build_tree, render_list_with_separator};
use crate::search::search;
use crate::PLUGIN_NAME;

/// Pipeline plugin that writes a table of contents under the TOC heading.
#[derive(Clone, Debug, Default)]
pub struct TocPlugin {
    options: TocOptions,
}

impl TocPlugin {
    pub fn new(options: TocOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TocOptions {
        &self.options
    }
}

impl Plugin for TocPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn transform(&self, document: &str) -> TransformResult<Option<String>> {
        insert_toc(document, &self.options)
    }
}

/// Replace the section under the TOC heading with a list of the headings that
/// follow it. `Ok(None)` when there is no TOC heading, nothing to list, or the
/// list is already current.
pub fn insert_toc(document: &str, options: &TocOptions) -> TransformResult<Option<String>> {
    let compiled = options.compile()?;
    let headings = collect_headings(document);

    let Some(plan) = search(&headings, document.len(), &compiled) else {
        debug!(headings = headings.len(), "no table of contents heading found");
        return Ok(None);
    };

    if plan.entries.is_empty() {
        debug!(
            heading = %headings[plan.opening].heading.text,
            "table of contents heading has nothing to list"
        );
        return Ok(None);
    }

    let line_sep = line_separator(document);
    let list = render_list_with_separator(
        &build_tree(&plan.entries),
        compiled.ordered,
        compiled.tight,
        line_sep,
    );

    let mut output = String::with_capacity(document.len() + list.len() + 2 * line_sep.len());
    output.push_str(&document[..plan.region.start]);
    if !output.ends_with('\n') {
        output.push_str(line_sep);
    }
    output.push_str(line_sep);
    output.push_str(&list);
    if plan.region.end < document.len() {
        output.push_str(line_sep);
        output.push_str(&document[plan.region.end..]);
    }

    debug!(entries = plan.entries.len(), "rendered table of contents");

    if output == document {
        Ok(None)
    } else {
        Ok(Some(output))
    }
}

/// The terminator of the document's first line; `\n` when it has none.
fn line_separator(document: &str) -> &'static str {
    match document.find('\n') {
        Some(idx) if document[..idx].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}
