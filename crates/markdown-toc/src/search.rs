use std::ops::Range;

use markdown_headings::ParsedHeading;

use crate::label::link_label;
use crate::options::CompiledOptions;
use crate::slug::Slugger;

/// A heading that will be listed in the table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    pub depth: usize,
    pub label: String,
    pub slug: String,
}

/// Where the table of contents goes and what it lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocPlan {
    /// Index of the heading that names the table of contents.
    pub opening: usize,
    /// Byte range replaced by the generated list.
    pub region: Range<usize>,
    pub entries: Vec<TocEntry>,
}

/// Locate the TOC heading and gather the headings that follow its section.
///
/// Returns `None` when no heading matches the configured TOC heading.
pub(crate) fn search(
    headings: &[ParsedHeading],
    document_len: usize,
    options: &CompiledOptions,
) -> Option<TocPlan> {
    let mut slugger = Slugger::new();
    let slugs: Vec<String> = headings
        .iter()
        .map(|parsed| slugger.slug(&parsed.heading.text))
        .collect();

    let opening = headings
        .iter()
        .position(|parsed| options.heading.is_match(&parsed.heading.text))?;
    let opening_heading = &headings[opening].heading;

    let closing = headings
        .iter()
        .enumerate()
        .skip(opening + 1)
        .find(|(_, parsed)| parsed.heading.depth <= opening_heading.depth)
        .map(|(idx, _)| idx);

    let region_end = closing
        .map(|idx| headings[idx].heading.start)
        .unwrap_or(document_len);

    let entries = match closing {
        Some(first) => headings[first..]
            .iter()
            .zip(&slugs[first..])
            .filter(|(parsed, _)| !parsed.heading.text.is_empty())
            .filter(|(parsed, _)| parsed.heading.depth <= options.max_depth)
            .filter(|(parsed, _)| {
                options
                    .skip
                    .as_ref()
                    .map_or(true, |skip| !skip.is_match(&parsed.heading.text))
            })
            .map(|(parsed, slug)| TocEntry {
                depth: parsed.heading.depth,
                label: link_label(&parsed.heading.raw),
                slug: format!("{}{slug}", options.prefix),
            })
            .collect(),
        None => Vec::new(),
    };

    Some(TocPlan {
        opening,
        region: opening_heading.end..region_end,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TocOptions;
    use markdown_headings::collect_headings;

    fn plan(doc: &str, options: TocOptions) -> Option<TocPlan> {
        let compiled = options.compile().unwrap();
        search(&collect_headings(doc), doc.len(), &compiled)
    }

    #[test]
    fn lists_headings_after_the_toc_section_only() {
        let doc = "# Title\n## Contents\nold list\n### Stale\n## Install\n### Linux\n";
        let plan = plan(doc, TocOptions::default()).unwrap();

        assert_eq!(plan.opening, 1);
        assert_eq!(&doc[plan.region.clone()], "old list\n### Stale\n");
        let slugs: Vec<&str> = plan.entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["install", "linux"]);
    }

    #[test]
    fn missing_toc_heading_yields_no_plan() {
        assert!(plan("# Title\n## Usage\n", TocOptions::default()).is_none());
    }

    #[test]
    fn region_runs_to_end_without_closing_heading() {
        let doc = "# Title\n## Toc\n### Nested\n";
        let plan = plan(doc, TocOptions::default()).unwrap();
        assert_eq!(plan.region, "# Title\n## Toc\n".len()..doc.len());
        assert!(plan.entries.is_empty());
    }

    #[test]
    fn duplicate_slugs_count_headings_before_the_toc() {
        let doc = "# Usage\n## Contents\n## Usage\n";
        let plan = plan(doc, TocOptions::default()).unwrap();
        assert_eq!(plan.entries[0].slug, "usage-1");
    }

    #[test]
    fn depth_skip_and_prefix_apply() {
        let doc = "## Contents\n## Keep\n### Deep\n## Changelog\n";
        let options = TocOptions::default()
            .with_max_depth(2)
            .with_skip("changelog")
            .with_prefix("user-content-");
        let plan = plan(doc, options).unwrap();

        assert_eq!(
            plan.entries,
            vec![TocEntry {
                depth: 2,
                label: "Keep".to_string(),
                slug: "user-content-keep".to_string(),
            }]
        );
    }

    #[test]
    fn empty_headings_are_not_listed_but_still_take_a_slug() {
        let doc = "## Contents\n## Install\n##\n## Usage\n## \n";
        let plan = plan(doc, TocOptions::default()).unwrap();
        let labels: Vec<&str> = plan.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Install", "Usage"]);

        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug(""), "");
        assert_eq!(slugger.slug(""), "-1");
    }
}
