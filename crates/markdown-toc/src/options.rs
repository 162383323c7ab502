use markdown_transform::{TransformError, TransformResult};
use regex::{Regex, RegexBuilder};

use crate::PLUGIN_NAME;

/// Heading text that marks where the table of contents goes.
pub const DEFAULT_HEADING: &str = "(table[ -]of[ -])?contents?|toc";
pub const DEFAULT_MAX_DEPTH: u8 = 6;

/// Options recognised by the table-of-contents plugin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocOptions {
    /// Pattern matched case-insensitively against the whole text of the TOC heading.
    pub heading: String,
    /// Deepest heading level listed, 1 through 6.
    pub max_depth: u8,
    /// Headings whose whole text matches are left out.
    pub skip: Option<String>,
    /// Render items without blank lines between them.
    pub tight: bool,
    pub ordered: bool,
    /// Prepended to every generated slug.
    pub prefix: Option<String>,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            skip: None,
            tight: false,
            ordered: false,
            prefix: None,
        }
    }
}

impl TocOptions {
    pub fn with_tight(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_skip(mut self, skip: impl Into<String>) -> Self {
        self.skip = Some(skip.into());
        self
    }

    pub fn with_ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub(crate) fn compile(&self) -> TransformResult<CompiledOptions> {
        if !(1..=6).contains(&self.max_depth) {
            return Err(TransformError::invalid_option(
                PLUGIN_NAME,
                "max_depth",
                format!("expected a heading level between 1 and 6, got {}", self.max_depth),
            ));
        }

        let heading = whole_text_pattern(&self.heading)
            .map_err(|err| TransformError::invalid_option(PLUGIN_NAME, "heading", err.to_string()))?;
        let skip = self
            .skip
            .as_deref()
            .map(whole_text_pattern)
            .transpose()
            .map_err(|err| TransformError::invalid_option(PLUGIN_NAME, "skip", err.to_string()))?;

        Ok(CompiledOptions {
            heading,
            skip,
            max_depth: usize::from(self.max_depth),
            tight: self.tight,
            ordered: self.ordered,
            prefix: self.prefix.clone().unwrap_or_default(),
        })
    }
}

#[derive(Debug)]
pub(crate) struct CompiledOptions {
    pub heading: Regex,
    pub skip: Option<Regex>,
    pub max_depth: usize,
    pub tight: bool,
    pub ordered: bool,
    pub prefix: String,
}

fn whole_text_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(true)
        .size_limit(1024 * 100)
        .build()
}
