//! Table-of-contents generation for markdown documents.
//!
//! The plugin looks for a heading such as `## Contents` or `## Table of
//! Contents`, then replaces everything between it and the next heading of the
//! same or higher level with a nested list linking to every heading that
//! follows. Links use GitHub-style slugs, so they resolve on rendered READMEs.
//!
//! ```
//! use markdown_toc::{insert_toc, TocOptions};
//!
//! let doc = "# Tool\n\n## Contents\n\n## Install\n\n## Usage\n";
//! let updated = insert_toc(doc, &TocOptions::default().with_tight(true))
//!     .unwrap()
//!     .unwrap();
//! assert!(updated.contains("- [Install](#install)\n- [Usage](#usage)\n"));
//! ```

mod label;
mod options;
mod plugin;
mod render;
mod search;
mod slug;

pub use label::link_label;
pub use options::{TocOptions, DEFAULT_HEADING, DEFAULT_MAX_DEPTH};
pub use plugin::{insert_toc, TocPlugin};
pub use render::{build_tree, render_list, render_list_with_separator, TocItem};
pub use search::TocEntry;
pub use slug::{slugify, Slugger};

/// Name reported in pipeline errors and log events.
pub const PLUGIN_NAME: &str = "toc";
