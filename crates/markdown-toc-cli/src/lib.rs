//! Document transformer behind the `readme-toc` binary: read a markdown file,
//! run it through the table-of-contents plugin, and write it back in place.

pub mod error;
pub mod fs;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use markdown_toc::{TocOptions, TocPlugin};
use markdown_toc_config::{Config, LoadOptions, DEFAULT_DOCUMENT};
use markdown_transform::Processor;
use tracing::{debug, info};

pub use error::{ExitCode, RunError, RunResult};

/// Regenerate the table of contents in readme.md.
///
/// Settings come from `.readme-toc.toml` in the working directory or the git root.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {}

/// What to transform and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub document: PathBuf,
    pub toc: TocOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            document: PathBuf::from(DEFAULT_DOCUMENT),
            toc: TocOptions::default(),
        }
    }
}

impl RunOptions {
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            document: config.document.clone(),
            toc: config.toc.clone(),
        }
    }

    pub fn with_toc(mut self, toc: TocOptions) -> Self {
        self.toc = toc;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub document: PathBuf,
    /// False when the document already carried an up-to-date table of contents.
    pub changed: bool,
}

/// Read the document, insert the table of contents, and overwrite the file.
///
/// The file is only touched after the transform succeeds, and not at all when
/// the output equals the input.
pub fn run(options: &RunOptions) -> RunResult<RunOutcome> {
    let path = &options.document;
    let contents = std::fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "read document");

    let processor = Processor::new().with(TocPlugin::new(options.toc.clone()));
    let processed = processor.process(&contents)?;

    if processed.changed {
        fs::write_atomic(path, &processed.contents).map_err(|source| RunError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "table of contents updated");
    } else {
        info!(path = %path.display(), "table of contents already up to date");
    }

    Ok(RunOutcome {
        document: path.clone(),
        changed: processed.changed,
    })
}

/// Entry point for the binary: resolve configuration for the current directory and run.
pub fn execute(_cli: Cli) -> Result<RunOutcome> {
    let config = Config::load(LoadOptions::default()).map_err(RunError::from)?;
    let options = RunOptions::from_config(&config);
    Ok(run(&options)?)
}
