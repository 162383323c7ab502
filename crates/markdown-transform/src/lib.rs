//! A small transform pipeline: plugins run in the order they were added, each
//! receiving the previous plugin's output.

mod error;

use std::borrow::Cow;

use tracing::debug;

pub use error::{TransformError, TransformResult};

/// A single document transform.
pub trait Plugin {
    /// Stable name used in errors and log events.
    fn name(&self) -> &'static str;

    /// Transform `document`. `Ok(None)` means the document is left as is.
    fn transform(&self, document: &str) -> TransformResult<Option<String>>;
}

/// Result of running a document through a [`Processor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Processed {
    pub contents: String,
    pub changed: bool,
}

/// Ordered plugin chain.
#[derive(Default)]
pub struct Processor {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `plugin` to the chain.
    pub fn with<P>(mut self, plugin: P) -> Self
    where
        P: Plugin + 'static,
    {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Run `document` through every plugin. The first error aborts the chain.
    pub fn process(&self, document: &str) -> TransformResult<Processed> {
        let mut current = Cow::Borrowed(document);

        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), bytes = current.len(), "running plugin");
            if let Some(output) = plugin.transform(&current)? {
                current = Cow::Owned(output);
            }
        }

        let changed = current != document;
        Ok(Processed {
            contents: current.into_owned(),
            changed,
        })
    }
}
