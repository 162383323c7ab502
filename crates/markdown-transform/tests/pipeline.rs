use std::cell::Cell;
use std::rc::Rc;

use markdown_transform::{Plugin, Processor, TransformError, TransformResult};
use pretty_assertions::assert_eq;

struct Uppercase;

impl Plugin for Uppercase {
    fn name(&self) -> &'static str {
        "uppercase"
    }

    fn transform(&self, document: &str) -> TransformResult<Option<String>> {
        Ok(Some(document.to_uppercase()))
    }
}

struct Failing;

impl Plugin for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn transform(&self, _document: &str) -> TransformResult<Option<String>> {
        Err(TransformError::invalid_option("failing", "mode", "unsupported"))
    }
}

struct Counting(Rc<Cell<usize>>);

impl Plugin for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn transform(&self, _document: &str) -> TransformResult<Option<String>> {
        self.0.set(self.0.get() + 1);
        Ok(None)
    }
}

#[test]
fn untouched_documents_are_reported_unchanged() {
    let calls = Rc::new(Cell::new(0));
    let processed = Processor::new()
        .with(Counting(Rc::clone(&calls)))
        .process("# Title\n")
        .expect("process");

    assert_eq!(calls.get(), 1);
    assert_eq!(processed.contents, "# Title\n");
    assert!(!processed.changed);
}

#[test]
fn first_error_stops_the_chain() {
    let calls = Rc::new(Cell::new(0));
    let err = Processor::new()
        .with(Uppercase)
        .with(Failing)
        .with(Counting(Rc::clone(&calls)))
        .process("doc")
        .expect_err("failing plugin aborts");

    assert_eq!(err.plugin(), "failing");
    assert_eq!(
        err.to_string(),
        "plugin `failing`: invalid option `mode`: unsupported"
    );
    assert_eq!(calls.get(), 0);
}

#[test]
fn output_of_one_plugin_feeds_the_next() {
    let processed = Processor::new()
        .with(Uppercase)
        .process("abc")
        .expect("process");
    assert_eq!(processed.contents, "ABC");
    assert!(processed.changed);
}
