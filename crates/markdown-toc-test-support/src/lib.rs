//! Shared fixtures for markdown-toc tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// README with a `Contents` section, nested headings and a fenced snippet.
pub const README: &str = "\
# Widget

A small widget.

## Contents

## Install

```sh
# not a heading
cargo install widget
```

### From source

## Usage

## License
";

/// README without any headings.
pub const PLAIN: &str = "Just a paragraph.\n\nAnd another one.\n";

/// Write `contents` to `name` under `dir`, creating parent directories.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(&path, contents).expect("write file");
    path
}

pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}
