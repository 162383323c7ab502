use std::fs;
use std::path::{Path, PathBuf};

use markdown_toc_config::{Config, ConfigError, ConfigSourceKind, LoadOptions};
use tempfile::TempDir;

fn write_file(path: impl AsRef<Path>, contents: &str) {
    fs::write(path, contents).expect("write config");
}

fn canonical(path: impl AsRef<Path>) -> PathBuf {
    fs::canonicalize(path).expect("canonicalize path")
}

#[test]
fn loads_defaults_when_no_files_present() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let config = Config::load(LoadOptions::default().with_working_dir(working_dir.clone()))
        .expect("load defaults");

    assert_eq!(config.document, working_dir.join("readme.md"));
    assert!(!config.toc.tight);
    assert_eq!(config.toc.max_depth, 6);
    assert_eq!(config.toc.heading, markdown_toc::DEFAULT_HEADING);
    assert_eq!(config.sources.layers.len(), 1);
    assert_eq!(config.sources.layers[0].kind, ConfigSourceKind::Default);
}

#[test]
fn applies_precedence_between_git_root_and_local() {
    let temp = TempDir::new().expect("tempdir");
    let git_root = canonical(temp.path());
    fs::create_dir(git_root.join(".git")).expect("create .git");

    write_file(
        git_root.join(".readme-toc.toml"),
        r#"
        file = "README.md"

        [toc]
        tight = true
        max_depth = 3
        "#,
    );

    let nested = git_root.join("docs");
    fs::create_dir(&nested).expect("create nested dir");
    write_file(
        nested.join(".readme-toc.toml"),
        r#"
        [toc]
        max_depth = 2
        prefix = "user-content-"
        "#,
    );

    let config =
        Config::load(LoadOptions::default().with_working_dir(&nested)).expect("load config");

    assert_eq!(config.document, git_root.join("README.md"));
    assert!(config.toc.tight);
    assert_eq!(config.toc.max_depth, 2);
    assert_eq!(config.toc.prefix.as_deref(), Some("user-content-"));

    let kinds: Vec<_> = config.sources.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ConfigSourceKind::Default,
            ConfigSourceKind::GitRoot,
            ConfigSourceKind::Local
        ]
    );
}

#[test]
fn reports_parse_errors_with_path() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(working_dir.join(".readme-toc.toml"), "[toc]\ntight = \"yes\"\n");

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("invalid type");
    match err {
        ConfigError::Parse { path, .. } => {
            assert_eq!(path, working_dir.join(".readme-toc.toml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_unknown_keys() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(working_dir.join(".readme-toc.toml"), "[toc]\nloose = true\n");

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("unknown key");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn rejects_empty_document_path() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(working_dir.join(".readme-toc.toml"), "file = \"\"\n");

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("empty file");
    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.iter().count(), 1);
            assert!(errors.to_string().contains("file cannot be empty"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_working_directory_is_an_error() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("nope");
    let err = Config::load(LoadOptions::default().with_working_dir(&missing))
        .expect_err("missing dir");
    assert!(matches!(err, ConfigError::WorkingDirectory { .. }));
}
