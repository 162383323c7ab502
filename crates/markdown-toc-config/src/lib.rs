//! Configuration loader for `readme-toc`.
//!
//! Settings resolve through a precedence stack:
//! working directory → git root → built-in defaults.
//! Each layer is an optional `.readme-toc.toml`; parsed values are merged field
//! by field and normalised into [`Config`] so the runner never touches raw TOML.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use markdown_toc::TocOptions;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".readme-toc.toml";
pub const DEFAULT_DOCUMENT: &str = "readme.md";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    /// Absolute path of the document to rewrite.
    pub document: PathBuf,
    pub toc: TocOptions,
    pub sources: ConfigSources,
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
    pub base_dir: PathBuf,
}

impl ConfigSource {
    fn default(base_dir: PathBuf) -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
            base_dir,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ConfigSource {
            kind,
            path: Some(path),
            base_dir,
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer or tests.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;

        let default_source = ConfigSource::default(working_dir.clone());
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));
        let mut source_layers = vec![default_source];

        let local_config_path = working_dir.join(CONFIG_FILE_NAME);
        let git_config_path = find_git_root(&working_dir).map(|root| root.join(CONFIG_FILE_NAME));

        if let Some(path) = git_config_path {
            if path.exists() && path != local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(&path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        for layer in &source_layers {
            debug!(layer = %layer.describe(), "applied configuration layer");
        }

        let (document, toc) = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            document,
            toc,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    PartialConfig {
        document: Some(Located::new(PathBuf::from(DEFAULT_DOCUMENT), source)),
        ..PartialConfig::default()
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    document: Option<Located<PathBuf>>,
    tight: Option<bool>,
    heading: Option<String>,
    max_depth: Option<Located<u8>>,
    skip: Option<String>,
    ordered: Option<bool>,
    prefix: Option<String>,
}

impl PartialConfig {
    fn merge(&mut self, other: PartialConfig) {
        if other.document.is_some() {
            self.document = other.document;
        }
        if other.tight.is_some() {
            self.tight = other.tight;
        }
        if other.heading.is_some() {
            self.heading = other.heading;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.skip.is_some() {
            self.skip = other.skip;
        }
        if other.ordered.is_some() {
            self.ordered = other.ordered;
        }
        if other.prefix.is_some() {
            self.prefix = other.prefix;
        }
    }

    fn finalize(self) -> Result<(PathBuf, TocOptions), ConfigValidationErrors> {
        let mut errors = Vec::new();
        let defaults = TocOptions::default();

        let document = match self.document {
            Some(located) if located.value.as_os_str().is_empty() => {
                errors.push(ConfigValidationError::new(
                    Some(located.source),
                    "file cannot be empty".into(),
                ));
                PathBuf::new()
            }
            Some(located) => resolve_path(&located),
            None => PathBuf::from(DEFAULT_DOCUMENT),
        };

        let max_depth = match self.max_depth {
            Some(located) if located.value == 0 || located.value > 6 => {
                errors.push(ConfigValidationError::new(
                    Some(located.source),
                    format!(
                        "toc.max_depth must be between 1 and 6 (received {})",
                        located.value
                    ),
                ));
                defaults.max_depth
            }
            Some(located) => located.value,
            None => defaults.max_depth,
        };

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        let toc = TocOptions {
            heading: self.heading.unwrap_or(defaults.heading),
            max_depth,
            skip: self.skip,
            tight: self.tight.unwrap_or(defaults.tight),
            ordered: self.ordered.unwrap_or(defaults.ordered),
            prefix: self.prefix,
        };
        Ok((document, toc))
    }
}

fn resolve_path(located: &Located<PathBuf>) -> PathBuf {
    let path = &located.value;
    if path.is_absolute() {
        path.clone()
    } else {
        located.source.base_dir.join(path)
    }
}

/// All validation failures found while finalising configuration.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError { source, message }
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default)]
    toc: Option<RawToc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawToc {
    #[serde(default)]
    tight: Option<bool>,
    #[serde(default)]
    heading: Option<String>,
    #[serde(default)]
    max_depth: Option<u8>,
    #[serde(default)]
    skip: Option<String>,
    #[serde(default)]
    ordered: Option<bool>,
    #[serde(default)]
    prefix: Option<String>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        let toc = self.toc.unwrap_or_default();
        PartialConfig {
            document: self.file.map(|path| Located::new(path, source.clone())),
            tight: toc.tight,
            heading: toc.heading,
            max_depth: toc.max_depth.map(|depth| Located::new(depth, source)),
            skip: toc.skip,
            ordered: toc.ordered,
            prefix: toc.prefix,
        }
    }
}
