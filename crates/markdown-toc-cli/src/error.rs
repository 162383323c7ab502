use std::io;
use std::path::PathBuf;

use markdown_toc_config::ConfigError;
use markdown_transform::TransformError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Io = 1,
    Transform = 2,
    Config = 3,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RunError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Read { .. } | Self::Write { .. } => ExitCode::Io,
            Self::Transform(_) => ExitCode::Transform,
            Self::Config(_) => ExitCode::Config,
        }
    }

    pub fn is_io(&self) -> bool {
        self.exit_code() == ExitCode::Io
    }
}

pub type RunResult<T> = Result<T, RunError>;
