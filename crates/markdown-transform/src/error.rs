use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("plugin `{plugin}`: invalid option `{option}`: {message}")]
    InvalidOption {
        plugin: &'static str,
        option: &'static str,
        message: String,
    },
}

impl TransformError {
    pub fn invalid_option(
        plugin: &'static str,
        option: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            plugin,
            option,
            message: message.into(),
        }
    }

    /// Name of the plugin that raised the error.
    pub fn plugin(&self) -> &'static str {
        match self {
            Self::InvalidOption { plugin, .. } => plugin,
        }
    }
}

pub type TransformResult<T> = Result<T, TransformError>;
