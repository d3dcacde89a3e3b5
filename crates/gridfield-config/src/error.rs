use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid grid geometry: {message}")]
    InvalidGeometry { message: String },

    #[error("invalid shuffle timing: {message}")]
    InvalidTiming { message: String },
}

impl ConfigError {
    pub(crate) fn geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    pub(crate) fn timing(message: impl Into<String>) -> Self {
        Self::InvalidTiming {
            message: message.into(),
        }
    }
}
