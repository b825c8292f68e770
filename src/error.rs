//! Error types
//!
//! Every fallible operation in the crate returns [`WebsiteError`].
//! `NotFound` and `InvalidArgument` are fatal to the calling operation;
//! `Io` always names the entry that failed.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, WebsiteError>;

#[derive(Debug, Error)]
pub enum WebsiteError {
    /// The site root does not exist
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Empty or degenerate input (site path, domain, document names)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Read/stat failure on a single entry during enumeration
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration source or deserialization failure
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Plan serialization failure
    #[error("render error: {0}")]
    Render(String),
}

impl WebsiteError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error is one of the fatal input errors
    pub const fn is_fatal_input(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidArgument(_))
    }
}
