//! Error types for guidegen.
//!
//! Library crates use [`GuidegenError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all guidegen operations.
#[derive(Debug, thiserror::Error)]
pub enum GuidegenError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Content parsing error (front matter, guides.yaml, glob patterns).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Template lookup or rendering error.
    #[error("template error: {0}")]
    Template(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GuidegenError>;

impl GuidegenError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = GuidegenError::config("missing content directory");
        assert_eq!(err.to_string(), "config error: missing content directory");

        let err = GuidegenError::parse("bad front matter in en/path/learn.md");
        assert!(err.to_string().contains("en/path/learn.md"));
    }
}
