//! Error types and handling for WebIDL rewriting operations

use std::path::PathBuf;
use thiserror::Error;

use crate::syntax::ParseError;

/// Main error type for idlfix operations
#[derive(Debug, Error)]
pub enum IdlfixError {
    /// A committed syntax error; the file must not be written back
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Rule execution errors
    #[error("Rule error in '{rule_id}': {message}")]
    RuleError { rule_id: String, message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An autofix could not locate the node or token it targets
    #[error("Autofix error: {message}")]
    AutofixError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Config,
    Rule,
    Io,
    Autofix,
}

impl IdlfixError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdlfixError::Parse(_) => ErrorKind::Parse,
            IdlfixError::ConfigError { .. } => ErrorKind::Config,
            IdlfixError::RuleError { .. } => ErrorKind::Rule,
            IdlfixError::IoError { .. } => ErrorKind::Io,
            IdlfixError::AutofixError { .. } => ErrorKind::Autofix,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a rule error
    pub fn rule_error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleError {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an autofix error
    pub fn autofix_error(message: impl Into<String>) -> Self {
        Self::AutofixError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_converts_transparently() {
        let err = IdlfixError::from(ParseError::new("Foo.webidl", 3, "Unknown member", ""));
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("Foo.webidl"));
    }

    #[test]
    fn test_io_error_keeps_its_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IdlfixError::io_error("webidl/A.webidl", source);
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "IO error for path 'webidl/A.webidl': gone");
    }
}
