//! Global error handling for codebase-exporter
//!
//! Every fallible operation in the crate reports through [`ExportError`].
//! Recent directory I/O never surfaces here; the store logs and carries on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for exporter operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// The scan root is missing, not a directory, or cannot be listed
    #[error("Failed to open directory: {}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be built (buffer allocation failed)
    #[error("Failed to generate markdown content: {0}")]
    ContentGenerationFailed(String),

    /// The export destination could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No catalog entry with the given name
    #[error("Unknown project type: {0}")]
    UnknownProjectType(String),
}

/// Specialized Result type for exporter operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Creates an ExportError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ExportError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl From<ExportError> for io::Error {
    fn from(err: ExportError) -> Self {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject_empty(name: &str) -> Result<()> {
        ensure!(!name.is_empty(), InvalidArgument, "empty name given");
        Ok(())
    }

    #[test]
    fn test_ensure_macro() {
        assert!(reject_empty("src").is_ok());
        let err = reject_empty("").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: empty name given");
    }

    #[test]
    fn test_directory_unreadable_message() {
        let err = ExportError::DirectoryUnreadable {
            path: PathBuf::from("/no/such/dir"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to open directory: /no/such/dir");
    }
}
