//! Error types for the watch pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up or running a watch session.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to create watcher: {0}")]
    WatcherCreation(#[from] notify::Error),

    #[error("Failed to watch path {path}: {source}")]
    WatchPath {
        path: PathBuf,
        source: notify::Error,
    },

    #[error("Invalid file pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// Failure of one read-redact-write cycle.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// I/O failure; treated as transient and retried.
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    /// Content is not UTF-8 text; retrying cannot help.
    #[error("File is not valid UTF-8 text: {0}")]
    Encoding(std::io::Error),
}

impl ProcessError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProcessError::Io(_))
    }

    /// Classify a read failure: undecodable bytes are permanent, the rest
    /// (missing file, still locked by the writer) may clear up.
    pub(crate) fn from_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::InvalidData {
            ProcessError::Encoding(err)
        } else {
            ProcessError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_reads_are_not_transient() {
        let err = ProcessError::from_read(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        ));
        assert!(matches!(err, ProcessError::Encoding(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_other_reads_are_transient() {
        let err = ProcessError::from_read(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert!(err.is_transient());
    }
}
