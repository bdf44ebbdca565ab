//! All error types for the langlens crate.
//!
//! These are returned from fallible store, dictionary and path operations.
//! Analysis pipelines never return this type; they report an
//! [`AnalysisFailure`](crate::pipeline::AnalysisFailure) instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid file path: {0}")]
    PathEscape(String),

    #[error("{0}")]
    InvalidWorld(String),

    #[error("World is already unpacked")]
    AlreadyUnpacked,

    #[error("Word already exists in custom dictionary: {0}")]
    WordExists(String),

    #[error("Word must be at least 2 characters long")]
    WordTooShort,

    #[error("dictionary error: {0}")]
    Dictionary(String),

    #[error("generation error: {message}")]
    Generation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a not-found error for the named kind of record.
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    /// Creates a new document generation error with optional source error
    pub fn generation_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Generation {
            message: message.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_metadata_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("[ broken").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().starts_with("metadata error"));
    }

    #[test]
    fn test_not_found_error() {
        let error = Error::not_found("Unpacked world");
        assert_eq!(error.to_string(), "Unpacked world not found");
    }

    #[test]
    fn test_word_errors_are_user_facing() {
        assert_eq!(
            Error::WordExists("biome".to_string()).to_string(),
            "Word already exists in custom dictionary: biome"
        );
        assert_eq!(
            Error::WordTooShort.to_string(),
            "Word must be at least 2 characters long"
        );
    }

    #[test]
    fn test_invalid_world_is_verbatim() {
        let error = Error::InvalidWorld("Invalid or corrupted world file".to_string());
        assert_eq!(error.to_string(), "Invalid or corrupted world file");
    }

    #[test]
    fn test_generation_error_with_source() {
        let source_error = Box::new(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
        let error = Error::generation_error("model call failed", Some(source_error));
        assert!(
            error
                .to_string()
                .contains("generation error: model call failed")
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_error_debug() {
        let error = Error::PathEscape("../secret".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("PathEscape"));
        assert!(debug.contains("../secret"));
    }
}
