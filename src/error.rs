//! Unified error types for chatseed.
//!
//! This module provides a single [`ChatseedError`] enum that covers every
//! failure the pipeline can report. Only fatal conditions live here: a
//! missing or unreadable export, bytes that are not UTF-8, a configuration
//! that cannot describe a two-person dialogue, or a broken document handed
//! to the reader.
//!
//! Expected filtering (media, links, one-sided or short conversations) is
//! never an error; it shows up in
//! [`PipelineReport`](crate::pipeline::PipelineReport) counters instead.

use std::io;
use std::path::Path;

use thiserror::Error;

/// A specialized [`Result`] type for chatseed operations.
///
/// # Example
///
/// ```rust
/// use chatseed::error::Result;
/// use chatseed::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatseedError>;

/// The error type for all chatseed operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatseedError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input export doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// JSON parsing error.
    ///
    /// Raised when loading a configuration file or reading back a
    /// generated document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The pipeline configuration is unusable.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending setting
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A document handed to the reader does not have the expected shape.
    #[error("Invalid document: {message}")]
    InvalidDocument {
        /// Description of what's wrong
        message: String,
    },
}

impl From<std::string::FromUtf8Error> for ChatseedError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatseedError::Utf8 {
            context: "input".to_string(),
            source: err,
        }
    }
}

impl ChatseedError {
    /// Creates a UTF-8 error that names the file being decoded.
    pub fn utf8(path: &Path, source: std::string::FromUtf8Error) -> Self {
        ChatseedError::Utf8 {
            context: path.display().to_string(),
            source,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatseedError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates an invalid document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        ChatseedError::InvalidDocument {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatseedError::Io(_))
    }

    /// Returns `true` if this is an encoding error.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatseedError::Utf8 { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatseedError::InvalidConfig { .. })
    }
}
