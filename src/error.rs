//! Error types for `texkit`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `texkit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Input Validation Errors ====================
    /// A required input was not supplied. Operations refuse to run rather
    /// than walking an unset root.
    #[error("missing input: {what}")]
    MissingInput {
        /// What was missing (e.g. "original folder", "texture name").
        what: &'static str,
    },

    /// A supplied root path does not exist or is not a directory.
    #[error("root folder not found: {path}")]
    RootNotFound {
        /// The path that was supplied.
        path: PathBuf,
    },

    // ==================== DDS/PNG Texture Errors ====================
    /// Failed to parse a DDS texture file.
    #[error("failed to parse DDS: {message}")]
    DdsParseFailed {
        /// The parse error message.
        message: String,
    },

    /// The DDS pixel format is not supported.
    #[error("unsupported DDS format: {format}")]
    DdsUnsupportedFormat {
        /// The format identifier or description.
        format: String,
    },

    /// Failed to create a DDS texture.
    #[error("failed to create DDS: {message}")]
    DdsCreateFailed {
        /// The error message.
        message: String,
    },

    /// Failed to write DDS texture data.
    #[error("failed to write DDS: {message}")]
    DdsWriteFailed {
        /// The error message.
        message: String,
    },

    /// Failed to open or decode a PNG file.
    #[error("failed to decode PNG: {message}")]
    PngDecodeFailed {
        /// The error message.
        message: String,
    },

    /// Failed to encode PNG image.
    #[error("failed to encode PNG: {message}")]
    PngEncodeFailed {
        /// The encoding error message.
        message: String,
    },

    /// Failed to create an image buffer from texture data.
    #[error("failed to create image buffer")]
    ImageBufferFailed,

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDir(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err.to_string())
    }
}

/// A specialized Result type for `texkit` operations.
pub type Result<T> = std::result::Result<T, Error>;
