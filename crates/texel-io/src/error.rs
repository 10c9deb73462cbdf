//! Error types for I/O operations.
//!
//! Provides unified error handling for all codec operations. The
//! [`ImageFile`](crate::ImageFile) surface turns these into `false`/`None`
//! after logging them.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format or extension.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid or corrupted file.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported bit depth or color type.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Decoded data does not fit the image store.
    #[error(transparent)]
    Core(#[from] texel_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
