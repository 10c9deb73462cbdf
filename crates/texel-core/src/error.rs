//! Error types for texel-core operations.
//!
//! The image store reports misuse it can detect cheaply (coordinates outside
//! the image, buffers of the wrong length, mismatched channel layouts) through
//! [`Error`]. Accessors such as [`crate::Image::channel`] panic on an
//! out-of-range pixel or channel; the `try_*` variants return these errors
//! instead.
//!
//! # Usage
//!
//! ```rust
//! use texel_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(3, 0, 2, 2).is_err());
//! ```
//!
//! # Used By
//!
//! - [`crate::image::Image`] - buffer and accessor checks
//! - `texel-io` - wrapped as `IoError::Core`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the image value store.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use texel_core::Error;
    ///
    /// let err = Error::out_of_bounds(100, 50, 80, 60);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Channel index is not below the format's channel count.
    #[error("channel {channel} out of range for {channels}-channel format")]
    ChannelOutOfRange {
        /// Requested channel
        channel: usize,
        /// Channels per pixel
        channels: usize,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when `width * height * channels` overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count mismatch between source and destination.
    ///
    /// Format conversion keeps the channel layout; converting a
    /// one-channel image to an RGB format reports this.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: usize,
        /// Actual channel count
        got: usize,
    },

    /// Buffer does not fit the pixel format or resolution.
    #[error("buffer mismatch: {reason}")]
    BufferMismatch {
        /// What did not match
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Creates an [`Error::BufferMismatch`] error.
    #[inline]
    pub fn buffer_mismatch(reason: impl Into<String>) -> Self {
        Self::BufferMismatch {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::ChannelOutOfRange { .. })
    }
}
