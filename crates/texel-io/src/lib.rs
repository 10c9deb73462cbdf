//! # texel-io
//!
//! Codec layer for texel images.
//!
//! The image store owns the fidelity contract; this crate only moves the
//! values it is handed in and out of files:
//!
//! - **EXR** - raw `f32`/`f16` samples, lossless
//! - **PFM** - raw `f32` samples, lossless
//! - **PNG** - sRGB-encoded bytes, 8-bit
//!
//! # Architecture
//!
//! - [`ImageData`] - codec boundary type. `PixelData::U8` always holds sRGB
//!   bytes; `F16`/`F32` always hold linear light.
//! - [`ImageReader`] / [`ImageWriter`] - traits implemented per codec
//! - [`read`] / [`write`] - dispatch on format
//! - [`ImageFile`] - `write`/`read` on [`texel_core::Image`], reporting
//!   failure as `false`/`None`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use texel_core::{Image, PixelFormat};
//! use texel_io::ImageFile;
//!
//! let image = Image::new(PixelFormat::Rgb32, 16, 29);
//! assert!(image.write("out.exr"));
//! let back = Image::read("out.exr").expect("readable");
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Values | Read back as |
//! |--------|------|-------|--------|--------------|
//! | EXR | Yes | Yes | `f32`, `f16` | `Rgb32` |
//! | PFM | Yes | Yes | `f32` | `Rgb32` / `Y32` |
//! | PNG | Yes | Yes | sRGB `u8` | `Rgb8` / `Y8` (16-bit: `Rgb32` / `Y32`) |
//!
//! # Feature Flags
//!
//! - `exr` - OpenEXR support (default)
//! - `png` - PNG support (default)
//! - `pfm` - PFM support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod convert;
mod detect;
mod error;
mod file;
mod traits;

#[cfg(feature = "exr")]
pub mod exr;

#[cfg(feature = "pfm")]
pub mod pfm;

#[cfg(feature = "png")]
pub mod png;

pub use convert::{data_to_image, image_to_data};
pub use detect::Format;
pub use error::{IoError, IoResult};
pub use file::ImageFile;
pub use traits::{ImageReader, ImageWriter};

use half::f16;
use std::path::Path;
use texel_transfer::{linear_to_srgb8, srgb8_to_linear};
use tracing::debug;

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by magic bytes, then by extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "reading image");

    match format {
        #[cfg(feature = "exr")]
        Format::Exr => exr::read(path),

        #[cfg(feature = "pfm")]
        Format::Pfm => pfm::read(path),

        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

/// Decodes an image held in memory, detecting the format by magic bytes.
pub fn read_from_memory(bytes: &[u8]) -> IoResult<ImageData> {
    match Format::from_bytes(bytes) {
        #[cfg(feature = "exr")]
        Format::Exr => ImageReader::read_from_memory(&exr::ExrReader::new(), bytes),

        #[cfg(feature = "pfm")]
        Format::Pfm => ImageReader::read_from_memory(&pfm::PfmReader::new(), bytes),

        #[cfg(feature = "png")]
        Format::Png => ImageReader::read_from_memory(&png::PngReader::new(), bytes),

        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!("{other:?}"))),
    }
}

/// Writes an image to a file, choosing the codec by extension.
///
/// `.exr` and `.pfm` (any case) go to the float codecs; any other
/// extension is written as 8-bit sRGB PNG data.
///
/// # Errors
///
/// Returns an error if:
/// - The selected codec is disabled in this build
/// - The file cannot be created
/// - The image data is incompatible with the format
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    write_as(path, Format::for_output(path), image)
}

/// Writes an image to a file with an explicit codec.
pub fn write_as<P: AsRef<Path>>(path: P, format: Format, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?format, width = image.width, height = image.height, "writing image");

    match format {
        #[cfg(feature = "exr")]
        Format::Exr => exr::write(path, image),

        #[cfg(feature = "pfm")]
        Format::Pfm => pfm::write(path, image),

        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Image data container for codec operations.
///
/// Samples are interleaved, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of channels per pixel.
    pub channels: u32,
    /// Sample data.
    pub data: PixelData,
}

/// Raw sample storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// sRGB-encoded bytes.
    U8(Vec<u8>),
    /// Linear half floats.
    F16(Vec<f16>),
    /// Linear `f32`.
    F32(Vec<f32>),
}

impl PixelData {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::F16(v) => v.len(),
            Self::F32(v) => v.len(),
        }
    }

    /// `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImageData {
    /// Creates ImageData from linear f32 samples.
    pub fn from_f32(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::F32(data),
        }
    }

    /// Creates ImageData from linear half samples.
    pub fn from_f16(width: u32, height: u32, channels: u32, data: Vec<f16>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::F16(data),
        }
    }

    /// Creates ImageData from sRGB bytes.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data: PixelData::U8(data),
        }
    }

    /// Returns the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the total number of samples (pixels * channels).
    pub fn sample_count(&self) -> usize {
        self.pixel_count() * self.channels as usize
    }

    /// Checks that the sample count matches the dimensions.
    pub fn validate(&self) -> IoResult<()> {
        if self.data.len() != self.sample_count() {
            return Err(IoError::InvalidFile(format!(
                "{}x{}x{} image carries {} samples",
                self.width,
                self.height,
                self.channels,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Samples as linear f32. Bytes decode through the inverse sRGB table.
    pub fn to_f32(&self) -> Vec<f32> {
        match &self.data {
            PixelData::U8(data) => data.iter().map(|&v| srgb8_to_linear(v)).collect(),
            PixelData::F16(data) => data.iter().map(|v| v.to_f32()).collect(),
            PixelData::F32(data) => data.clone(),
        }
    }

    /// Samples as sRGB bytes. Floats are quantized with `linear_to_srgb8`.
    pub fn to_srgb8(&self) -> Vec<u8> {
        match &self.data {
            PixelData::U8(data) => data.clone(),
            PixelData::F16(data) => data.iter().map(|v| linear_to_srgb8(v.to_f32())).collect(),
            PixelData::F32(data) => data.iter().map(|&v| linear_to_srgb8(v)).collect(),
        }
    }
}
