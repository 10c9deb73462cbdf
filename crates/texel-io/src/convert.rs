//! Conversions between the image store and the codec boundary type.
//!
//! What a codec receives for each format:
//!
//! | Format | Float image | 8-bit image |
//! |--------|-------------|-------------|
//! | EXR | raw `f32`/`f16` | decoded to linear `f32` |
//! | PFM | `f32` (half widened) | decoded to linear `f32` |
//! | PNG | `linear_to_srgb8` bytes | stored bytes |

use crate::{Format, ImageData, IoError, IoResult, PixelData};
use texel_core::{Image, PixelBuffer, PixelFormat};
use tracing::trace;

/// Builds the values `format`'s codec receives for `image`.
pub fn image_to_data(image: &Image, format: Format) -> ImageData {
    let (width, height) = image.resolution();
    let channels = image.channel_count() as u32;
    let data = match (format, image.samples()) {
        (Format::Exr, PixelBuffer::F32(v)) => PixelData::F32(v.clone()),
        (Format::Exr, PixelBuffer::F16(v)) => PixelData::F16(v.clone()),
        (Format::Png, _) => PixelData::U8(image.to_srgb8()),
        _ => PixelData::F32(image.to_linear_f32()),
    };
    trace!(?format, from = %image.format(), "prepared codec data");
    ImageData {
        width,
        height,
        channels,
        data,
    }
}

/// Rebuilds an image from decoded codec data.
///
/// The pixel format follows the sample type and channel count: bytes give
/// `Y8`/`Rgb8`, halves `YHalf`/`RgbHalf`, floats `Y32`/`Rgb32`.
///
/// # Errors
///
/// [`IoError::DecodeError`] for channel counts other than 1 and 3, and
/// [`IoError::Core`] if the sample count does not match the resolution.
pub fn data_to_image(data: ImageData) -> IoResult<Image> {
    let base = match data.data {
        PixelData::U8(_) => PixelFormat::Y8,
        PixelData::F16(_) => PixelFormat::YHalf,
        PixelData::F32(_) => PixelFormat::Y32,
    };
    let format = base.with_channels(data.channels as usize).ok_or_else(|| {
        IoError::DecodeError(format!("{}-channel data has no pixel format", data.channels))
    })?;
    let buffer = match data.data {
        PixelData::U8(v) => PixelBuffer::U8(v),
        PixelData::F16(v) => PixelBuffer::F16(v),
        PixelData::F32(v) => PixelBuffer::F32(v),
    };
    Ok(Image::from_buffer(format, data.width, data.height, buffer)?)
}
