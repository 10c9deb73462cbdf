//! OpenEXR format support.
//!
//! EXR is one of the exact-float containers: samples handed to the writer
//! come back from the reader unchanged, including negative and
//! out-of-range values.
//!
//! - `f32` data is written as 32-bit float channels, `f16` data as half
//!   channels, bytes are decoded to linear `f32` first
//! - single-channel data is written as R = G = B
//! - reading always yields three `f32` channels; alpha is ignored
//!
//! # Example
//!
//! ```rust,ignore
//! use texel_io::exr::{Compression, ExrWriter};
//! use texel_io::ImageWriter;
//!
//! let writer = ExrWriter::new().with_compression(Compression::Piz);
//! writer.write("output.exr", &image)?;
//! ```

use crate::{ImageData, ImageReader, ImageWriter, IoError, IoResult, PixelData};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{trace, warn};

/// Reads an EXR file from the given path.
///
/// Returns the first layer's RGB data as f32.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    ExrReader::new().read(path)
}

/// Writes an image to an EXR file with the default compression.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    ExrWriter::new().write(path, image)
}

/// EXR compression method. All variants are lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// No compression.
    None,
    /// RLE compression.
    Rle,
    /// ZIP compression (16 scanlines per block).
    #[default]
    Zip,
    /// PIZ compression (wavelet, good for noisy images).
    Piz,
}

impl Compression {
    fn to_exr(self) -> ::exr::compression::Compression {
        use ::exr::compression::Compression as C;
        match self {
            Self::None => C::Uncompressed,
            Self::Rle => C::RLE,
            Self::Zip => C::ZIP16,
            Self::Piz => C::PIZ,
        }
    }

    /// Parses `none`, `rle`, `zip` or `piz`, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "rle" => Some(Self::Rle),
            "zip" => Some(Self::Zip),
            "piz" => Some(Self::Piz),
            _ => None,
        }
    }
}

/// EXR reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExrReader;

impl ExrReader {
    /// Creates a reader.
    pub fn new() -> Self {
        Self
    }

    fn decode(&self, source: impl Read + Seek + Send) -> IoResult<ImageData> {
        use ::exr::prelude::*;

        let image = ::exr::prelude::read()
            .no_deep_data()
            .largest_resolution_level()
            .rgb_channels(
                |resolution, _| {
                    let width = resolution.width();
                    (width, vec![0.0f32; width * resolution.height() * 3])
                },
                |(width, buffer), position, (r, g, b): (f32, f32, f32)| {
                    let idx = (position.y() * *width + position.x()) * 3;
                    buffer[idx] = r;
                    buffer[idx + 1] = g;
                    buffer[idx + 2] = b;
                },
            )
            .first_valid_layer()
            .all_attributes()
            .from_buffered(source)
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let width = image.layer_data.size.width() as u32;
        let height = image.layer_data.size.height() as u32;
        let (_, data) = image.layer_data.channel_data.pixels;
        trace!(width, height, "EXR decoded");

        Ok(ImageData::from_f32(width, height, 3, data))
    }
}

impl ImageReader for ExrReader {
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<ImageData> {
        let file = std::fs::File::open(path)?;
        self.decode(std::io::BufReader::new(file))
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        self.decode(Cursor::new(data))
    }
}

/// EXR writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExrWriter {
    compression: Compression,
}

impl ExrWriter {
    /// Creates a writer using ZIP compression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression method.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

// Expands to the encode call for one sample type so that f32 and f16 data
// share the channel mapping.
macro_rules! encode_rgb {
    ($samples:expr, $width:expr, $height:expr, $channels:expr, $compression:expr, $out:expr) => {{
        use ::exr::prelude::*;

        let samples = $samples;
        let (width, channels) = ($width, $channels);
        let (dg, db) = if channels == 1 { (0, 0) } else { (1, 2) };
        let image = Image::from_encoded_channels(
            (width, $height),
            Encoding {
                compression: $compression,
                line_order: LineOrder::Increasing,
                ..Encoding::default()
            },
            SpecificChannels::rgb(move |pos: Vec2<usize>| {
                let i = (pos.y() * width + pos.x()) * channels;
                (samples[i], samples[i + dg], samples[i + db])
            }),
        );
        image
            .write()
            .to_buffered(Cursor::new(&mut $out))
            .map_err(|e| IoError::EncodeError(e.to_string()))
    }};
}

impl ImageWriter for ExrWriter {
    fn write<P: AsRef<Path>>(&self, path: P, image: &ImageData) -> IoResult<()> {
        let bytes = self.write_to_memory(image)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn write_to_memory(&self, image: &ImageData) -> IoResult<Vec<u8>> {
        image.validate()?;
        let channels = image.channels as usize;
        match channels {
            1 | 3 => {}
            4 => warn!("EXR writer drops the alpha channel"),
            n => {
                return Err(IoError::EncodeError(format!(
                    "EXR writer takes 1, 3 or 4 channels, got {n}"
                )));
            }
        }

        let (width, height) = (image.width as usize, image.height as usize);
        let compression = self.compression.to_exr();
        let mut out = Vec::new();
        match &image.data {
            PixelData::F16(v) => encode_rgb!(v.as_slice(), width, height, channels, compression, out)?,
            PixelData::F32(v) => encode_rgb!(v.as_slice(), width, height, channels, compression, out)?,
            PixelData::U8(_) => {
                let linear = image.to_f32();
                encode_rgb!(linear.as_slice(), width, height, channels, compression, out)?
            }
        }
        trace!(width, height, channels, compression = ?self.compression, bytes = out.len(), "EXR encoded");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    fn gradient(channels: u32) -> ImageData {
        let (width, height) = (8u32, 5u32);
        let data = (0..width * height * channels)
            .map(|i| i as f32 / 7.0 - 1.5)
            .collect();
        ImageData::from_f32(width, height, channels, data)
    }

    #[test]
    fn test_roundtrip_exact() {
        for compression in [Compression::None, Compression::Rle, Compression::Zip, Compression::Piz] {
            let image = gradient(3);
            let bytes = ExrWriter::new()
                .with_compression(compression)
                .write_to_memory(&image)
                .unwrap();
            let back = ExrReader::new().read_from_memory(&bytes).unwrap();
            assert_eq!(back, image, "{compression:?}");
        }
    }

    #[test]
    fn test_single_channel_written_as_grey() {
        let image = gradient(1);
        let bytes = ExrWriter::new().write_to_memory(&image).unwrap();
        let back = ExrReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back.channels, 3);
        let PixelData::F32(src) = &image.data else { unreachable!() };
        let PixelData::F32(rgb) = &back.data else { unreachable!() };
        for (i, v) in src.iter().enumerate() {
            assert_eq!(&rgb[i * 3..i * 3 + 3], &[*v, *v, *v]);
        }
    }

    #[test]
    fn test_half_samples_widen_exactly() {
        let halves: Vec<f16> = [-1.5f32, 0.0, 0.333, 65504.0, 1e-3, 2.0]
            .iter()
            .map(|&v| f16::from_f32(v))
            .collect();
        let image = ImageData::from_f16(2, 1, 3, halves.clone());
        let bytes = ExrWriter::new().write_to_memory(&image).unwrap();
        let back = ExrReader::new().read_from_memory(&bytes).unwrap();
        let expected: Vec<f32> = halves.iter().map(|h| h.to_f32()).collect();
        assert_eq!(back.data, PixelData::F32(expected));
    }

    #[test]
    fn test_rejects_two_channels() {
        let image = ImageData::from_f32(1, 1, 2, vec![0.0; 2]);
        assert!(matches!(
            ExrWriter::new().write_to_memory(&image),
            Err(IoError::EncodeError(_))
        ));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            ExrReader::new().read_from_memory(b"\x76\x2f\x31\x01garbage"),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn test_compression_names() {
        assert_eq!(Compression::from_name("PIZ"), Some(Compression::Piz));
        assert_eq!(Compression::from_name("dwaa"), None);
        assert_eq!(Compression::default(), Compression::Zip);
    }
}
