//! PNG format support.
//!
//! PNG is the 8-bit container: the writer receives sRGB-encoded bytes and
//! tags the file with an sRGB chunk. Values outside `[0, 1]` were clamped
//! when they were encoded.
//!
//! Reading:
//!
//! - 8-bit grey / RGB stay as encoded bytes (1 or 3 channels)
//! - alpha is dropped
//! - palette and sub-byte files are expanded to 8-bit first
//! - 16-bit files decode to linear `f32` via the exact sRGB EOTF
//!
//! # Example
//!
//! ```rust,ignore
//! use texel_io::png;
//!
//! let image = png::read("input.png")?;
//! png::write("output.png", &image)?;
//! ```

use crate::{ImageData, ImageReader, ImageWriter, IoError, IoResult};
use std::io::{BufRead, BufReader, Cursor, Seek, Write};
use std::path::Path;
use texel_transfer::srgb;
use tracing::{trace, warn};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    PngReader::new().read(path)
}

/// Writes an image to a PNG file.
///
/// Float data is quantized with the table-driven sRGB encoder.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    PngWriter::new().write(path, image)
}

/// PNG reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngReader;

impl PngReader {
    /// Creates a reader.
    pub fn new() -> Self {
        Self
    }

    fn decode(&self, source: impl BufRead + Seek) -> IoResult<ImageData> {
        let mut decoder = ::png::Decoder::new(source);
        decoder.set_transformations(::png::Transformations::EXPAND);
        let mut reader = decoder
            .read_info()
            .map_err(|e: ::png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: ::png::DecodingError| IoError::DecodeError(e.to_string()))?;
        let bytes = &buf[..info.buffer_size()];

        use ::png::{BitDepth, ColorType};
        let (channels, has_alpha) = match info.color_type {
            ColorType::Grayscale => (1, false),
            ColorType::GrayscaleAlpha => (1, true),
            ColorType::Rgb => (3, false),
            ColorType::Rgba => (3, true),
            other => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{:?} {:?}",
                    other, info.bit_depth
                )));
            }
        };
        if has_alpha {
            warn!("PNG alpha channel dropped");
        }
        let stride = channels + has_alpha as usize;
        trace!(
            width = info.width,
            height = info.height,
            color = ?info.color_type,
            depth = ?info.bit_depth,
            "PNG decoded"
        );

        let image = match info.bit_depth {
            BitDepth::Eight => {
                let data = bytes
                    .chunks_exact(stride)
                    .flat_map(|px| px[..channels].iter().copied())
                    .collect();
                ImageData::from_u8(info.width, info.height, channels as u32, data)
            }
            BitDepth::Sixteen => {
                let data = bytes
                    .chunks_exact(stride * 2)
                    .flat_map(|px| {
                        px[..channels * 2].chunks_exact(2).map(|c| {
                            let v = u16::from_be_bytes([c[0], c[1]]);
                            srgb::eotf(v as f32 / 65535.0)
                        })
                    })
                    .collect();
                ImageData::from_f32(info.width, info.height, channels as u32, data)
            }
            other => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{:?} {:?}",
                    info.color_type, other
                )));
            }
        };
        Ok(image)
    }
}

impl ImageReader for PngReader {
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<ImageData> {
        let file = std::fs::File::open(path.as_ref())?;
        self.decode(BufReader::new(file))
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        self.decode(Cursor::new(data))
    }
}

/// PNG writer. Always writes 8-bit sRGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl PngWriter {
    /// Creates a writer.
    pub fn new() -> Self {
        Self
    }

    fn encode<W: Write>(&self, sink: W, image: &ImageData) -> IoResult<()> {
        image.validate()?;
        let color_type = match image.channels {
            1 => ::png::ColorType::Grayscale,
            2 => ::png::ColorType::GrayscaleAlpha,
            3 => ::png::ColorType::Rgb,
            4 => ::png::ColorType::Rgba,
            n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
        };

        let mut encoder = ::png::Encoder::new(sink, image.width, image.height);
        encoder.set_color(color_type);
        encoder.set_depth(::png::BitDepth::Eight);
        encoder.set_compression(::png::Compression::default());
        encoder.set_source_srgb(::png::SrgbRenderingIntent::Perceptual);

        let mut png_writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        png_writer
            .write_image_data(&image.to_srgb8())
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        png_writer
            .finish()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        Ok(())
    }
}

impl ImageWriter for PngWriter {
    fn write<P: AsRef<Path>>(&self, path: P, image: &ImageData) -> IoResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.encode(std::io::BufWriter::new(file), image)
    }

    fn write_to_memory(&self, image: &ImageData) -> IoResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode(&mut out, image)?;
        Ok(out)
    }
}
