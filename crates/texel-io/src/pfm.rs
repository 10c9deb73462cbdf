//! Portable float map (PFM) support.
//!
//! PFM stores raw 32-bit floats, so any value written reads back
//! bit-identical, including negatives and values above one.
//!
//! # Layout
//!
//! ```text
//! PF            "PF" = 3 channels, "Pf" = 1 channel
//! 16 29         width height
//! -1.0          scale; sign gives byte order (negative = little-endian)
//! <floats>      rows bottom-to-top, channels interleaved
//! ```
//!
//! Header fields are separated by whitespace; exactly one whitespace byte
//! follows the scale. The scale's magnitude is ignored on read and written
//! as `1`.

use crate::{ImageData, ImageReader, ImageWriter, IoError, IoResult};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::path::Path;
use tracing::trace;

/// Reads a PFM file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    PfmReader::new().read(path)
}

/// Writes an image to a PFM file.
///
/// Accepts 1- or 3-channel data; bytes are decoded to linear floats first.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    PfmWriter::new().write(path, image)
}

/// PFM reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PfmReader;

impl PfmReader {
    /// Creates a reader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for PfmReader {
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<ImageData> {
        let bytes = std::fs::read(path)?;
        self.read_from_memory(&bytes)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        let mut cursor = HeaderCursor { data, pos: 0 };
        let channels = match cursor.token()? {
            "PF" => 3,
            "Pf" => 1,
            other => return Err(IoError::InvalidFile(format!("bad PFM magic {other:?}"))),
        };
        let width: u32 = cursor.number()?;
        let height: u32 = cursor.number()?;
        let scale: f32 = cursor.number()?;
        // Single separator byte after the scale.
        let body = &data[cursor.pos + 1..];
        trace!(width, height, channels, scale, "PFM header");

        let row = width as usize * channels;
        let count = row
            .checked_mul(height as usize)
            .filter(|n| n.checked_mul(4).is_some())
            .ok_or_else(|| IoError::InvalidFile(format!("PFM size {width}x{height} overflows")))?;
        if body.len() < count * 4 {
            return Err(IoError::InvalidFile(format!(
                "PFM body holds {} bytes, need {}",
                body.len(),
                count * 4
            )));
        }

        let mut raw = vec![0.0f32; count];
        if scale < 0.0 {
            LittleEndian::read_f32_into(&body[..count * 4], &mut raw);
        } else {
            BigEndian::read_f32_into(&body[..count * 4], &mut raw);
        }

        // File rows run bottom-to-top.
        let mut pixels = Vec::with_capacity(count);
        for r in raw.chunks_exact(row.max(1)).rev() {
            pixels.extend_from_slice(r);
        }

        Ok(ImageData::from_f32(width, height, channels as u32, pixels))
    }
}

/// PFM writer. Always writes little-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct PfmWriter;

impl PfmWriter {
    /// Creates a writer.
    pub fn new() -> Self {
        Self
    }
}

impl ImageWriter for PfmWriter {
    fn write<P: AsRef<Path>>(&self, path: P, image: &ImageData) -> IoResult<()> {
        let bytes = self.write_to_memory(image)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn write_to_memory(&self, image: &ImageData) -> IoResult<Vec<u8>> {
        image.validate()?;
        let magic = match image.channels {
            3 => "PF",
            1 => "Pf",
            n => {
                return Err(IoError::EncodeError(format!(
                    "PFM stores 1 or 3 channels, got {n}"
                )));
            }
        };
        let samples = image.to_f32();
        let row = image.width as usize * image.channels as usize;

        let header = format!("{magic}\n{} {}\n-1\n", image.width, image.height);
        let mut out = Vec::with_capacity(header.len() + samples.len() * 4);
        out.extend_from_slice(header.as_bytes());

        let mut buf = vec![0u8; row * 4];
        for r in samples.chunks_exact(row.max(1)).rev() {
            LittleEndian::write_f32_into(r, &mut buf);
            out.extend_from_slice(&buf);
        }
        Ok(out)
    }
}

/// Whitespace-separated header tokenizer.
struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    fn token(&mut self) -> IoResult<&'a str> {
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let start = self.pos;
        while self.pos < self.data.len() && !self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos || self.pos >= self.data.len() {
            return Err(IoError::InvalidFile("truncated PFM header".into()));
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .map_err(|_| IoError::InvalidFile("non-ASCII PFM header".into()))
    }

    fn number<T: std::str::FromStr>(&mut self) -> IoResult<T> {
        let token = self.token()?;
        token
            .parse()
            .map_err(|_| IoError::InvalidFile(format!("bad PFM header field {token:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_exact() {
        let data: Vec<f32> = (0..2 * 3 * 3).map(|i| i as f32 * 0.37 - 2.0).collect();
        let image = ImageData::from_f32(2, 3, 3, data);
        let bytes = PfmWriter::new().write_to_memory(&image).unwrap();
        assert!(bytes.starts_with(b"PF\n2 3\n-1\n"));
        let back = PfmReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back, image);
    }

    #[test]
    fn test_rows_stored_bottom_up() {
        let image = ImageData::from_f32(1, 2, 1, vec![1.0, 2.0]);
        let bytes = PfmWriter::new().write_to_memory(&image).unwrap();
        let body = &bytes[bytes.len() - 8..];
        assert_eq!(LittleEndian::read_f32(&body[..4]), 2.0);
        assert_eq!(LittleEndian::read_f32(&body[4..]), 1.0);
    }

    #[test]
    fn test_big_endian_input() {
        let mut bytes = b"Pf\n2 1\n1.0\n".to_vec();
        let mut body = [0u8; 8];
        BigEndian::write_f32_into(&[0.5, -3.0], &mut body);
        bytes.extend_from_slice(&body);
        let image = PfmReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(image, ImageData::from_f32(2, 1, 1, vec![0.5, -3.0]));
    }

    #[test]
    fn test_bytes_decoded_before_writing() {
        let image = ImageData::from_u8(1, 1, 1, vec![255]);
        let bytes = PfmWriter::new().write_to_memory(&image).unwrap();
        let back = PfmReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back.data, crate::PixelData::F32(vec![1.0]));
    }

    #[test]
    fn test_rejects_bad_input() {
        let reader = PfmReader::new();
        assert!(matches!(reader.read_from_memory(b"P6\n1 1\n255\n"), Err(IoError::InvalidFile(_))));
        assert!(matches!(reader.read_from_memory(b"PF\n4 4\n-1\n\0\0"), Err(IoError::InvalidFile(_))));
        assert!(matches!(reader.read_from_memory(b"PF\nx 4\n-1\n"), Err(IoError::InvalidFile(_))));
        assert!(matches!(reader.read_from_memory(b"PF"), Err(IoError::InvalidFile(_))));

        let rgba = ImageData::from_f32(1, 1, 4, vec![0.0; 4]);
        assert!(matches!(PfmWriter::new().write_to_memory(&rgba), Err(IoError::EncodeError(_))));
    }
}
