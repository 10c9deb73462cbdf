//! Codec seams.
//!
//! Every codec moves [`ImageData`] and nothing else. The sample variant
//! says what the values mean, and codecs must keep that meaning:
//!
//! - `PixelData::U8` holds sRGB-encoded bytes. A float container decodes
//!   them through the inverse table before storing.
//! - `PixelData::F16` / `F32` hold linear light. A float container stores
//!   them bit for bit; an 8-bit container quantizes them with the fast
//!   sRGB encoder.
//!
//! Readers return bytes only for 8-bit files and linear floats otherwise,
//! so [`crate::data_to_image`] can pick the pixel format from the variant.

use crate::{ImageData, IoResult};
use std::path::Path;

/// Decodes one container into [`ImageData`].
///
/// `read_from_memory` must accept exactly the bytes `read` would load from
/// disk; [`crate::read_from_memory`] relies on that to dispatch by magic.
pub trait ImageReader {
    /// Decodes the file at `path`.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<ImageData>;

    /// Decodes an in-memory copy of a file.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData>;
}

/// Encodes [`ImageData`] into one container.
///
/// Writers call [`ImageData::validate`] first and reject channel counts the
/// container cannot hold with `IoError::EncodeError`.
pub trait ImageWriter {
    /// Encodes `image` to a new file at `path`.
    fn write<P: AsRef<Path>>(&self, path: P, image: &ImageData) -> IoResult<()>;

    /// Encodes `image` to a byte vector.
    fn write_to_memory(&self, image: &ImageData) -> IoResult<Vec<u8>>;
}

#[cfg(all(test, feature = "pfm", feature = "png"))]
mod tests {
    use super::*;
    use crate::pfm::{PfmReader, PfmWriter};
    use crate::png::{PngReader, PngWriter};
    use crate::PixelData;

    fn through<W: ImageWriter, R: ImageReader>(writer: W, reader: R, image: &ImageData) -> ImageData {
        let bytes = writer.write_to_memory(image).unwrap();
        reader.read_from_memory(&bytes).unwrap()
    }

    #[test]
    fn test_variant_meaning_survives_codecs() {
        // Byte 255 is linear 1.0 in a float container.
        let bytes = ImageData::from_u8(1, 1, 1, vec![255]);
        assert_eq!(through(PfmWriter::new(), PfmReader::new(), &bytes).data, PixelData::F32(vec![1.0]));

        // Linear 1.0 is byte 255 in an 8-bit container.
        let linear = ImageData::from_f32(1, 1, 1, vec![1.0]);
        assert_eq!(through(PngWriter::new(), PngReader::new(), &linear).data, PixelData::U8(vec![255]));
    }

    #[test]
    fn test_memory_and_file_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pfm");
        let image = ImageData::from_f32(2, 1, 1, vec![-0.5, 7.0]);
        PfmWriter::new().write(&path, &image).unwrap();
        let from_file = PfmReader::new().read(&path).unwrap();
        let from_memory = PfmReader::new().read_from_memory(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(from_file, from_memory);
        assert_eq!(from_file, image);
    }
}
