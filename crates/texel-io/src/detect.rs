//! Format detection utilities.
//!
//! Detects image formats from file extensions and magic bytes.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// OpenEXR, lossless float.
    Exr,
    /// Portable float map, raw `f32`.
    Pfm,
    /// PNG, 8-bit sRGB.
    Png,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (extension + magic bytes).
    ///
    /// First checks magic bytes, falls back to extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        if let Ok(format) = Self::from_magic_bytes(path) {
            if format != Format::Unknown {
                return Ok(format);
            }
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only, ignoring case.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("exr") => Format::Exr,
            Some("pfm") => Format::Pfm,
            Some("png") => Format::Png,
            _ => Format::Unknown,
        }
    }

    /// Codec that `write` uses for `path`.
    ///
    /// `.exr` and `.pfm` select the float containers; every other extension,
    /// or none, selects the 8-bit PNG codec.
    pub fn for_output<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_extension(path) {
            Format::Unknown => Format::Png,
            format => format,
        }
    }

    /// Detects format from file magic bytes.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];

        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // EXR: 0x76 0x2f 0x31 0x01
        if bytes.len() >= 4 && bytes[0..4] == [0x76, 0x2f, 0x31, 0x01] {
            return Format::Exr;
        }

        // PNG: 0x89 0x50 0x4E 0x47 0x0D 0x0A 0x1A 0x0A
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        // PFM: "PF" (RGB) or "Pf" (grey) followed by whitespace
        if bytes.len() >= 3
            && bytes[0] == b'P'
            && (bytes[1] == b'F' || bytes[1] == b'f')
            && bytes[2].is_ascii_whitespace()
        {
            return Format::Pfm;
        }

        Format::Unknown
    }

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Exr => "exr",
            Format::Pfm => "pfm",
            Format::Png => "png",
            Format::Unknown => "",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Exr => "image/x-exr",
            Format::Pfm => "image/x-portable-floatmap",
            Format::Png => "image/png",
            Format::Unknown => "application/octet-stream",
        }
    }

    /// Returns true if the format stores linear floats exactly.
    pub fn is_lossless_float(&self) -> bool {
        matches!(self, Format::Exr | Format::Pfm)
    }

    /// Returns true if this build carries a codec for the format.
    pub fn is_enabled(&self) -> bool {
        match self {
            Format::Exr => cfg!(feature = "exr"),
            Format::Pfm => cfg!(feature = "pfm"),
            Format::Png => cfg!(feature = "png"),
            Format::Unknown => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(Format::from_extension("test.exr"), Format::Exr);
        assert_eq!(Format::from_extension("test.EXR"), Format::Exr);
        assert_eq!(Format::from_extension("test.pfm"), Format::Pfm);
        assert_eq!(Format::from_extension("dir/test.Png"), Format::Png);
        assert_eq!(Format::from_extension("test.jpg"), Format::Unknown);
        assert_eq!(Format::from_extension("noext"), Format::Unknown);
    }

    #[test]
    fn test_output_format() {
        assert_eq!(Format::for_output("out.EXR"), Format::Exr);
        assert_eq!(Format::for_output("out.pfm"), Format::Pfm);
        assert_eq!(Format::for_output("out.png"), Format::Png);
        assert_eq!(Format::for_output("out.tga"), Format::Png);
        assert_eq!(Format::for_output("noext"), Format::Png);
    }

    #[test]
    fn test_magic_bytes() {
        let exr = [0x76, 0x2f, 0x31, 0x01, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(Format::from_bytes(&exr), Format::Exr);

        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(Format::from_bytes(&png), Format::Png);

        assert_eq!(Format::from_bytes(b"PF\n16 29\n-1\n"), Format::Pfm);
        assert_eq!(Format::from_bytes(b"Pf 2 2 1.0 "), Format::Pfm);
        assert_eq!(Format::from_bytes(b"P6\n"), Format::Unknown);
        assert_eq!(Format::from_bytes(b"PF"), Format::Unknown);

        let unknown = [0x00, 0x00, 0x00, 0x00];
        assert_eq!(Format::from_bytes(&unknown), Format::Unknown);
    }

    #[test]
    fn test_detect_prefers_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabeled.png");
        std::fs::write(&path, b"PF\n1 1\n-1\n\0\0\0\0\0\0\0\0\0\0\0\0").unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Pfm);

        let missing = dir.path().join("missing.exr");
        assert_eq!(Format::detect(&missing).unwrap(), Format::Exr);
    }

    #[test]
    fn test_format_properties() {
        assert_eq!(Format::Pfm.extension(), "pfm");
        assert_eq!(Format::Png.mime_type(), "image/png");
        assert!(Format::Exr.is_lossless_float());
        assert!(!Format::Png.is_lossless_float());
        assert!(!Format::Unknown.is_enabled());
    }
}
