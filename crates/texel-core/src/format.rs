//! Pixel storage formats.
//!
//! A [`PixelFormat`] fixes how many channels each pixel has and how each
//! channel is stored. The set is closed:
//!
//! | Format | Channels | Storage | Encoding |
//! |--------|----------|---------|----------|
//! | `Y8` | 1 | `u8` | sRGB |
//! | `Rgb8` | 3 | `u8` | sRGB |
//! | `YHalf` | 1 | `f16` | linear |
//! | `RgbHalf` | 3 | `f16` | linear |
//! | `Y32` | 1 | `f32` | linear |
//! | `Rgb32` | 3 | `f32` | linear |
//!
//! 8-bit formats quantize through the table-driven sRGB encoder when a value
//! is stored, so they clamp to `[0, 1]`. Float formats keep values unclamped.

use std::fmt;

/// Per-channel storage layout of an [`Image`](crate::Image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One sRGB-encoded byte per pixel.
    Y8,
    /// Three sRGB-encoded bytes per pixel.
    Rgb8,
    /// One linear half float per pixel.
    YHalf,
    /// Three linear half floats per pixel.
    RgbHalf,
    /// One linear `f32` per pixel.
    Y32,
    /// Three linear `f32` per pixel.
    Rgb32,
}

impl PixelFormat {
    /// Number of channels per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Y8 | Self::YHalf | Self::Y32 => 1,
            Self::Rgb8 | Self::RgbHalf | Self::Rgb32 => 3,
        }
    }

    /// Bytes used to store one channel.
    #[inline]
    pub const fn bytes_per_channel(self) -> usize {
        match self {
            Self::Y8 | Self::Rgb8 => 1,
            Self::YHalf | Self::RgbHalf => 2,
            Self::Y32 | Self::Rgb32 => 4,
        }
    }

    /// `true` for the sRGB-encoded byte formats.
    #[inline]
    pub const fn is_8bit(self) -> bool {
        matches!(self, Self::Y8 | Self::Rgb8)
    }

    /// `true` for the half float formats.
    #[inline]
    pub const fn is_16bit(self) -> bool {
        matches!(self, Self::YHalf | Self::RgbHalf)
    }

    /// `true` for the `f32` formats.
    #[inline]
    pub const fn is_32bit(self) -> bool {
        matches!(self, Self::Y32 | Self::Rgb32)
    }

    /// `true` if channels hold linear floating-point values.
    #[inline]
    pub const fn is_float(self) -> bool {
        !self.is_8bit()
    }

    /// Returns the format with the same storage and `channels` channels.
    ///
    /// Returns `None` for channel counts other than 1 or 3.
    pub const fn with_channels(self, channels: usize) -> Option<Self> {
        let f = match (self, channels) {
            (Self::Y8 | Self::Rgb8, 1) => Self::Y8,
            (Self::Y8 | Self::Rgb8, 3) => Self::Rgb8,
            (Self::YHalf | Self::RgbHalf, 1) => Self::YHalf,
            (Self::YHalf | Self::RgbHalf, 3) => Self::RgbHalf,
            (Self::Y32 | Self::Rgb32, 1) => Self::Y32,
            (Self::Y32 | Self::Rgb32, 3) => Self::Rgb32,
            _ => return None,
        };
        Some(f)
    }

    /// Short lowercase name, e.g. `"rgb32"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Y8 => "y8",
            Self::Rgb8 => "rgb8",
            Self::YHalf => "yhalf",
            Self::RgbHalf => "rgbhalf",
            Self::Y32 => "y32",
            Self::Rgb32 => "rgb32",
        }
    }

    /// Parses a name produced by [`name`](Self::name), ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let f = match name.to_ascii_lowercase().as_str() {
            "y8" => Self::Y8,
            "rgb8" => Self::Rgb8,
            "yhalf" => Self::YHalf,
            "rgbhalf" => Self::RgbHalf,
            "y32" => Self::Y32,
            "rgb32" => Self::Rgb32,
            _ => return None,
        };
        Some(f)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PixelFormat; 6] = [
        PixelFormat::Y8,
        PixelFormat::Rgb8,
        PixelFormat::YHalf,
        PixelFormat::RgbHalf,
        PixelFormat::Y32,
        PixelFormat::Rgb32,
    ];

    #[test]
    fn test_width_queries_are_exclusive() {
        for f in ALL {
            let n = [f.is_8bit(), f.is_16bit(), f.is_32bit()]
                .iter()
                .filter(|b| **b)
                .count();
            assert_eq!(n, 1, "{f}");
            assert_eq!(f.is_float(), !f.is_8bit());
        }
    }

    #[test]
    fn test_channels_and_bytes() {
        assert_eq!(PixelFormat::Rgb8.channels(), 3);
        assert_eq!(PixelFormat::Y32.channels(), 1);
        assert_eq!(PixelFormat::RgbHalf.bytes_per_channel(), 2);
        assert_eq!(PixelFormat::Rgb32.bytes_per_channel(), 4);
    }

    #[test]
    fn test_with_channels() {
        assert_eq!(PixelFormat::Y8.with_channels(3), Some(PixelFormat::Rgb8));
        assert_eq!(PixelFormat::Rgb32.with_channels(1), Some(PixelFormat::Y32));
        assert_eq!(PixelFormat::YHalf.with_channels(4), None);
    }

    #[test]
    fn test_name_roundtrip() {
        for f in ALL {
            assert_eq!(PixelFormat::from_name(f.name()), Some(f));
            assert_eq!(f.to_string(), f.name());
        }
        assert_eq!(PixelFormat::from_name("RGB32"), Some(PixelFormat::Rgb32));
        assert_eq!(PixelFormat::from_name("rgba"), None);
    }
}
