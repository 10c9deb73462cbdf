//! Image value store.
//!
//! [`Image`] owns a 2-D grid of samples in one [`PixelFormat`]. Values go in
//! and come out as linear light; the format decides what is kept in between:
//!
//! - float formats (`*Half`, `*32`) keep the linear value, unclamped,
//! - 8-bit formats keep [`linear_to_srgb8`] of the value, so they clamp to
//!   `[0, 1]` and read back through the exact inverse table.
//!
//! # Memory Layout
//!
//! Samples are stored in **row-major** order, top-to-bottom, with channels
//! interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use texel_core::{Image, PixelFormat, RgbSpectrum};
//!
//! let mut img = Image::new(PixelFormat::Rgb32, 16, 29);
//! img.set_spectrum(3, 4, &RgbSpectrum::from_rgb([0.2, 0.5, -1.5]));
//! assert_eq!(img.channel(3, 4, 2), -1.5);
//!
//! let mut ldr = Image::new(PixelFormat::Rgb8, 16, 29);
//! ldr.set_spectrum(3, 4, &RgbSpectrum::from_rgb([0.2, 0.5, -1.5]));
//! assert_eq!(ldr.channel(3, 4, 2), 0.0);
//! assert!((ldr.channel(3, 4, 0) - 0.2).abs() < 0.02);
//! ```
//!
//! # Boundary values
//!
//! Codecs never see the buffer directly; they take one of the views the
//! store hands out:
//!
//! - [`Image::samples`] - the raw buffer, for codecs that store the format as is
//! - [`Image::to_linear_f32`] - every channel as [`Image::channel`] reports it
//! - [`Image::to_srgb8`] - sRGB bytes, raw for 8-bit formats

use crate::{Error, PixelFormat, Result, RgbSpectrum};
use half::f16;
use texel_math::{clamp, lerp};
use texel_transfer::{linear_to_srgb8, srgb8_to_linear};
use tracing::trace;

/// Owned sample storage, tagged by element type.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// sRGB-encoded bytes.
    U8(Vec<u8>),
    /// Linear half floats.
    F16(Vec<f16>),
    /// Linear `f32`.
    F32(Vec<f32>),
}

impl PixelBuffer {
    /// Zero-filled buffer of `len` samples with the storage of `format`.
    pub fn zeroed(format: PixelFormat, len: usize) -> Self {
        if format.is_8bit() {
            Self::U8(vec![0; len])
        } else if format.is_16bit() {
            Self::F16(vec![f16::ZERO; len])
        } else {
            Self::F32(vec![0.0; len])
        }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::F16(v) => v.len(),
            Self::F32(v) => v.len(),
        }
    }

    /// `true` if the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if this buffer's element type is the storage of `format`.
    #[inline]
    pub fn fits(&self, format: PixelFormat) -> bool {
        match self {
            Self::U8(_) => format.is_8bit(),
            Self::F16(_) => format.is_16bit(),
            Self::F32(_) => format.is_32bit(),
        }
    }

    /// Element type name, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::F16(_) => "f16",
            Self::F32(_) => "f32",
        }
    }

    #[inline]
    fn load(&self, i: usize) -> f32 {
        match self {
            Self::U8(v) => srgb8_to_linear(v[i]),
            Self::F16(v) => v[i].to_f32(),
            Self::F32(v) => v[i],
        }
    }

    #[inline]
    fn store(&mut self, i: usize, value: f32) {
        match self {
            Self::U8(v) => v[i] = linear_to_srgb8(value),
            Self::F16(v) => v[i] = f16::from_f32(value),
            Self::F32(v) => v[i] = value,
        }
    }
}

/// Image owning a resolution and a buffer of samples in one [`PixelFormat`].
///
/// The format and resolution are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    format: PixelFormat,
    width: u32,
    height: u32,
    buffer: PixelBuffer,
}

impl Image {
    /// Creates a zero-filled image.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails (extremely large images).
    ///
    /// # Example
    ///
    /// ```rust
    /// use texel_core::{Image, PixelFormat};
    ///
    /// let img = Image::new(PixelFormat::RgbHalf, 640, 480);
    /// assert_eq!(img.resolution(), (640, 480));
    /// assert_eq!(img.samples().len(), 640 * 480 * 3);
    /// ```
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * format.channels();
        Self {
            format,
            width,
            height,
            buffer: PixelBuffer::zeroed(format, len),
        }
    }

    /// Wraps an existing buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if the sample count overflows
    /// - [`Error::BufferMismatch`] if the element type does not match
    ///   `format` or the length is not `width * height * channels`
    pub fn from_buffer(
        format: PixelFormat,
        width: u32,
        height: u32,
        buffer: PixelBuffer,
    ) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.channels()))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows"))?;
        if !buffer.fits(format) {
            return Err(Error::buffer_mismatch(format!(
                "{} samples cannot back {} pixels",
                buffer.kind(),
                format
            )));
        }
        if buffer.len() != expected {
            return Err(Error::buffer_mismatch(format!(
                "expected {} samples, got {}",
                expected,
                buffer.len()
            )));
        }
        Ok(Self {
            format,
            width,
            height,
            buffer,
        })
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channels per pixel.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.format.channels()
    }

    /// Raw samples.
    #[inline]
    pub fn samples(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Consumes the image, returning its buffer.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    #[inline]
    fn offset(&self, x: u32, y: u32, c: usize) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channel_count() + c
    }

    #[inline]
    #[track_caller]
    fn assert_in_bounds(&self, x: u32, y: u32, c: usize) {
        assert!(
            x < self.width && y < self.height && c < self.channel_count(),
            "channel ({x}, {y}, {c}) out of bounds for {}x{} {}",
            self.width,
            self.height,
            self.format
        );
    }

    fn check(&self, x: u32, y: u32, c: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        if c >= self.channel_count() {
            return Err(Error::ChannelOutOfRange {
                channel: c,
                channels: self.channel_count(),
            });
        }
        Ok(())
    }

    /// Returns channel `c` of pixel `(x, y)` as linear light.
    ///
    /// 8-bit formats decode through the inverse sRGB table.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y, c)` is out of range.
    #[inline]
    pub fn channel(&self, x: u32, y: u32, c: usize) -> f32 {
        self.assert_in_bounds(x, y, c);
        self.buffer.load(self.offset(x, y, c))
    }

    /// Bounds-checked [`channel`](Self::channel).
    pub fn try_channel(&self, x: u32, y: u32, c: usize) -> Result<f32> {
        self.check(x, y, c)?;
        Ok(self.buffer.load(self.offset(x, y, c)))
    }

    /// Stores linear `value` in channel `c` of pixel `(x, y)`.
    ///
    /// Float formats store the value unchanged; 8-bit formats store
    /// [`linear_to_srgb8`] of it.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y, c)` is out of range.
    #[inline]
    pub fn set_channel(&mut self, x: u32, y: u32, c: usize, value: f32) {
        self.assert_in_bounds(x, y, c);
        let i = self.offset(x, y, c);
        self.buffer.store(i, value);
    }

    /// Bounds-checked [`set_channel`](Self::set_channel).
    pub fn try_set_channel(&mut self, x: u32, y: u32, c: usize, value: f32) -> Result<()> {
        self.check(x, y, c)?;
        let i = self.offset(x, y, c);
        self.buffer.store(i, value);
        Ok(())
    }

    /// Stores a spectral sample at `(x, y)`.
    ///
    /// RGB formats store the sample's linear RGB, single-channel formats its
    /// luminance.
    pub fn set_spectrum(&mut self, x: u32, y: u32, s: &RgbSpectrum) {
        if self.channel_count() == 1 {
            self.set_channel(x, y, 0, s.y());
        } else {
            for (c, v) in s.to_rgb().into_iter().enumerate() {
                self.set_channel(x, y, c, v);
            }
        }
    }

    /// Reconstructs the spectral sample at `(x, y)`.
    ///
    /// Single-channel formats yield a constant spectrum.
    pub fn spectrum(&self, x: u32, y: u32) -> RgbSpectrum {
        if self.channel_count() == 1 {
            RgbSpectrum::constant(self.channel(x, y, 0))
        } else {
            RgbSpectrum::from_rgb([
                self.channel(x, y, 0),
                self.channel(x, y, 1),
                self.channel(x, y, 2),
            ])
        }
    }

    /// Bilinearly interpolates channel `c` at normalized coordinates `st`.
    ///
    /// Pixel centers sit at half-integer positions; lookups past the border
    /// repeat the edge pixels. An empty image yields `0`.
    pub fn bilerp_channel(&self, st: [f32; 2], c: usize) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let x = st[0] * self.width as f32 - 0.5;
        let y = st[1] * self.height as f32 - 0.5;
        let (xf, yf) = (x.floor(), y.floor());
        let (dx, dy) = (x - xf, y - yf);
        let (xi, yi) = (xf as i64, yf as i64);

        let v00 = self.clamped_channel(xi, yi, c);
        let v10 = self.clamped_channel(xi + 1, yi, c);
        let v01 = self.clamped_channel(xi, yi + 1, c);
        let v11 = self.clamped_channel(xi + 1, yi + 1, c);
        lerp(dy, lerp(dx, v00, v10), lerp(dx, v01, v11))
    }

    fn clamped_channel(&self, x: i64, y: i64, c: usize) -> f32 {
        let x = clamp(x, 0, self.width as i64 - 1) as u32;
        let y = clamp(y, 0, self.height as i64 - 1) as u32;
        self.channel(x, y, c)
    }

    /// Re-stores every sample in `format`.
    ///
    /// Values pass through linear light: converting to an 8-bit format
    /// quantizes, converting from one decodes through the inverse table.
    ///
    /// # Errors
    ///
    /// [`Error::ChannelMismatch`] if `format` has a different channel count.
    pub fn convert_to_format(&self, format: PixelFormat) -> Result<Image> {
        if format.channels() != self.channel_count() {
            return Err(Error::channel_mismatch(self.channel_count(), format.channels()));
        }
        if format == self.format {
            return Ok(self.clone());
        }
        trace!(from = %self.format, to = %format, "converting image");
        let len = self.buffer.len();
        let buffer = if format.is_8bit() {
            PixelBuffer::U8(self.to_srgb8())
        } else {
            let mut buffer = PixelBuffer::zeroed(format, len);
            for i in 0..len {
                buffer.store(i, self.buffer.load(i));
            }
            buffer
        };
        Ok(Image {
            format,
            width: self.width,
            height: self.height,
            buffer,
        })
    }

    /// Mirrors the image vertically in place.
    pub fn flip_y(&mut self) {
        let row = self.width as usize * self.channel_count();
        let height = self.height as usize;
        match &mut self.buffer {
            PixelBuffer::U8(v) => flip_rows(v, row, height),
            PixelBuffer::F16(v) => flip_rows(v, row, height),
            PixelBuffer::F32(v) => flip_rows(v, row, height),
        }
    }

    /// Mean linear value of each channel; zeros for an empty image.
    pub fn channel_average(&self) -> Vec<f32> {
        let n = self.channel_count();
        let mut sums = vec![0.0f64; n];
        for i in 0..self.buffer.len() {
            sums[i % n] += self.buffer.load(i) as f64;
        }
        let pixels = self.width as usize * self.height as usize;
        if pixels == 0 {
            return vec![0.0; n];
        }
        sums.into_iter().map(|s| (s / pixels as f64) as f32).collect()
    }

    /// Every sample as linear light, in buffer order.
    ///
    /// Float formats are returned exactly; 8-bit formats are decoded with
    /// the inverse table.
    pub fn to_linear_f32(&self) -> Vec<f32> {
        match &self.buffer {
            PixelBuffer::F32(v) => v.clone(),
            PixelBuffer::F16(v) => v.iter().map(|h| h.to_f32()).collect(),
            PixelBuffer::U8(v) => v.iter().map(|&b| srgb8_to_linear(b)).collect(),
        }
    }

    /// Every sample as an sRGB byte, in buffer order.
    ///
    /// 8-bit formats are returned as stored; float formats are quantized
    /// with [`linear_to_srgb8`], clamping to `[0, 255]`.
    pub fn to_srgb8(&self) -> Vec<u8> {
        match &self.buffer {
            PixelBuffer::U8(v) => v.clone(),
            PixelBuffer::F16(v) => v.iter().map(|h| linear_to_srgb8(h.to_f32())).collect(),
            PixelBuffer::F32(v) => v.iter().map(|&f| linear_to_srgb8(f)).collect(),
        }
    }
}

fn flip_rows<T>(data: &mut [T], row: usize, height: usize) {
    if row == 0 {
        return;
    }
    for y in 0..height / 2 {
        let (top, bottom) = data.split_at_mut((height - 1 - y) * row);
        top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gradient(format: PixelFormat) -> Image {
        let mut img = Image::new(format, 16, 29);
        for y in 0..29 {
            for x in 0..16 {
                let rgb = [x as f32 / 15.0, y as f32 / 28.0, -1.5];
                img.set_spectrum(x, y, &RgbSpectrum::from_rgb(rgb));
            }
        }
        img
    }

    #[test]
    fn test_new_is_zeroed() {
        let img = Image::new(PixelFormat::Rgb8, 4, 3);
        assert_eq!(img.samples().len(), 36);
        assert_eq!(img.channel(3, 2, 2), 0.0);
        let empty = Image::new(PixelFormat::Y32, 0, 7);
        assert!(empty.samples().is_empty());
    }

    #[test]
    fn test_float_formats_store_unclamped() {
        let img = gradient(PixelFormat::Rgb32);
        assert_eq!(img.channel(15, 28, 0), 1.0);
        assert_eq!(img.channel(15, 28, 1), 1.0);
        assert_eq!(img.channel(0, 0, 2), -1.5);

        let img = gradient(PixelFormat::RgbHalf);
        assert_eq!(img.channel(7, 0, 2), -1.5);
        assert_abs_diff_eq!(img.channel(7, 0, 0), 7.0 / 15.0, epsilon = 1e-3);
    }

    #[test]
    fn test_8bit_clamps_and_quantizes() {
        let img = gradient(PixelFormat::Rgb8);
        for y in 0..29 {
            for x in 0..16 {
                assert_eq!(img.channel(x, y, 2), 0.0);
                assert_abs_diff_eq!(img.channel(x, y, 0), x as f32 / 15.0, epsilon = 0.02);
                assert_abs_diff_eq!(img.channel(x, y, 1), y as f32 / 28.0, epsilon = 0.02);
            }
        }
        let mut img = Image::new(PixelFormat::Y8, 1, 1);
        img.set_channel(0, 0, 0, 3.0);
        assert_eq!(img.channel(0, 0, 0), 1.0);
    }

    #[test]
    fn test_single_channel_spectrum() {
        let mut img = Image::new(PixelFormat::Y32, 2, 2);
        let s = RgbSpectrum::from_rgb([0.5, 0.3, 0.2]);
        img.set_spectrum(1, 1, &s);
        assert_eq!(img.channel(1, 1, 0), s.y());
        assert_eq!(img.spectrum(1, 1), RgbSpectrum::constant(s.y()));
    }

    #[test]
    fn test_try_accessors() {
        let mut img = Image::new(PixelFormat::Rgb32, 2, 2);
        assert!(img.try_set_channel(1, 1, 2, 4.0).is_ok());
        assert_eq!(img.try_channel(1, 1, 2).unwrap(), 4.0);
        assert!(matches!(
            img.try_channel(2, 0, 0),
            Err(Error::OutOfBounds { x: 2, .. })
        ));
        assert!(matches!(
            img.try_channel(0, 0, 3),
            Err(Error::ChannelOutOfRange { channel: 3, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_channel_past_row_end_panics() {
        // (2, 0) would alias pixel (0, 1) without the check.
        let img = Image::new(PixelFormat::Rgb32, 2, 2);
        img.channel(2, 0, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_channel_past_last_channel_panics() {
        let mut img = Image::new(PixelFormat::Rgb8, 2, 2);
        img.set_channel(0, 0, 3, 1.0);
    }

    #[test]
    fn test_from_buffer_checks() {
        let ok = Image::from_buffer(PixelFormat::Y32, 2, 2, PixelBuffer::F32(vec![1.0; 4]));
        assert!(ok.is_ok());
        let short = Image::from_buffer(PixelFormat::Rgb32, 2, 2, PixelBuffer::F32(vec![1.0; 4]));
        assert!(matches!(short, Err(Error::BufferMismatch { .. })));
        let kind = Image::from_buffer(PixelFormat::Rgb8, 1, 1, PixelBuffer::F32(vec![0.0; 3]));
        assert!(matches!(kind, Err(Error::BufferMismatch { .. })));
    }

    #[test]
    fn test_bilerp_channel() {
        let mut img = Image::new(PixelFormat::Y32, 2, 1);
        img.set_channel(0, 0, 0, 0.0);
        img.set_channel(1, 0, 0, 1.0);
        // Pixel centers.
        assert_abs_diff_eq!(img.bilerp_channel([0.25, 0.5], 0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(img.bilerp_channel([0.75, 0.5], 0), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(img.bilerp_channel([0.5, 0.5], 0), 0.5, epsilon = 1e-6);
        // Edges clamp.
        assert_abs_diff_eq!(img.bilerp_channel([0.0, 0.0], 0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(img.bilerp_channel([1.0, 1.0], 0), 1.0, epsilon = 1e-6);
        assert_eq!(Image::new(PixelFormat::Y32, 0, 0).bilerp_channel([0.5, 0.5], 0), 0.0);
    }

    #[test]
    fn test_convert_to_format() {
        let src = gradient(PixelFormat::Rgb32);
        let ldr = src.convert_to_format(PixelFormat::Rgb8).unwrap();
        assert_eq!(ldr.format(), PixelFormat::Rgb8);
        assert_eq!(ldr.samples(), &PixelBuffer::U8(src.to_srgb8()));

        let back = ldr.convert_to_format(PixelFormat::Rgb32).unwrap();
        assert_eq!(back.to_linear_f32(), ldr.to_linear_f32());

        let half = src.convert_to_format(PixelFormat::RgbHalf).unwrap();
        assert_eq!(half.channel(0, 0, 2), -1.5);

        assert!(matches!(
            src.convert_to_format(PixelFormat::Y32),
            Err(Error::ChannelMismatch { expected: 3, got: 1 })
        ));
    }

    #[test]
    fn test_flip_y() {
        let mut img = gradient(PixelFormat::Rgb32);
        let orig = img.clone();
        img.flip_y();
        for y in 0..29 {
            for x in 0..16 {
                assert_eq!(img.channel(x, y, 1), orig.channel(x, 28 - y, 1));
            }
        }
        img.flip_y();
        assert_eq!(img, orig);
    }

    #[test]
    fn test_channel_average() {
        let img = gradient(PixelFormat::Rgb32);
        let avg = img.channel_average();
        assert_eq!(avg.len(), 3);
        assert_abs_diff_eq!(avg[0], 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(avg[1], 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(avg[2], -1.5, epsilon = 1e-5);
        assert_eq!(Image::new(PixelFormat::Y8, 0, 3).channel_average(), vec![0.0]);
    }

    #[test]
    fn test_boundary_views() {
        let img = gradient(PixelFormat::Rgb32);
        let linear = img.to_linear_f32();
        let bytes = img.to_srgb8();
        assert_eq!(linear.len(), bytes.len());
        assert_eq!(linear[2], -1.5);
        assert_eq!(bytes[2], 0);
        let last = linear.len() - 3;
        assert_eq!(bytes[last], 255);
    }
}
