//! RGB spectral samples.
//!
//! [`RgbSpectrum`] is the spectral representation the image store exchanges
//! with callers. Conversion to and from linear RGB is the identity, so values
//! outside `[0, 1]` and negative values survive unchanged.

/// Rec.709 luminance coefficient for red channel.
///
/// Used in the standard luminance formula: `Y = 0.2126*R + 0.7152*G + 0.0722*B`
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// A spectral sample stored as linear RGB coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RgbSpectrum {
    c: [f32; 3],
}

impl RgbSpectrum {
    /// Builds a spectrum from linear RGB.
    #[inline]
    pub const fn from_rgb(rgb: [f32; 3]) -> Self {
        Self { c: rgb }
    }

    /// Spectrum with the same value in every channel.
    #[inline]
    pub const fn constant(v: f32) -> Self {
        Self { c: [v, v, v] }
    }

    /// Linear RGB coefficients.
    #[inline]
    pub const fn to_rgb(&self) -> [f32; 3] {
        self.c
    }

    /// Rec.709 luminance.
    ///
    /// ```
    /// use texel_core::RgbSpectrum;
    /// let y = RgbSpectrum::from_rgb([0.5, 0.3, 0.2]).y();
    /// assert!((y - 0.3353).abs() < 0.0001);
    /// ```
    #[inline]
    pub fn y(&self) -> f32 {
        self.c[0] * REC709_LUMA_R + self.c[1] * REC709_LUMA_G + self.c[2] * REC709_LUMA_B
    }

    /// `true` if every coefficient is zero.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }
}

impl From<[f32; 3]> for RgbSpectrum {
    fn from(rgb: [f32; 3]) -> Self {
        Self::from_rgb(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rgb_identity() {
        let rgb = [0.25, -1.5, 7.0];
        assert_eq!(RgbSpectrum::from_rgb(rgb).to_rgb(), rgb);
        assert_eq!(RgbSpectrum::from(rgb).to_rgb(), rgb);
    }

    #[test]
    fn test_luminance() {
        assert_abs_diff_eq!(RgbSpectrum::constant(1.0).y(), 1.0, epsilon = 1e-6);
        assert_eq!(RgbSpectrum::from_rgb([0.0, 0.0, 1.0]).y(), REC709_LUMA_B);
    }

    #[test]
    fn test_black() {
        assert!(RgbSpectrum::default().is_black());
        assert!(!RgbSpectrum::constant(-0.5).is_black());
    }
}
