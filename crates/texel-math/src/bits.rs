//! Float bit-pattern utilities.
//!
//! Reinterprets IEEE 754 values as their raw bit patterns and steps to the
//! adjacent representable value ("ULP stepping"). Ray/shape intersection code
//! uses these to push conservative bounds outward by exactly one ULP.
//!
//! Both widths are handled through the [`FloatBits`] trait:
//!
//! | Float | Bits  |
//! |-------|-------|
//! | `f32` | `u32` |
//! | `f64` | `u64` |
//!
//! # Example
//!
//! ```rust
//! use texel_math::{bits_to_float, float_to_bits, next_float_up};
//!
//! assert_eq!(float_to_bits(1.0f32), 0x3f80_0000);
//! assert_eq!(bits_to_float::<f32>(0x3f80_0000), 1.0);
//! assert_eq!(next_float_up(0.0f32), f32::from_bits(1));
//! ```

/// A floating-point type with a same-width unsigned bit representation.
pub trait FloatBits: Copy + PartialOrd {
    /// Unsigned integer type of the same width.
    type Bits: Copy + Eq + std::fmt::Debug;

    /// Reinterprets the value as its bit pattern.
    fn to_bit_pattern(self) -> Self::Bits;

    /// Reinterprets a bit pattern as a float.
    fn from_bit_pattern(bits: Self::Bits) -> Self;

    /// Returns the value `delta` representable steps above `self`.
    fn step_up(self, delta: u32) -> Self;

    /// Returns the value `delta` representable steps below `self`.
    fn step_down(self, delta: u32) -> Self;
}

macro_rules! impl_float_bits {
    ($float:ty, $bits:ty) => {
        impl FloatBits for $float {
            type Bits = $bits;

            #[inline]
            fn to_bit_pattern(self) -> $bits {
                self.to_bits()
            }

            #[inline]
            fn from_bit_pattern(bits: $bits) -> Self {
                <$float>::from_bits(bits)
            }

            fn step_up(self, delta: u32) -> Self {
                let mut v = self;
                if v.is_nan() || (v.is_infinite() && v > 0.0) {
                    return v;
                }
                // -0 and +0 share the step up to the smallest positive subnormal.
                if v == 0.0 {
                    v = 0.0;
                }
                let bits = v.to_bits();
                let bits = if v >= 0.0 {
                    bits.wrapping_add(delta as $bits)
                } else {
                    bits.wrapping_sub(delta as $bits)
                };
                <$float>::from_bits(bits)
            }

            fn step_down(self, delta: u32) -> Self {
                let mut v = self;
                if v.is_nan() || (v.is_infinite() && v < 0.0) {
                    return v;
                }
                if v == 0.0 {
                    v = -0.0;
                }
                let bits = v.to_bits();
                let bits = if v > 0.0 {
                    bits.wrapping_sub(delta as $bits)
                } else {
                    bits.wrapping_add(delta as $bits)
                };
                <$float>::from_bits(bits)
            }
        }
    };
}

impl_float_bits!(f32, u32);
impl_float_bits!(f64, u64);

/// Reinterprets a float as its raw bit pattern.
///
/// Lossless: `bits_to_float(float_to_bits(v))` reproduces `v` bit for bit,
/// including signed zeros, infinities and NaN payloads.
#[inline]
pub fn float_to_bits<F: FloatBits>(v: F) -> F::Bits {
    v.to_bit_pattern()
}

/// Reinterprets a raw bit pattern as a float.
#[inline]
pub fn bits_to_float<F: FloatBits>(bits: F::Bits) -> F {
    F::from_bit_pattern(bits)
}

/// Returns the smallest representable value strictly greater than `v`.
///
/// `+inf` maps to itself, `-0.0` is treated as `+0.0` and NaN is returned
/// unchanged.
///
/// # Example
///
/// ```rust
/// use texel_math::next_float_up;
///
/// assert_eq!(next_float_up(f32::INFINITY), f32::INFINITY);
/// assert_eq!(next_float_up(-f32::from_bits(1)), 0.0);
/// ```
#[inline]
pub fn next_float_up<F: FloatBits>(v: F) -> F {
    v.step_up(1)
}

/// Returns the largest representable value strictly less than `v`.
///
/// `-inf` maps to itself, `+0.0` is treated as `-0.0` so the step crosses
/// into the negative subnormals.
#[inline]
pub fn next_float_down<F: FloatBits>(v: F) -> F {
    v.step_down(1)
}

/// Steps `delta` representable values above `v`.
#[inline]
pub fn next_float_up_by<F: FloatBits>(v: F, delta: u32) -> F {
    v.step_up(delta)
}

/// Steps `delta` representable values below `v`.
#[inline]
pub fn next_float_down_by<F: FloatBits>(v: F, delta: u32) -> F {
    v.step_down(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES_F32: &[f32] = &[
        0.0, -0.0, 1.0, -1.0, 0.5, 3.25, -1.5, 1e-30, -1e-30, 1e30, -1e30,
        f32::MIN_POSITIVE, -f32::MIN_POSITIVE, f32::EPSILON,
    ];

    const SAMPLES_F64: &[f64] = &[
        0.0, -0.0, 1.0, -1.0, 0.5, 3.25, -1.5, 1e-300, -1e-300, 1e300, -1e300,
        f64::MIN_POSITIVE, -f64::MIN_POSITIVE, f64::EPSILON,
    ];

    #[test]
    fn test_bits_roundtrip() {
        for &v in SAMPLES_F32 {
            assert_eq!(bits_to_float::<f32>(float_to_bits(v)).to_bits(), v.to_bits());
        }
        for v in [f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(bits_to_float::<f32>(float_to_bits(v)), v);
        }
        for &v in &[0.0f64, -0.0, 1.0, -2.5, 1e300, -1e-300, f64::INFINITY] {
            assert_eq!(bits_to_float::<f64>(float_to_bits(v)).to_bits(), v.to_bits());
        }
    }

    #[test]
    fn test_known_patterns() {
        assert_eq!(float_to_bits(1.0f32), 0x3f80_0000);
        assert_eq!(float_to_bits(-0.0f32), 0x8000_0000);
        assert_eq!(float_to_bits(1.0f64), 0x3ff0_0000_0000_0000);
        assert_eq!(bits_to_float::<f64>(0x4000_0000_0000_0000), 2.0);
    }

    #[test]
    fn test_next_up_down_inverse() {
        for &v in SAMPLES_F32 {
            let up = next_float_up(v);
            assert!(up > v, "next_float_up({v}) = {up}");
            assert_eq!(next_float_down(up), v, "v = {v}");

            let down = next_float_down(v);
            assert!(down < v, "next_float_down({v}) = {down}");
            assert_eq!(next_float_up(down), v, "v = {v}");
        }
    }

    #[test]
    fn test_next_up_down_inverse_f64() {
        for &v in SAMPLES_F64 {
            let up = next_float_up(v);
            assert!(up > v, "next_float_up({v}) = {up}");
            assert_eq!(next_float_down(up), v, "v = {v}");

            let down = next_float_down(v);
            assert!(down < v, "next_float_down({v}) = {down}");
            assert_eq!(next_float_up(down), v, "v = {v}");
        }
    }

    #[test]
    fn test_zero_crossing() {
        let tiny = f32::from_bits(1);
        assert_eq!(next_float_up(0.0f32), tiny);
        assert_eq!(next_float_up(-0.0f32), tiny);
        assert_eq!(next_float_down(0.0f32), -tiny);
        assert_eq!(next_float_down(-0.0f32), -tiny);
        assert_eq!(next_float_up(-tiny), 0.0);
        assert_eq!(next_float_down(tiny), 0.0);
    }

    #[test]
    fn test_infinities() {
        assert_eq!(next_float_up(f32::INFINITY), f32::INFINITY);
        assert_eq!(next_float_down(f32::NEG_INFINITY), f32::NEG_INFINITY);
        assert_eq!(next_float_up(f32::MAX), f32::INFINITY);
        assert_eq!(next_float_up(f32::NEG_INFINITY), f32::MIN);
        assert_eq!(next_float_down(f32::INFINITY), f32::MAX);
        assert_eq!(next_float_up(f64::INFINITY), f64::INFINITY);
        assert_eq!(next_float_down(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn test_nan_passthrough() {
        assert!(next_float_up(f32::NAN).is_nan());
        assert!(next_float_down(f64::NAN).is_nan());
    }

    #[test]
    fn test_f64_delta() {
        let v = 1.0f64;
        let up3 = next_float_up_by(v, 3);
        assert_eq!(up3.to_bits(), v.to_bits() + 3);
        assert_eq!(next_float_down_by(up3, 3), v);

        let n = -1.0f64;
        assert_eq!(next_float_up_by(n, 2).to_bits(), n.to_bits() - 2);
        assert_eq!(next_float_down_by(n, 2).to_bits(), n.to_bits() + 2);
        assert!(next_float_up_by(n, 2) > n);
    }

    #[test]
    fn test_ulp_gap_matches_epsilon() {
        assert_eq!(next_float_up(1.0f32) - 1.0, f32::EPSILON);
        assert_eq!(next_float_up(1.0f64) - 1.0, f64::EPSILON);
    }
}
