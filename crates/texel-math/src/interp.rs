//! Clamping and interpolation.
//!
//! # Usage
//!
//! ```rust
//! use texel_math::{clamp, lerp};
//!
//! assert_eq!(clamp(-1, 0, 10), 0);
//! assert_eq!(lerp(0.5, 0.0, 10.0), 5.0);
//! ```

/// Clamps `val` to `[low, high]`.
///
/// Returns `low` if `val < low`, `high` if `val > high`, otherwise `val`.
/// Works for any partially ordered type; a NaN `val` compares false both
/// ways and is returned unchanged.
///
/// # Example
///
/// ```rust
/// use texel_math::clamp;
///
/// assert_eq!(clamp(5, 0, 10), 5);
/// assert_eq!(clamp(-0.5f32, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(1.5f32, 0.0, 1.0), 1.0);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(val: T, low: T, high: T) -> T {
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Linear interpolation: `(1 - t) * a + t * b`.
///
/// Returns `a` at `t = 0` and `b` at `t = 1`, extrapolating outside `[0, 1]`.
/// The parameter comes first, matching how it is threaded through filtering
/// code (`lerp(dx, v00, v10)`).
#[inline]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Clamps a value to `[0, 1]`.
#[inline]
pub fn saturate(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_int() {
        assert_eq!(clamp(5, 0, 10), 5);
        assert_eq!(clamp(-1, 0, 10), 0);
        assert_eq!(clamp(11, 0, 10), 10);
        assert_eq!(clamp(0usize, 0, 0), 0);
    }

    #[test]
    fn test_clamp_float() {
        assert_eq!(clamp(0.25f32, 0.0, 1.0), 0.25);
        assert_eq!(clamp(-3.0f64, -1.0, 1.0), -1.0);
        assert!(clamp(f32::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 2.0, 4.0), 2.0);
        assert_eq!(lerp(1.0, 2.0, 4.0), 4.0);
        assert_eq!(lerp(0.5, 2.0, 4.0), 3.0);
        assert_eq!(lerp(2.0, 0.0, 1.0), 2.0);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(-0.1), 0.0);
        assert_eq!(saturate(0.7), 0.7);
        assert_eq!(saturate(7.0), 1.0);
    }
}
