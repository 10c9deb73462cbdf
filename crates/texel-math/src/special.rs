//! Assorted scalar helpers: powers, roots, error function, bit tricks.

use crate::consts::{MACHINE_EPSILON, PI};
use crate::interp::clamp;
use std::ops::{BitAnd, Sub};

/// Conservative bound on the relative error accumulated by `n` chained
/// floating-point operations: `(n ε) / (1 - n ε)`.
#[inline]
pub fn gamma(n: i32) -> f32 {
    let ne = n as f32 * MACHINE_EPSILON;
    ne / (1.0 - ne)
}

/// Degrees to radians.
#[inline]
pub fn radians(deg: f32) -> f32 {
    (PI / 180.0) * deg
}

/// Radians to degrees.
#[inline]
pub fn degrees(rad: f32) -> f32 {
    (180.0 / PI) * rad
}

/// Base-2 logarithm.
#[inline]
pub fn log2(x: f32) -> f32 {
    const INV_LOG2: f32 = 1.442_695_f32;
    x.ln() * INV_LOG2
}

/// Floor of the base-2 logarithm of `v`; `0` for `v == 0`.
#[inline]
pub fn log2_int(v: u32) -> i32 {
    if v == 0 { 0 } else { 31 - v.leading_zeros() as i32 }
}

/// 64-bit variant of [`log2_int`].
#[inline]
pub fn log2_int_u64(v: u64) -> i32 {
    if v == 0 { 0 } else { 63 - v.leading_zeros() as i32 }
}

/// Returns `true` if `v` is a (non-zero) power of two.
#[inline]
pub fn is_power_of_2<T>(v: T) -> bool
where
    T: Copy + PartialEq + BitAnd<Output = T> + Sub<Output = T> + From<u8>,
{
    let zero = T::from(0);
    v != zero && (v & (v - T::from(1))) == zero
}

/// Smallest power of two `>= v` for positive `v`.
#[inline]
pub fn round_up_pow2(v: i32) -> i32 {
    let mut v = v.wrapping_sub(1);
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v.wrapping_add(1)
}

/// 64-bit variant of [`round_up_pow2`].
#[inline]
pub fn round_up_pow2_i64(v: i64) -> i64 {
    let mut v = v.wrapping_sub(1);
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v |= v >> 32;
    v.wrapping_add(1)
}

/// Number of trailing zero bits; `32` for `0`.
#[inline]
pub fn count_trailing_zeros(v: u32) -> u32 {
    v.trailing_zeros()
}

/// `v * v`
#[inline]
pub fn sqr(v: f32) -> f32 {
    v * v
}

/// Raises `v` to a non-negative integer power by repeated squaring.
///
/// `pow(v, 0) == 1` for every `v`.
///
/// # Example
///
/// ```rust
/// use texel_math::pow;
///
/// assert_eq!(pow(2.0, 10), 1024.0);
/// assert_eq!(pow(3.0, 0), 1.0);
/// ```
pub fn pow(v: f32, n: u32) -> f32 {
    let mut result = 1.0;
    let mut base = v;
    let mut n = n;
    while n > 0 {
        if n & 1 == 1 {
            result *= base;
        }
        base *= base;
        n >>= 1;
    }
    result
}

/// Solves `a t² + b t + c = 0`.
///
/// Returns the real roots ordered `t0 <= t1`, or `None` if the discriminant
/// is negative. The discriminant is evaluated in `f64` and the roots use the
/// cancellation-free form `q = -(b ± √d) / 2`, `t0 = q / a`, `t1 = c / q`.
/// `a` must be non-zero.
pub fn quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let (a64, b64, c64) = (a as f64, b as f64, c as f64);
    let discrim = b64 * b64 - 4.0 * a64 * c64;
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();
    let q = if b < 0.0 {
        -0.5 * (b64 - root_discrim)
    } else {
        -0.5 * (b64 + root_discrim)
    };
    let t0 = (q / a64) as f32;
    // q is zero only when b and c are: a double root at zero.
    let t1 = if q == 0.0 { t0 } else { (c64 / q) as f32 };
    if t0 > t1 { Some((t1, t0)) } else { Some((t0, t1)) }
}

/// Error function (Abramowitz & Stegun 7.1.26, |error| < 1.5e-7).
pub fn erf(x: f32) -> f32 {
    const A1: f32 = 0.254_829_6;
    const A2: f32 = -0.284_496_74;
    const A3: f32 = 1.421_413_8;
    const A4: f32 = -1.453_152_1;
    const A5: f32 = 1.061_405_4;
    const P: f32 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

/// Inverse error function (Giles' single-precision approximation).
///
/// The input is clamped to `[-0.99999, 0.99999]`.
pub fn erf_inv(x: f32) -> f32 {
    let x = clamp(x, -0.99999, 0.99999);
    let mut w = -((1.0 - x) * (1.0 + x)).ln();
    let mut p;
    if w < 5.0 {
        w -= 2.5;
        p = 2.810_226_4e-8;
        p = 3.432_739_4e-7 + p * w;
        p = -3.523_387_7e-6 + p * w;
        p = -4.391_506_5e-6 + p * w;
        p = 0.000_218_580_87 + p * w;
        p = -0.001_253_725 + p * w;
        p = -0.004_177_681_6 + p * w;
        p = 0.246_640_73 + p * w;
        p = 1.501_409_4 + p * w;
    } else {
        w = w.sqrt() - 3.0;
        p = -0.000_200_214_26;
        p = 0.000_100_950_56 + p * w;
        p = 0.001_349_343_2 + p * w;
        p = -0.003_673_428_4 + p * w;
        p = 0.005_739_507_7 + p * w;
        p = -0.007_622_461 + p * w;
        p = 0.009_438_870_5 + p * w;
        p = 1.001_674_1 + p * w;
        p = 2.832_976_8 + p * w;
    }
    p * x
}
