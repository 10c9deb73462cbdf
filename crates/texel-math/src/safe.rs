//! Domain-tolerant math.
//!
//! Geometric code routinely produces values a hair outside the mathematical
//! domain of `asin`, `acos` and `sqrt` (a dot product of unit vectors at
//! `1.0000001`, a discriminant at `-1e-9`). These helpers accept a small
//! amount of slack, assert in debug builds that the input is not egregiously
//! out of range, and always clamp before evaluating so release builds stay
//! defined.
//!
//! | Function | Accepted input | Clamped to |
//! |----------|----------------|------------|
//! | [`safe_asin`] / [`safe_acos`] | `[-1.0001, 1.0001]` | `[-1, 1]` |
//! | [`safe_sqrt`] / [`safe_sqrt_f64`] | `>= -1e-4` | `>= 0` |

use crate::interp::clamp;

/// Floored modulo.
///
/// Unlike the `%` operator (truncated remainder, sign of the dividend) the
/// result is zero or carries the sign of the divisor.
pub trait FlooredMod: Sized {
    /// Returns `self mod b`.
    fn floored_mod(self, b: Self) -> Self;
}

macro_rules! impl_floored_mod {
    ($($t:ty),*) => {
        $(
            impl FlooredMod for $t {
                #[inline]
                fn floored_mod(self, b: Self) -> Self {
                    let r = self % b;
                    if r != (0 as $t) && ((r < (0 as $t)) != (b < (0 as $t))) {
                        r + b
                    } else {
                        r
                    }
                }
            }
        )*
    };
}

impl_floored_mod!(i32, i64, isize, f32, f64);

/// Floored modulo: `modulo(-1, 3) == 2`.
///
/// # Example
///
/// ```rust
/// use texel_math::modulo;
///
/// assert_eq!(modulo(-1, 3), 2);
/// assert_eq!(modulo(7, 3), 1);
/// assert_eq!(modulo(-0.5f32, 2.0), 1.5);
/// ```
#[inline]
pub fn modulo<T: FlooredMod>(a: T, b: T) -> T {
    a.floored_mod(b)
}

/// `asin` that tolerates inputs slightly outside `[-1, 1]`.
#[inline]
pub fn safe_asin(x: f32) -> f32 {
    debug_assert!((-1.0001..=1.0001).contains(&x), "safe_asin: {x} out of domain");
    clamp(x, -1.0, 1.0).asin()
}

/// `acos` that tolerates inputs slightly outside `[-1, 1]`.
#[inline]
pub fn safe_acos(x: f32) -> f32 {
    debug_assert!((-1.0001..=1.0001).contains(&x), "safe_acos: {x} out of domain");
    clamp(x, -1.0, 1.0).acos()
}

/// `sqrt` that maps small negative round-off to zero.
#[inline]
pub fn safe_sqrt(x: f32) -> f32 {
    debug_assert!(x >= -1e-4, "safe_sqrt: {x} too negative");
    x.max(0.0).sqrt()
}

/// `f64` variant of [`safe_sqrt`].
#[inline]
pub fn safe_sqrt_f64(x: f64) -> f64 {
    debug_assert!(x >= -1e-4, "safe_sqrt_f64: {x} too negative");
    x.max(0.0).sqrt()
}
