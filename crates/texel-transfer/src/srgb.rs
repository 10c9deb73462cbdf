//! sRGB transfer function.
//!
//! The sRGB standard uses a piecewise function combining a linear segment
//! near black with a power curve (approximately gamma 2.2) for the rest.
//!
//! # Range
//!
//! - Input/Output: [0, 1]. The exact transforms extrapolate outside this
//!   range; the table-driven ones clamp.
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

use crate::lut::{forward_table, inverse_table, TABLE_SIZE};
use texel_math::{clamp, find_interval};

/// Linear values below this use the linear toe of the OETF.
pub const OETF_LINEAR_CUTOFF: f32 = 0.0031308;

/// Encoded values below this use the linear toe of the EOTF.
pub const EOTF_LINEAR_CUTOFF: f32 = 0.04045;

/// sRGB EOTF: Decodes sRGB encoded values to linear light.
///
/// Converts gamma-encoded sRGB [0, 1] to linear [0, 1].
///
/// # Formula
///
/// ```text
/// if V < 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use texel_transfer::srgb::eotf;
///
/// let linear = eotf(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v < EOTF_LINEAR_CUTOFF {
        v * (1.0 / 12.92)
    } else {
        ((v + 0.055) * (1.0 / 1.055)).powf(2.4)
    }
}

/// sRGB OETF: Encodes linear light to sRGB.
///
/// Converts linear [0, 1] to gamma-encoded sRGB [0, 1]. This is the reference
/// transform; [`oetf_fast`] approximates it.
///
/// # Formula
///
/// ```text
/// if L < 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
///
/// # Example
///
/// ```rust
/// use texel_transfer::srgb::oetf;
///
/// let encoded = oetf(0.214);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn oetf(l: f32) -> f32 {
    if l < OETF_LINEAR_CUTOFF {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Double-precision [`eotf`], used to build the tables.
#[inline]
pub fn eotf_f64(v: f64) -> f64 {
    if v < EOTF_LINEAR_CUTOFF as f64 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Double-precision [`oetf`], used to build and validate the tables.
#[inline]
pub fn oetf_f64(l: f64) -> f64 {
    if l < OETF_LINEAR_CUTOFF as f64 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Table-driven sRGB OETF.
///
/// Looks up bin `floor(value * 256)` of the forward table and evaluates its
/// line. Inputs below the first bin give `0`, inputs at or above `1` give `1`,
/// NaN gives `0`.
///
/// # Example
///
/// ```rust
/// use texel_transfer::srgb::{oetf, oetf_fast};
///
/// assert!((oetf_fast(0.5) - oetf(0.5)).abs() < 3e-4);
/// assert_eq!(oetf_fast(-0.25), 0.0);
/// assert_eq!(oetf_fast(4.0), 1.0);
/// ```
#[inline]
pub fn oetf_fast(value: f32) -> f32 {
    let scaled = (value * TABLE_SIZE as f32).floor();
    if !(scaled >= 0.0) {
        return 0.0;
    }
    if scaled >= TABLE_SIZE as f32 {
        return 1.0;
    }
    forward_table()[scaled as usize].eval(value)
}

/// Quantizes linear light to an 8-bit sRGB code value.
///
/// Applies [`oetf_fast`], scales to `[0, 255]`, rounds to nearest and clamps.
/// Negative inputs map to `0`, inputs above `1` to `255`.
#[inline]
pub fn encode_u8(value: f32) -> u8 {
    clamp(255.0 * oetf_fast(value) + 0.5, 0.0, 255.0) as u8
}

/// Decodes an 8-bit sRGB code value to linear light via the inverse table.
#[inline]
pub fn decode_u8(value: u8) -> f32 {
    inverse_table()[value as usize]
}

/// Quantizes linear light to the code value whose decoded linear value is
/// nearest to `value`.
///
/// Slower than [`encode_u8`] but free of approximation error: the byte is
/// located by bisecting the inverse table.
pub fn encode_u8_nearest(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let table = inverse_table();
    let i = find_interval(table.len(), |i| table[i] <= value);
    if value - table[i] <= table[i + 1] - value {
        i as u8
    } else {
        (i + 1) as u8
    }
}

/// Applies sRGB EOTF to an RGB triplet.
#[inline]
pub fn eotf_rgb(rgb: [f32; 3]) -> [f32; 3] {
    [eotf(rgb[0]), eotf(rgb[1]), eotf(rgb[2])]
}

/// Applies sRGB OETF to an RGB triplet.
#[inline]
pub fn oetf_rgb(rgb: [f32; 3]) -> [f32; 3] {
    [oetf(rgb[0]), oetf(rgb[1]), oetf(rgb[2])]
}

/// Quantizes a linear RGB triplet with [`encode_u8`].
#[inline]
pub fn encode_u8_rgb(rgb: [f32; 3]) -> [u8; 3] {
    [encode_u8(rgb[0]), encode_u8(rgb[1]), encode_u8(rgb[2])]
}

/// Decodes an 8-bit sRGB triplet with [`decode_u8`].
#[inline]
pub fn decode_u8_rgb(rgb: [u8; 3]) -> [f32; 3] {
    [decode_u8(rgb[0]), decode_u8(rgb[1]), decode_u8(rgb[2])]
}
