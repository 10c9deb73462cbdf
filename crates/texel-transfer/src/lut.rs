//! Lookup tables backing the fast sRGB paths.
//!
//! Two process-wide, read-only tables, each built once on first use:
//!
//! - **Forward**: 256 [`PiecewiseLinearSegment`]s approximating the sRGB OETF
//!   on `[0, 1)`. Bin `i` covers `[i/256, (i+1)/256)`.
//! - **Inverse**: 256 exact linear values, entry `i` = `eotf(i / 255)`.
//!
//! # Forward table accuracy
//!
//! Each bin stores the minimax line for the OETF over that bin: the chord
//! slope, with the intercept shifted to balance the largest positive and
//! negative deviation. Fitting is done in `f64`; only the coefficients are
//! rounded to `f32`.
//!
//! | Bins | Mean abs error | Max abs error |
//! |------|----------------|---------------|
//! | 128  | ~3.3e-5 | ~3.7e-3 |
//! | 256  | ~6.8e-6 | ~8.8e-4 (bin 1) |
//! | 1024 | ~4.7e-7 | ~1.2e-4 |
//!
//! With 256 bins the error is dominated by the first three bins, where the
//! power segment of the curve bends hardest; from `3/256` upward the maximum
//! stays below `3e-4`.

use crate::srgb::{eotf_f64, oetf_f64};
use std::sync::OnceLock;

/// Number of entries in both tables.
pub const TABLE_SIZE: usize = 256;

/// Samples per bin used when fitting a forward segment.
const FIT_SAMPLES: usize = 64;

/// Affine approximation `base + value * slope` valid over one table bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiecewiseLinearSegment {
    /// Intercept.
    pub base: f32,
    /// Slope.
    pub slope: f32,
}

impl PiecewiseLinearSegment {
    /// Evaluates the segment at `value`.
    #[inline]
    pub fn eval(&self, value: f32) -> f32 {
        self.base + value * self.slope
    }
}

static FORWARD: OnceLock<[PiecewiseLinearSegment; TABLE_SIZE]> = OnceLock::new();
static INVERSE: OnceLock<[f32; TABLE_SIZE]> = OnceLock::new();

/// Returns the forward (linear -> sRGB) segment table.
#[inline]
pub fn forward_table() -> &'static [PiecewiseLinearSegment; TABLE_SIZE] {
    FORWARD.get_or_init(|| std::array::from_fn(fit_segment))
}

/// Returns the inverse (sRGB byte -> linear) table.
#[inline]
pub fn inverse_table() -> &'static [f32; TABLE_SIZE] {
    INVERSE.get_or_init(|| {
        std::array::from_fn(|i| eotf_f64(i as f64 / (TABLE_SIZE - 1) as f64) as f32)
    })
}

/// Fits the minimax line to the OETF over bin `i`.
fn fit_segment(i: usize) -> PiecewiseLinearSegment {
    let n = TABLE_SIZE as f64;
    let lo = i as f64 / n;
    let hi = (i + 1) as f64 / n;

    let slope = (oetf_f64(hi) - oetf_f64(lo)) / (hi - lo);
    let chord_base = oetf_f64(lo) - slope * lo;

    let mut min_dev = f64::INFINITY;
    let mut max_dev = f64::NEG_INFINITY;
    for k in 0..=FIT_SAMPLES {
        let x = lo + (hi - lo) * k as f64 / FIT_SAMPLES as f64;
        let dev = oetf_f64(x) - (chord_base + slope * x);
        min_dev = min_dev.min(dev);
        max_dev = max_dev.max(dev);
    }

    PiecewiseLinearSegment {
        base: (chord_base + 0.5 * (min_dev + max_dev)) as f32,
        slope: slope as f32,
    }
}

/// Absolute error of [`crate::srgb::oetf_fast`] against the exact OETF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats {
    /// Largest absolute error seen.
    pub max: f64,
    /// Mean absolute error.
    pub mean: f64,
    /// Input at which `max` occurred.
    pub worst_input: f64,
}

/// Measures the fast OETF on `samples + 1` evenly spaced inputs in `[lo, hi]`.
///
/// # Example
///
/// ```rust
/// use texel_transfer::lut::fast_error_stats;
///
/// let stats = fast_error_stats(0.0, 1.0, 10_000);
/// assert!(stats.mean < 1e-5);
/// ```
pub fn fast_error_stats(lo: f64, hi: f64, samples: usize) -> ErrorStats {
    let samples = samples.max(1);
    let mut max = 0.0f64;
    let mut sum = 0.0f64;
    let mut worst_input = lo;
    for k in 0..=samples {
        let x = lo + (hi - lo) * k as f64 / samples as f64;
        let err = (crate::srgb::oetf_fast(x as f32) as f64 - oetf_f64(x)).abs();
        sum += err;
        if err > max {
            max = err;
            worst_input = x;
        }
    }
    ErrorStats {
        max,
        mean: sum / (samples + 1) as f64,
        worst_input,
    }
}
