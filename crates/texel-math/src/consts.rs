//! Numeric constants.

/// Largest finite `f32`.
pub const MAX_FLOAT: f32 = f32::MAX;

/// Positive infinity.
pub const INFINITY: f32 = f32::INFINITY;

/// Half the `f32` machine epsilon; the relative rounding error bound of a
/// single correctly-rounded operation.
pub const MACHINE_EPSILON: f32 = f32::EPSILON * 0.5;

/// Offset used to avoid self-intersection of shadow rays.
pub const SHADOW_EPSILON: f32 = 0.0001;

/// π
pub const PI: f32 = std::f32::consts::PI;
/// 1/π
pub const INV_PI: f32 = std::f32::consts::FRAC_1_PI;
/// 1/(2π)
pub const INV_2PI: f32 = 0.159_154_94;
/// 1/(4π)
pub const INV_4PI: f32 = 0.079_577_47;
/// π/2
pub const PI_OVER_2: f32 = std::f32::consts::FRAC_PI_2;
/// π/4
pub const PI_OVER_4: f32 = std::f32::consts::FRAC_PI_4;
/// √2
pub const SQRT_2: f32 = std::f32::consts::SQRT_2;
