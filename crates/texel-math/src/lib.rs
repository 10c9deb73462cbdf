//! # texel-math
//!
//! Scalar math primitives shared by the texel crates.
//!
//! This crate is the leaf of the workspace and has no dependencies:
//!
//! - [`bits`] - Float/bit-pattern reinterpretation and ULP stepping
//! - [`interp`] - Clamping and linear interpolation
//! - [`safe`] - Floored modulo and domain-tolerant `asin`/`acos`/`sqrt`
//! - [`interval`] - Monotonic binary search over tabulated data
//! - [`special`] - Integer powers, quadratic roots, `erf`, bit-twiddling helpers
//! - [`consts`] - Shared numeric constants
//!
//! # Usage
//!
//! ```rust
//! use texel_math::{clamp, find_interval, next_float_down, next_float_up};
//!
//! let v = 0.5f32;
//! assert!(next_float_up(v) > v);
//! assert_eq!(next_float_down(next_float_up(v)), v);
//!
//! let knots = [0.0f32, 1.0, 2.0, 4.0];
//! let i = find_interval(knots.len(), |i| knots[i] <= 3.0);
//! assert_eq!(i, 2);
//!
//! assert_eq!(clamp(11, 0, 10), 10);
//! ```
//!
//! # Used By
//!
//! - `texel-transfer` - table construction and lookup
//! - `texel-core` - image channel access and filtering

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bits;
pub mod consts;
pub mod interp;
pub mod interval;
pub mod safe;
pub mod special;

pub use bits::*;
pub use consts::*;
pub use interp::*;
pub use interval::*;
pub use safe::*;
pub use special::*;
