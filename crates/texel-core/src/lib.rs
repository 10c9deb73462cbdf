//! # texel-core
//!
//! Image value store for the texel rendering pipeline.
//!
//! - [`Image`] - 2-D grid of samples in a fixed [`PixelFormat`]
//! - [`PixelBuffer`] - tagged sample storage (`u8`, `f16`, `f32`)
//! - [`RgbSpectrum`] - spectral sample exchanged with the store
//! - [`Error`] - store errors
//!
//! ## Fidelity contract
//!
//! The store decides which values leave it for a codec and which come back:
//!
//! | Format | Stored | Read back |
//! |--------|--------|-----------|
//! | `*32` | linear `f32`, unclamped | bit-exact |
//! | `*Half` | linear `f16`, unclamped | bit-exact through `f16` |
//! | `*8` | `linear_to_srgb8(v)` | inverse table, negatives as `0` |
//!
//! ## Crate Structure
//!
//! ```text
//! texel-math -> texel-transfer -> texel-core (this crate) -> texel-io
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod image;
pub mod spectrum;

pub use error::*;
pub use format::*;
pub use image::*;
pub use spectrum::*;
