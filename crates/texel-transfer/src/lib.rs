//! # texel-transfer
//!
//! sRGB transfer functions for encoding linear light into display values
//! and back.
//!
//! # Terminology
//!
//! - **OETF** (Opto-Electronic Transfer Function): Linear -> Encoded
//! - **EOTF** (Electro-Optical Transfer Function): Encoded -> Linear
//!
//! # Variants
//!
//! | Function | Direction | Cost | Accuracy |
//! |----------|-----------|------|----------|
//! | [`srgb::oetf`] | linear -> sRGB | `powf` | reference |
//! | [`srgb::oetf_fast`] | linear -> sRGB | one table lookup + FMA | mean 7e-6, max 9e-4 |
//! | [`srgb::encode_u8`] | linear -> byte | as `oetf_fast` | quantized |
//! | [`srgb::eotf`] | sRGB -> linear | `powf` | reference |
//! | [`srgb::decode_u8`] | byte -> linear | one table lookup | exact |
//!
//! The image store encodes every 8-bit channel it writes, so the fast path is
//! the default there; the exact transforms stay available for consumers that
//! need reference values.
//!
//! # Usage
//!
//! ```rust
//! use texel_transfer::{linear_to_srgb8, srgb8_to_linear, srgb_to_linear};
//!
//! let byte = linear_to_srgb8(0.216);
//! assert_eq!(byte, 128);
//! assert!((srgb8_to_linear(byte) - srgb_to_linear(128.0 / 255.0)).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - `texel-math` - clamping and interval search
//!
//! # Used By
//!
//! - `texel-core` - 8-bit pixel storage
//! - `texel-io` - PNG/PFM value conversion

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lut;
pub mod srgb;

pub use lut::{forward_table, inverse_table, PiecewiseLinearSegment, TABLE_SIZE};
pub use srgb::{
    decode_u8 as srgb8_to_linear, encode_u8 as linear_to_srgb8, eotf as srgb_to_linear,
    oetf as linear_to_srgb_exact, oetf_fast as linear_to_srgb,
};
