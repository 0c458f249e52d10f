//! Pixel interpolation methods for image resampling.
//!
//! These kernels are used when reverse-mapping destination pixels to
//! non-integer source coordinates during a warp.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: fastest, uses the nearest pixel value (no interpolation)
//! - **Bilinear**: smooth linear interpolation between adjacent pixels

mod bilinear;
mod nearest;

pub(crate) mod interpolate;

pub use interpolate::{interpolate_pixel, InterpolationMode};
