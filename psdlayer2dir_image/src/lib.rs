//! Raster helpers used when exporting layers.
//!
//! The document backend hands over every composited leaf as an [`RgbaImage`]. This crate
//! crops it to a [`Viewport`], applies [`FlipFlags`](psdlayer2dir_core::FlipFlags) and encodes
//! it as PNG.

pub mod format;
mod traits;
mod viewport;

pub use image::{Rgba, RgbaImage};
pub use traits::*;
pub use viewport::*;
