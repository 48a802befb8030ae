//! Extension traits for [`image::RgbaImage`].
//!
//! - [`RgbaImageTraitOperation`]: viewport cropping, flipping and transparency checks.
//! - [`RgbaImageTraitTest`]: deterministic images for tests.

mod operation;
#[cfg(any(test, feature = "test"))]
mod test;

pub use operation::*;
#[cfg(any(test, feature = "test"))]
pub use test::*;
