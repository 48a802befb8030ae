use crate::Viewport;
use anyhow::{Context, Result, anyhow};
use image::{
	RgbaImage,
	imageops::{crop_imm, flip_horizontal_in_place, flip_vertical_in_place},
};
use psdlayer2dir_core::FlipFlags;

pub trait RgbaImageTraitOperation: Sized {
	/// Builds an image from interleaved RGBA bytes, failing if the length does not match.
	fn from_rgba_bytes(width: u32, height: u32, data: Vec<u8>) -> Result<Self>;

	/// A fully transparent image.
	fn new_transparent(width: u32, height: u32) -> Self;

	/// Mirrors horizontally for `flags.x` and flips vertically for `flags.y`.
	fn into_flipped(self, flags: FlipFlags) -> Self;

	/// Returns the part of the image covered by `viewport`.
	///
	/// The full viewport is returned without copying.
	fn into_viewport(self, viewport: Viewport) -> Result<Self>;
}

impl RgbaImageTraitOperation for RgbaImage {
	fn from_rgba_bytes(width: u32, height: u32, data: Vec<u8>) -> Result<RgbaImage> {
		let length = data.len();
		RgbaImage::from_raw(width, height, data)
			.ok_or_else(|| anyhow!("{length} bytes are not a {width}x{height} RGBA image"))
	}

	fn new_transparent(width: u32, height: u32) -> RgbaImage {
		RgbaImage::new(width, height)
	}

	fn into_flipped(mut self, flags: FlipFlags) -> RgbaImage {
		if flags.x {
			flip_horizontal_in_place(&mut self);
		}
		if flags.y {
			flip_vertical_in_place(&mut self);
		}
		self
	}

	fn into_viewport(self, viewport: Viewport) -> Result<RgbaImage> {
		let (width, height) = self.dimensions();
		viewport
			.ensure_within(width, height)
			.with_context(|| format!("Failed to crop {width}x{height} image to viewport {viewport}"))?;
		if viewport.is_full(width, height) {
			return Ok(self);
		}
		Ok(crop_imm(&self, viewport.left, viewport.top, viewport.width, viewport.height).to_image())
	}
}
