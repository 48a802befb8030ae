use anyhow::{Result, anyhow};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage, codecs::png, load_from_memory_with_format};
use psdlayer2dir_derive::context;
use std::{fs, path::Path};

/// Encodes an RGBA image as PNG with the best compression and adaptive filtering.
pub fn image2bytes(image: &RgbaImage) -> Result<Vec<u8>> {
	use png::{CompressionType, FilterType};

	let mut buffer: Vec<u8> = Vec::new();
	png::PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive).write_image(
		image.as_raw(),
		image.width(),
		image.height(),
		ExtendedColorType::Rgba8,
	)?;

	Ok(buffer)
}

pub fn bytes2image(bytes: &[u8]) -> Result<RgbaImage> {
	load_from_memory_with_format(bytes, ImageFormat::Png)
		.map(|image| image.to_rgba8())
		.map_err(|e| anyhow!("Failed to decode PNG image: {e}"))
}

/// Writes `image` as a PNG file. The parent directory must exist.
#[context("Failed to write PNG {path:?}")]
pub fn save(image: &RgbaImage, path: &Path) -> Result<()> {
	let bytes = image2bytes(image)?;
	fs::write(path, bytes)?;
	Ok(())
}

pub fn load(path: &Path) -> Result<RgbaImage> {
	bytes2image(&fs::read(path)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::RgbaImageTraitTest;
	use rstest::rstest;

	#[rstest]
	#[case::gradient(RgbaImage::new_test_gradient())]
	#[case::corners(RgbaImage::new_test_corners())]
	#[case::translucent(RgbaImage::new_solid(5, 3, [10, 20, 30, 40]))]
	fn encodes_losslessly(#[case] image: RgbaImage) -> Result<()> {
		let bytes = image2bytes(&image)?;
		assert_eq!(&bytes[1..4], b"PNG");
		assert_eq!(bytes2image(&bytes)?, image);
		Ok(())
	}

	#[test]
	fn rejects_non_png_bytes() {
		let err = bytes2image(b"not a png").unwrap_err();
		assert!(err.to_string().starts_with("Failed to decode PNG image"), "{err}");
	}

	#[test]
	fn saves_and_loads_files() -> Result<()> {
		let temp_dir = assert_fs::TempDir::new()?;
		let path = temp_dir.path().join("layer.png");
		let image = RgbaImage::new_solid(3, 2, [10, 20, 30, 255]);

		save(&image, &path)?;
		assert_eq!(load(&path)?, image);

		let err = save(&image, &temp_dir.path().join("missing/layer.png")).unwrap_err();
		assert!(err.to_string().starts_with("Failed to write PNG"), "{err}");
		Ok(())
	}
}
