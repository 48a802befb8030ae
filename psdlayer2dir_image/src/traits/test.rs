use image::{Rgba, RgbaImage};

pub trait RgbaImageTraitTest {
	fn new_test_gradient() -> RgbaImage;
	fn new_test_corners() -> RgbaImage;
	fn new_solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage;
}

impl RgbaImageTraitTest for RgbaImage {
	/// 256x256 image with a different color at every pixel.
	fn new_test_gradient() -> RgbaImage {
		RgbaImage::from_fn(256, 256, |x, y| {
			Rgba([x as u8, (255 - x) as u8, y as u8, (255 - y) as u8])
		})
	}

	/// 3x2 image whose red channel is 1, 2, 3, 4 at the top-left, top-right, bottom-left and
	/// bottom-right corners.
	fn new_test_corners() -> RgbaImage {
		RgbaImage::from_fn(3, 2, |x, y| {
			let red = match (x, y) {
				(0, 0) => 1,
				(2, 0) => 2,
				(0, 1) => 3,
				(2, 1) => 4,
				_ => 0,
			};
			Rgba([red, 0, 0, 255])
		})
	}

	fn new_solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
		RgbaImage::from_pixel(width, height, Rgba(color))
	}
}
