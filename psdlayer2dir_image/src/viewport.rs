use anyhow::{Result, ensure};
use std::fmt;

/// A pixel rectangle in document coordinates that a layer is composited into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
	pub left: u32,
	pub top: u32,
	pub width: u32,
	pub height: u32,
}

impl Viewport {
	pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
		Viewport {
			left,
			top,
			width,
			height,
		}
	}

	/// The whole canvas of a `width × height` document.
	pub fn full(width: u32, height: u32) -> Self {
		Viewport::new(0, 0, width, height)
	}

	pub fn right(&self) -> u64 {
		u64::from(self.left) + u64::from(self.width)
	}

	pub fn bottom(&self) -> u64 {
		u64::from(self.top) + u64::from(self.height)
	}

	pub fn is_full(&self, width: u32, height: u32) -> bool {
		*self == Viewport::full(width, height)
	}

	/// Fails when the viewport is empty or reaches outside a `width × height` canvas.
	pub fn ensure_within(&self, width: u32, height: u32) -> Result<()> {
		ensure!(self.width > 0 && self.height > 0, "viewport {self} is empty");
		ensure!(
			self.right() <= u64::from(width) && self.bottom() <= u64::from(height),
			"viewport {self} exceeds canvas {width}x{height}"
		);
		Ok(())
	}
}

impl fmt::Display for Viewport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{},{},{},{}]", self.left, self.top, self.right(), self.bottom())
	}
}
