//! In-memory documents for tests.
//!
//! Every leaf of a mock document carries a solid RGBA color as its raster handle.
//! [`MockCompositor`] fills the whole viewport with that color, or leaves it transparent when
//! the leaf is hidden, and remembers every call.

use crate::{LayerCompositor, LayerDocument};
use anyhow::Result;
use psdlayer2dir_core::{LayerNode, LeafLayer};
use psdlayer2dir_image::{Rgba, RgbaImage, Viewport};
use std::cell::RefCell;

pub type MockColor = [u8; 4];

/// One call to [`MockCompositor::composite`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockComposite {
	pub name: String,
	pub visible: bool,
}

#[derive(Debug, Default)]
pub struct MockCompositor {
	calls: RefCell<Vec<MockComposite>>,
}

impl MockCompositor {
	pub fn calls(&self) -> Vec<MockComposite> {
		self.calls.borrow().clone()
	}
}

impl LayerCompositor for MockCompositor {
	type Raster = MockColor;

	fn composite(&self, leaf: &LeafLayer<MockColor>, viewport: Viewport) -> Result<RgbaImage> {
		self.calls.borrow_mut().push(MockComposite {
			name: leaf.name.clone(),
			visible: leaf.visible,
		});
		let color = if leaf.visible { leaf.raster } else { [0; 4] };
		Ok(RgbaImage::from_pixel(viewport.width, viewport.height, Rgba(color)))
	}
}

/// A `width × height` mock document with the given layer tree.
pub fn mock_document(width: u32, height: u32, layers: Vec<LayerNode<MockColor>>) -> LayerDocument<MockCompositor> {
	LayerDocument::new(layers, MockCompositor::default(), Viewport::full(width, height))
}
