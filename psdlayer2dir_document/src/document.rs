use anyhow::Result;
use psdlayer2dir_core::{LayerNode, LeafLayer, count_leaves};
use psdlayer2dir_image::{RgbaImage, Viewport};

/// Renders single leaves of a layer tree.
///
/// `Raster` is the per-leaf handle stored in [`LeafLayer::raster`]; only the compositor that
/// produced the tree can interpret it.
pub trait LayerCompositor {
	type Raster;

	/// Composites `leaf` into an image covering `viewport`.
	///
	/// A leaf whose `visible` flag is false renders fully transparent.
	fn composite(&self, leaf: &LeafLayer<Self::Raster>, viewport: Viewport) -> Result<RgbaImage>;
}

/// A decoded document: its layer tree, the compositor for its leaves and the area to render.
pub struct LayerDocument<C: LayerCompositor> {
	pub layers: Vec<LayerNode<C::Raster>>,
	pub compositor: C,
	pub viewport: Viewport,
}

impl<C: LayerCompositor> LayerDocument<C> {
	pub fn new(layers: Vec<LayerNode<C::Raster>>, compositor: C, viewport: Viewport) -> Self {
		LayerDocument {
			layers,
			compositor,
			viewport,
		}
	}

	pub fn count_leaves(&self) -> usize {
		count_leaves(&self.layers)
	}
}

impl<C> std::fmt::Debug for LayerDocument<C>
where
	C: LayerCompositor + std::fmt::Debug,
	C::Raster: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LayerDocument")
			.field("layers", &self.layers)
			.field("compositor", &self.compositor)
			.field("viewport", &self.viewport)
			.finish()
	}
}
