use super::{
	bounds::{LayerBounds, Placement, document_viewport},
	tree::{FlatGroup, FlatLayer, PsdLayerRef, assemble_tree},
};
use crate::{LayerCompositor, LayerDocument};
use anyhow::{Result, anyhow, bail};
use psd::{Psd, PsdChannelCompression, PsdChannelKind, PsdLayer};
use psdlayer2dir_core::LeafLayer;
use psdlayer2dir_derive::context;
use psdlayer2dir_image::{RgbaImage, RgbaImageTraitOperation, Viewport};
use std::{fs, path::Path};

/// Renders leaves of a decoded PSD.
pub struct PsdCompositor {
	psd: Psd,
}

impl std::fmt::Debug for PsdCompositor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PsdCompositor")
			.field("width", &self.psd.width())
			.field("height", &self.psd.height())
			.field("layers", &self.psd.layers().len())
			.finish()
	}
}

impl LayerCompositor for PsdCompositor {
	type Raster = PsdLayerRef;

	fn composite(&self, leaf: &LeafLayer<PsdLayerRef>, viewport: Viewport) -> Result<RgbaImage> {
		if !leaf.visible {
			return Ok(RgbaImage::new_transparent(viewport.width, viewport.height));
		}

		let layer = self
			.psd
			.layers()
			.get(leaf.raster.index)
			.ok_or_else(|| anyhow!("layer \"{}\" has no pixel data at index {}", leaf.name, leaf.raster.index))?;

		let (width, height) = (self.psd.width(), self.psd.height());
		match layer_placement(layer, width, height) {
			Placement::Renderable => RgbaImage::from_rgba_bytes(width, height, layer.rgba())?.into_viewport(viewport),
			Placement::OffCanvas => Ok(RgbaImage::new_transparent(viewport.width, viewport.height)),
			Placement::Unsupported => bail!(
				"layer \"{}\" at {} does not fit the {width}x{height} canvas",
				leaf.name,
				layer_bounds(layer)
			),
		}
	}
}

/// Opens Photoshop files as [`LayerDocument`]s.
pub struct PsdReader;

impl PsdReader {
	#[context("Failed to open PSD file {path:?}")]
	pub fn open_path(path: &Path) -> Result<LayerDocument<PsdCompositor>> {
		let bytes = fs::read(path)?;
		PsdReader::from_bytes(&bytes)
	}

	/// Decodes a PSD and assembles its layer tree.
	///
	/// Layers the decoder cannot render are rejected here, before anything is exported.
	pub fn from_bytes(bytes: &[u8]) -> Result<LayerDocument<PsdCompositor>> {
		let psd = Psd::from_bytes(bytes).map_err(|e| anyhow!("Failed to decode PSD: {e}"))?;
		let (width, height) = (psd.width(), psd.height());

		// `groups()` is a map; the id list keeps the file order
		let groups = psd
			.group_ids_in_order()
			.iter()
			.map(|id| {
				let group = psd
					.groups()
					.get(id)
					.ok_or_else(|| anyhow!("group id {id} is listed but not defined"))?;
				Ok(FlatGroup {
					id: group.id(),
					name: group.name().to_string(),
					visible: group.visible(),
					parent_id: group.parent_id(),
				})
			})
			.collect::<Result<Vec<FlatGroup>>>()?;

		let mut layers: Vec<FlatLayer> = Vec::with_capacity(psd.layers().len());
		for layer in psd.layers() {
			let bounds = layer_bounds(layer);
			if layer.compression(PsdChannelKind::Red).is_err() {
				bail!("layer \"{}\" has no red channel", layer.name());
			}
			match layer_placement(layer, width, height) {
				Placement::Renderable => {}
				Placement::OffCanvas => log::debug!("layer \"{}\" at {bounds} is outside the canvas", layer.name()),
				Placement::Unsupported => bail!(
					"layer \"{}\" at {bounds} extends past the side of the {width}x{height} canvas, which is not supported",
					layer.name()
				),
			}
			layers.push(FlatLayer {
				name: layer.name().to_string(),
				visible: layer.visible(),
				parent_id: layer.parent_id(),
				bounds,
			});
		}

		let viewport = document_viewport(&groups, &layers, width, height);
		log::debug!(
			"decoded PSD of {width}x{height} pixels with {} layers in {} groups, viewport {viewport}",
			layers.len(),
			groups.len()
		);

		let tree = assemble_tree(&groups, &layers)?;
		Ok(LayerDocument::new(tree, PsdCompositor { psd }, viewport))
	}
}

/// Layer rectangle with exclusive right and bottom edges.
fn layer_bounds(layer: &PsdLayer) -> LayerBounds {
	LayerBounds::new(
		layer.layer_left(),
		layer.layer_top(),
		layer.layer_right().saturating_add(1),
		layer.layer_bottom().saturating_add(1),
	)
}

fn layer_placement(layer: &PsdLayer, width: u32, height: u32) -> Placement {
	let run_length_encoded = [
		PsdChannelKind::Red,
		PsdChannelKind::Green,
		PsdChannelKind::Blue,
		PsdChannelKind::TransparencyMask,
	]
	.into_iter()
	.filter_map(|kind| layer.compression(kind).ok())
	.all(|compression| compression == PsdChannelCompression::RleCompressed);
	layer_bounds(layer).placement(width, height, run_length_encoded)
}
