use super::tree::{FlatGroup, FlatLayer};
use psdlayer2dir_image::Viewport;
use std::{collections::HashMap, fmt};

/// Rectangle of a layer in canvas pixels. `right` and `bottom` are exclusive and any side may
/// lie outside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerBounds {
	pub left: i32,
	pub top: i32,
	pub right: i32,
	pub bottom: i32,
}

/// Where a layer lies relative to the canvas, as far as the decoder's renderer is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
	/// The decoder places every canvas pixel of the layer correctly.
	Renderable,
	/// Not a single pixel of the layer is on the canvas.
	OffCanvas,
	/// The decoder would misplace pixels or fail on this layer.
	Unsupported,
}

impl LayerBounds {
	pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
		LayerBounds {
			left,
			top,
			right,
			bottom,
		}
	}

	pub fn union(&self, other: &LayerBounds) -> LayerBounds {
		LayerBounds {
			left: self.left.min(other.left),
			top: self.top.min(other.top),
			right: self.right.max(other.right),
			bottom: self.bottom.max(other.bottom),
		}
	}

	/// The part of the rectangle on a `width × height` canvas, or `None` if nothing is left.
	pub fn clip(&self, width: u32, height: u32) -> Option<Viewport> {
		let left = i64::from(self.left).max(0);
		let top = i64::from(self.top).max(0);
		let right = i64::from(self.right).min(i64::from(width));
		let bottom = i64::from(self.bottom).min(i64::from(height));
		if right <= left || bottom <= top {
			return None;
		}
		Some(Viewport::new(
			left as u32,
			top as u32,
			(right - left) as u32,
			(bottom - top) as u32,
		))
	}

	/// Classifies the layer for rendering onto a `width × height` canvas.
	///
	/// The decoder writes layer pixels into a canvas-sized buffer by linear index. Pixels left
	/// or right of the canvas wrap into neighbouring rows, and pixels below the canvas are only
	/// dropped for run-length encoded channels. Raw channels index past the buffer.
	pub fn placement(&self, width: u32, height: u32, run_length_encoded: bool) -> Placement {
		if self.clip(width, height).is_none() {
			return Placement::OffCanvas;
		}
		let within_columns = self.left >= 0 && i64::from(self.right) <= i64::from(width);
		let within_rows = i64::from(self.bottom) <= i64::from(height) || run_length_encoded;
		if within_columns && within_rows {
			Placement::Renderable
		} else {
			Placement::Unsupported
		}
	}
}

impl fmt::Display for LayerBounds {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{},{},{},{}]", self.left, self.top, self.right, self.bottom)
	}
}

/// The area every leaf is composited into: the bounding box of all layers that are visible
/// as authored (the layer and all of its groups), clipped to the canvas. Falls back to the
/// whole canvas when no such layer covers a canvas pixel.
pub fn document_viewport(groups: &[FlatGroup], layers: &[FlatLayer], width: u32, height: u32) -> Viewport {
	let groups_by_id: HashMap<u32, &FlatGroup> = groups.iter().map(|group| (group.id, group)).collect();

	let shown = |layer: &FlatLayer| {
		if !layer.visible {
			return false;
		}
		let mut parent_id = layer.parent_id;
		for _ in 0..=groups.len() {
			match parent_id.and_then(|id| groups_by_id.get(&id)) {
				Some(group) if !group.visible => return false,
				Some(group) => parent_id = group.parent_id,
				None => return true,
			}
		}
		true
	};

	layers
		.iter()
		.filter(|layer| shown(*layer))
		.map(|layer| layer.bounds)
		.reduce(|a, b| a.union(&b))
		.and_then(|bounds| bounds.clip(width, height))
		.unwrap_or_else(|| Viewport::full(width, height))
}
