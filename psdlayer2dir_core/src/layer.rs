//! The layer tree as seen by the export engine.
//!
//! A document is an ordered list of root [`LayerNode`]s. Every node is either a [`LayerGroup`]
//! holding further nodes or a [`LeafLayer`] holding a raster handle `R`. The handle is opaque
//! here; only the document backend that built the tree knows how to composite it.

/// A node of the layer tree.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerNode<R> {
	Group(LayerGroup<R>),
	Leaf(LeafLayer<R>),
}

/// A container node. Children are kept in document stacking order.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerGroup<R> {
	pub name: String,
	pub visible: bool,
	pub children: Vec<LayerNode<R>>,
}

/// A node without children that carries raster data.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafLayer<R> {
	pub name: String,
	pub visible: bool,
	pub raster: R,
}

impl<R> LayerNode<R> {
	pub fn group(name: impl Into<String>, visible: bool, children: Vec<LayerNode<R>>) -> Self {
		LayerNode::Group(LayerGroup {
			name: name.into(),
			visible,
			children,
		})
	}

	pub fn leaf(name: impl Into<String>, visible: bool, raster: R) -> Self {
		LayerNode::Leaf(LeafLayer {
			name: name.into(),
			visible,
			raster,
		})
	}

	/// The raw, unsanitized layer name.
	pub fn name(&self) -> &str {
		match self {
			LayerNode::Group(group) => &group.name,
			LayerNode::Leaf(leaf) => &leaf.name,
		}
	}

	pub fn is_visible(&self) -> bool {
		match self {
			LayerNode::Group(group) => group.visible,
			LayerNode::Leaf(leaf) => leaf.visible,
		}
	}

	pub fn set_visible(&mut self, visible: bool) {
		match self {
			LayerNode::Group(group) => group.visible = visible,
			LayerNode::Leaf(leaf) => leaf.visible = visible,
		}
	}

	pub fn is_group(&self) -> bool {
		matches!(self, LayerNode::Group(_))
	}
}

/// Counts the leaves reachable from `nodes`. Groups are not counted.
pub fn count_leaves<R>(nodes: &[LayerNode<R>]) -> usize {
	let mut count = 0;
	let mut stack: Vec<&LayerNode<R>> = nodes.iter().collect();
	while let Some(node) = stack.pop() {
		match node {
			LayerNode::Group(group) => stack.extend(group.children.iter()),
			LayerNode::Leaf(_) => count += 1,
		}
	}
	count
}
