//! Depth-first traversal of the layer tree.
//!
//! [`walk`] returns a lazy iterator of [`ExportRecord`]s, one per leaf, in pre-order with
//! siblings in stacking order. Every node the iterator enters, groups included, is made
//! visible so the backend renders it regardless of its authored visibility. The traversal uses
//! an explicit stack, so deeply nested groups do not grow the call stack.

use crate::{FlipFlags, LayerNode, LeafLayer, PathSegmentChain};

/// A leaf together with the raw names leading to it.
#[derive(Debug)]
pub struct ExportRecord<'a, R> {
	pub leaf: &'a LeafLayer<R>,
	pub chain: PathSegmentChain,
}

impl<R> ExportRecord<'_, R> {
	/// Flip flags named by markers anywhere on this leaf's chain.
	pub fn marker_flips(&self) -> FlipFlags {
		FlipFlags::from_chain(&self.chain)
	}
}

/// Lazy pre-order walker over a mutable layer tree.
pub struct LayerWalker<'a, R> {
	stack: Vec<(&'a mut LayerNode<R>, PathSegmentChain)>,
}

/// Walks `roots` and yields one [`ExportRecord`] per leaf.
pub fn walk<R>(roots: &mut [LayerNode<R>]) -> LayerWalker<'_, R> {
	let stack = roots
		.iter_mut()
		.rev()
		.map(|node| {
			let chain = PathSegmentChain::root(node.name());
			(node, chain)
		})
		.collect();
	LayerWalker { stack }
}

impl<'a, R> Iterator for LayerWalker<'a, R> {
	type Item = ExportRecord<'a, R>;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some((node, chain)) = self.stack.pop() {
			match node {
				LayerNode::Group(group) => {
					group.visible = true;
					log::trace!("entering group {chain}");
					for child in group.children.iter_mut().rev() {
						let child_chain = chain.child(child.name());
						self.stack.push((child, child_chain));
					}
				}
				LayerNode::Leaf(leaf) => {
					leaf.visible = true;
					return Some(ExportRecord { leaf, chain });
				}
			}
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn tree() -> Vec<LayerNode<u32>> {
		vec![
			LayerNode::group(
				"body",
				false,
				vec![
					LayerNode::leaf("base", false, 1),
					LayerNode::group(
						"*eyes",
						false,
						vec![LayerNode::leaf("open", false, 2), LayerNode::leaf("closed:flipx", false, 3)],
					),
					LayerNode::group("empty", false, vec![]),
				],
			),
			LayerNode::leaf("background", false, 4),
		]
	}

	fn collect(roots: &mut [LayerNode<u32>]) -> Vec<(u32, Vec<String>)> {
		walk(roots)
			.map(|record| (record.leaf.raster, record.chain.segments().to_vec()))
			.collect()
	}

	#[test]
	fn yields_leaves_in_pre_order() {
		let mut roots = tree();
		let records = collect(&mut roots);
		assert_eq!(
			records,
			vec![
				(1, vec!["body".to_string(), "base".to_string()]),
				(2, vec!["body".to_string(), "*eyes".to_string(), "open".to_string()]),
				(3, vec!["body".to_string(), "*eyes".to_string(), "closed:flipx".to_string()]),
				(4, vec!["background".to_string()]),
			]
		);
	}

	#[test]
	fn chain_length_is_depth() {
		let mut roots = tree();
		let depths: Vec<usize> = walk(&mut roots).map(|record| record.chain.len()).collect();
		assert_eq!(depths, vec![2, 3, 3, 1]);
	}

	#[test]
	fn every_leaf_once() {
		let mut roots = tree();
		let expected = crate::count_leaves(&roots);
		assert_eq!(walk(&mut roots).count(), expected);
	}

	#[test]
	fn forces_visibility_on_the_way_down() {
		fn all_visible(nodes: &[LayerNode<u32>]) -> bool {
			nodes.iter().all(|node| {
				node.is_visible()
					&& match node {
						LayerNode::Group(group) => all_visible(&group.children),
						LayerNode::Leaf(_) => true,
					}
			})
		}

		let mut roots = tree();
		assert!(!all_visible(&roots));
		for record in walk(&mut roots) {
			assert!(record.leaf.visible, "leaf {} was not made visible", record.chain);
		}
		assert!(all_visible(&roots));
	}

	#[test]
	fn visibility_is_set_lazily() {
		let mut roots = tree();
		{
			let mut walker = walk(&mut roots);
			let first = walker.next().expect("first leaf");
			assert_eq!(first.leaf.raster, 1);
		}
		assert!(roots[0].is_visible());
		assert!(!roots[1].is_visible());
	}

	#[test]
	fn empty_groups_and_empty_documents_yield_nothing() {
		let mut roots: Vec<LayerNode<u32>> = vec![LayerNode::group("a", false, vec![LayerNode::group("b", false, vec![])])];
		assert_eq!(walk(&mut roots).count(), 0);
		assert!(roots[0].is_visible());

		let mut nothing: Vec<LayerNode<u32>> = vec![];
		assert_eq!(walk(&mut nothing).count(), 0);
	}

	#[test]
	fn duplicate_names_are_kept() {
		let mut roots = vec![LayerNode::leaf("same", true, 1), LayerNode::leaf("same", true, 2)];
		let records = collect(&mut roots);
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].1, records[1].1);
	}

	#[test]
	fn record_exposes_marker_flips() {
		let mut roots = tree();
		let flips: Vec<FlipFlags> = walk(&mut roots).map(|record| record.marker_flips()).collect();
		assert_eq!(
			flips,
			vec![FlipFlags::NONE, FlipFlags::NONE, FlipFlags::X, FlipFlags::NONE]
		);
	}

	#[test]
	fn deep_nesting_keeps_full_chain() {
		let mut node = LayerNode::leaf("leaf", false, 0_u32);
		for depth in 0..1_000 {
			node = LayerNode::group(format!("g{depth}"), false, vec![node]);
		}
		let mut roots = vec![node];
		let records: Vec<usize> = walk(&mut roots).map(|record| record.chain.len()).collect();
		assert_eq!(records, vec![1_001]);
	}
}
