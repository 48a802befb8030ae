use super::bounds::LayerBounds;
use anyhow::{Result, bail, ensure};
use psdlayer2dir_core::LayerNode;
use std::collections::HashMap;

/// Index of a leaf in the document's flat layer list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PsdLayerRef {
	pub index: usize,
}

/// A group as listed by the decoder.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatGroup {
	pub id: u32,
	pub name: String,
	pub visible: bool,
	pub parent_id: Option<u32>,
}

/// A pixel layer as listed by the decoder. Its position in the list is its stacking position.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatLayer {
	pub name: String,
	pub visible: bool,
	pub parent_id: Option<u32>,
	pub bounds: LayerBounds,
}

#[derive(Clone, Copy)]
enum Entry {
	Group(usize),
	Layer(usize),
}

/// Nests flat layers and groups into a tree.
///
/// Siblings keep the order of the flat layer list. A group is placed where its first
/// contained layer is; groups without any layers go after their siblings, in the order of
/// `groups`. Unknown parent ids, duplicate group ids and cyclic parents are rejected.
pub fn assemble_tree(groups: &[FlatGroup], layers: &[FlatLayer]) -> Result<Vec<LayerNode<PsdLayerRef>>> {
	let mut group_index: HashMap<u32, usize> = HashMap::with_capacity(groups.len());
	for (index, group) in groups.iter().enumerate() {
		ensure!(
			group_index.insert(group.id, index).is_none(),
			"group id {} is used by more than one group",
			group.id
		);
	}

	let lookup = |parent_id: Option<u32>, owner: &str| -> Result<Option<usize>> {
		match parent_id {
			None => Ok(None),
			Some(id) => match group_index.get(&id) {
				Some(index) => Ok(Some(*index)),
				None => bail!("{owner} refers to unknown group id {id}"),
			},
		}
	};

	// sort key of every group: the smallest layer index below it
	let mut first_layer: Vec<usize> = vec![usize::MAX; groups.len()];
	for (index, layer) in layers.iter().enumerate() {
		let mut parent = lookup(layer.parent_id, &format!("layer \"{}\"", layer.name))?;
		let mut steps = 0;
		while let Some(group) = parent {
			ensure!(steps < groups.len(), "groups above layer \"{}\" form a cycle", layer.name);
			first_layer[group] = first_layer[group].min(index);
			parent = lookup(groups[group].parent_id, &format!("group \"{}\"", groups[group].name))?;
			steps += 1;
		}
	}

	let mut children: HashMap<Option<usize>, Vec<(usize, usize, Entry)>> = HashMap::new();
	for (index, layer) in layers.iter().enumerate() {
		let parent = lookup(layer.parent_id, &format!("layer \"{}\"", layer.name))?;
		children.entry(parent).or_default().push((index, 0, Entry::Layer(index)));
	}
	for (index, group) in groups.iter().enumerate() {
		let parent = lookup(group.parent_id, &format!("group \"{}\"", group.name))?;
		ensure!(parent != Some(index), "group \"{}\" is its own parent", group.name);
		children
			.entry(parent)
			.or_default()
			.push((first_layer[index], 1 + index, Entry::Group(index)));
	}
	for entries in children.values_mut() {
		entries.sort_by_key(|(key, tie, _)| (*key, *tie));
	}

	let roots = build_level(None, &mut children, groups, layers, 0)?;
	ensure!(
		children.is_empty(),
		"{} layer groups are not reachable from the document root",
		children.len()
	);
	Ok(roots)
}

fn build_level(
	parent: Option<usize>,
	children: &mut HashMap<Option<usize>, Vec<(usize, usize, Entry)>>,
	groups: &[FlatGroup],
	layers: &[FlatLayer],
	depth: usize,
) -> Result<Vec<LayerNode<PsdLayerRef>>> {
	ensure!(depth <= groups.len(), "layer groups form a cycle");
	let Some(entries) = children.remove(&parent) else {
		return Ok(Vec::new());
	};

	let mut nodes = Vec::with_capacity(entries.len());
	for (_, _, entry) in entries {
		nodes.push(match entry {
			Entry::Layer(index) => {
				let layer = &layers[index];
				LayerNode::leaf(layer.name.clone(), layer.visible, PsdLayerRef { index })
			}
			Entry::Group(index) => {
				let group = &groups[index];
				let nested = build_level(Some(index), children, groups, layers, depth + 1)?;
				LayerNode::group(group.name.clone(), group.visible, nested)
			}
		});
	}
	Ok(nodes)
}

/// Renders the tree as `name#index` for leaves and `name[...]` for groups.
#[cfg(test)]
pub(crate) fn outline(nodes: &[LayerNode<PsdLayerRef>]) -> String {
	nodes
		.iter()
		.map(|node| match node {
			LayerNode::Leaf(leaf) => format!("{}#{}", leaf.name, leaf.raster.index),
			LayerNode::Group(group) => format!("{}[{}]", group.name, outline(&group.children)),
		})
		.collect::<Vec<_>>()
		.join(",")
}
