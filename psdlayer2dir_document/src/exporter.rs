//! Writes every leaf of a [`LayerDocument`] into a directory tree.
//!
//! ## Directory structure
//! ```text
//! <output_dir>/<group>/<group>/<leaf>.png
//! ```
//! Every segment is the sanitized layer name, so a document with the root group `A`
//! containing the leaf `B` and the root leaf `C` produces `A/B.png` and `C.png`.
//!
//! ## Phases
//! 1. The output directory must not exist.
//! 2. Planning walks the tree (making every layer visible), derives each output path, applies
//!    the duplicate policy and checks that the path stays inside the output directory.
//!    Any failure here aborts the run before a single file is written.
//! 3. Writing composites each leaf, flips it and saves it as PNG, creating directories as
//!    needed. Unless `dry_run` is set.

use crate::{LayerCompositor, LayerDocument};
use anyhow::{Context, Result};
use psdlayer2dir_core::{
	ExportConfig, ExportPath, FlipFlags, IMAGE_EXTENSION, LayerNode, LeafLayer, PathRegistry, PathSegmentChain, walk,
};
use psdlayer2dir_derive::context;
use psdlayer2dir_image::{RgbaImageTraitOperation, Viewport, format::png};
use std::{fs, path::PathBuf};

/// One leaf together with everything needed to write it.
#[derive(Debug)]
pub struct PlannedExport<'a, R> {
	pub leaf: &'a LeafLayer<R>,
	pub chain: PathSegmentChain,
	pub path: ExportPath,
	pub absolute_path: PathBuf,
	pub flip: FlipFlags,
}

/// Files written (or, for a dry run, planned) by [`export_document`], in walk order.
#[derive(Debug, Default, PartialEq)]
pub struct ExportReport {
	pub files: Vec<PathBuf>,
}

/// Walks the tree and derives the output of every leaf without touching the filesystem.
#[context(move, "Failed to plan the export into {:?}", config.output_dir())]
pub fn plan_exports<'a, R>(layers: &'a mut [LayerNode<R>], config: &ExportConfig) -> Result<Vec<PlannedExport<'a, R>>> {
	let mut registry = PathRegistry::new(config.duplicates);
	let mut plans = Vec::new();

	for record in walk(layers) {
		let label = record.chain.to_string();
		let path = ExportPath::from_chain(&record.chain, IMAGE_EXTENSION)?;
		let path = registry.claim(path, &label)?;
		let absolute_path = path.resolve(config.output_dir())?;
		let flip = config.flip.flags_for(&record.chain);

		plans.push(PlannedExport {
			leaf: record.leaf,
			chain: record.chain,
			path,
			absolute_path,
			flip,
		});
	}

	Ok(plans)
}

/// Exports every leaf of `document` as a PNG file below `config.output_dir`.
pub fn export_document<C: LayerCompositor>(document: &mut LayerDocument<C>, config: &ExportConfig) -> Result<ExportReport> {
	config.ensure_output_dir_absent()?;

	log::info!("{} layers found", document.count_leaves());

	let viewport = document.viewport;
	let plans = plan_exports(&mut document.layers, config)?;

	if !config.dry_run {
		fs::create_dir_all(config.output_dir())
			.with_context(|| format!("Failed to create output directory {:?}", config.output_dir()))?;
	}

	let mut report = ExportReport::default();
	for plan in plans {
		log::info!("Saving layer \"{}\" -> {}", plan.chain, plan.path);
		if plan.flip != FlipFlags::NONE {
			log::debug!("flipping layer \"{}\": x={}, y={}", plan.chain, plan.flip.x, plan.flip.y);
		}

		if !config.dry_run {
			write_leaf(&document.compositor, &plan, viewport)?;
		}
		report.files.push(plan.absolute_path);
	}

	Ok(report)
}

#[context("Failed to export layer \"{}\" to {:?}", plan.chain, plan.absolute_path)]
fn write_leaf<C: LayerCompositor>(
	compositor: &C,
	plan: &PlannedExport<'_, C::Raster>,
	viewport: Viewport,
) -> Result<()> {
	if let Some(parent) = plan.absolute_path.parent() {
		fs::create_dir_all(parent)?;
	}

	let image = compositor.composite(plan.leaf, viewport)?.into_flipped(plan.flip);
	png::save(&image, &plan.absolute_path)
}
