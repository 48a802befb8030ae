use anyhow::Result;
use psdlayer2dir_core::ExportConfig;
use psdlayer2dir_derive::context;
use psdlayer2dir_document::{ExportReport, PsdReader, export_document};
use std::path::Path;

/// Reads the PSD at `psd_path` and exports its layers as configured.
///
/// The output directory is checked before the file is even opened, so a second run into the
/// same directory fails fast.
#[context("Failed to convert {psd_path:?}")]
pub fn convert_file(psd_path: &Path, config: &ExportConfig) -> Result<ExportReport> {
	config.ensure_output_dir_absent()?;

	log::info!("reading {}", psd_path.display());
	let mut document = PsdReader::open_path(psd_path)?;

	let report = export_document(&mut document, config)?;
	if config.dry_run {
		log::info!("dry run: {} files planned in {}", report.files.len(), config.output_dir().display());
	} else {
		log::info!("{} files written to {}", report.files.len(), config.output_dir().display());
	}
	Ok(report)
}
