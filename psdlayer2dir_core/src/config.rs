use crate::{DuplicatePolicy, FlipPolicy};
use anyhow::{Result, ensure};
use std::path::{Path, PathBuf};

/// File extension of every exported leaf.
pub const IMAGE_EXTENSION: &str = "png";

/// Settings of one export run.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportConfig {
	/// Destination directory. It must not exist when the run starts.
	pub output_dir: PathBuf,
	pub flip: FlipPolicy,
	pub duplicates: DuplicatePolicy,
	/// Plan and log every export without writing files.
	pub dry_run: bool,
}

impl ExportConfig {
	pub fn new(output_dir: impl Into<PathBuf>) -> Self {
		ExportConfig {
			output_dir: output_dir.into(),
			flip: FlipPolicy::default(),
			duplicates: DuplicatePolicy::default(),
			dry_run: false,
		}
	}

	pub fn with_flip(mut self, flip: FlipPolicy) -> Self {
		self.flip = flip;
		self
	}

	pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
		self.duplicates = duplicates;
		self
	}

	pub fn with_dry_run(mut self, dry_run: bool) -> Self {
		self.dry_run = dry_run;
		self
	}

	pub fn output_dir(&self) -> &Path {
		&self.output_dir
	}

	/// The run never merges into an existing directory.
	pub fn ensure_output_dir_absent(&self) -> Result<()> {
		ensure!(
			!self.output_dir.exists(),
			"Already exists: {}",
			self.output_dir.display()
		);
		Ok(())
	}
}
