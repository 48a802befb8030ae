//! Handling of leaves whose sanitized output paths collide.
//!
//! Sibling layers often share a name ("Layer 1"), and different raw names can sanitize to the
//! same segment (`a:b` and `a/b`). [`PathRegistry`] sees every output path of a run in walk
//! order and applies the configured [`DuplicatePolicy`].

use crate::ExportPath;
#[cfg(feature = "cli")]
use clap::ValueEnum;
use anyhow::{Result, bail};
use std::{collections::HashSet, fmt::Display, path::PathBuf};

/// What to do when two leaves map to the same output file.
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Append `_2`, `_3`, ... to the file stem of later leaves.
	#[default]
	Suffix,
	/// Write every leaf; the last one wins.
	Overwrite,
	/// Abort the run.
	Error,
}

impl DuplicatePolicy {
	pub fn as_str(&self) -> &str {
		match self {
			DuplicatePolicy::Suffix => "suffix",
			DuplicatePolicy::Overwrite => "overwrite",
			DuplicatePolicy::Error => "error",
		}
	}
}

impl Display for DuplicatePolicy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Remembers the output paths handed out during one run.
#[derive(Debug, Default)]
pub struct PathRegistry {
	policy: DuplicatePolicy,
	used: HashSet<PathBuf>,
}

impl PathRegistry {
	pub fn new(policy: DuplicatePolicy) -> Self {
		PathRegistry {
			policy,
			used: HashSet::new(),
		}
	}

	/// Registers `path` for the leaf described by `label` and returns the path to write to.
	pub fn claim(&mut self, path: ExportPath, label: &str) -> Result<ExportPath> {
		if self.used.insert(path.relative_path()) {
			return Ok(path);
		}

		match self.policy {
			DuplicatePolicy::Overwrite => {
				log::warn!("layer \"{label}\" overwrites {path}");
				Ok(path)
			}
			DuplicatePolicy::Error => {
				bail!("layer \"{label}\" maps to {path}, which is already used by another layer")
			}
			DuplicatePolicy::Suffix => {
				let mut n = 2;
				loop {
					let candidate = path.with_counter(n);
					if self.used.insert(candidate.relative_path()) {
						log::debug!("layer \"{label}\" renamed to {candidate} to avoid overwriting {path}");
						return Ok(candidate);
					}
					n += 1;
				}
			}
		}
	}
}
