//! Turns a raw [`PathSegmentChain`] into a file path below the output directory.
//!
//! Every segment is sanitized, empty results are replaced by [`PLACEHOLDER_SEGMENT`], the
//! image extension is added to the last segment, and the joined path is checked to stay
//! strictly inside the output directory before anything is written.

use crate::{PathSegmentChain, sanitize::sanitize};
use anyhow::{Result, bail, ensure};
use psdlayer2dir_derive::context;
use std::{
	fmt,
	path::{Component, Path, PathBuf},
};

/// Used instead of a segment that sanitizes to the empty string.
pub const PLACEHOLDER_SEGMENT: &str = "_";

/// A sanitized relative output path: directories, file stem and extension.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExportPath {
	dirs: Vec<String>,
	stem: String,
	extension: String,
}

impl ExportPath {
	/// Sanitizes every raw segment of `chain` and appends `extension` to the last one.
	#[context("Failed to build export path for layer {chain:?}")]
	pub fn from_chain(chain: &PathSegmentChain, extension: &str) -> Result<ExportPath> {
		let segments = chain
			.segments()
			.iter()
			.map(|raw| {
				let safe = sanitize(raw);
				if safe.is_empty() {
					PLACEHOLDER_SEGMENT.to_string()
				} else {
					safe
				}
			})
			.collect();
		ExportPath::from_sanitized(segments, extension)
	}

	/// Builds a path from segments that are already sanitized. Nothing is rewritten here,
	/// so [`ExportPath::resolve`] is the only guard against hostile segments.
	pub fn from_sanitized(mut segments: Vec<String>, extension: &str) -> Result<ExportPath> {
		let Some(stem) = segments.pop() else {
			bail!("a layer path needs at least one segment");
		};
		Ok(ExportPath {
			dirs: segments,
			stem,
			extension: extension.to_string(),
		})
	}

	pub fn file_name(&self) -> String {
		format!("{}.{}", self.stem, self.extension)
	}

	/// The same path with `_{n}` appended to the file stem.
	pub fn with_counter(&self, n: usize) -> ExportPath {
		ExportPath {
			dirs: self.dirs.clone(),
			stem: format!("{}_{n}", self.stem),
			extension: self.extension.clone(),
		}
	}

	/// Joins the segments with the platform separator.
	pub fn relative_path(&self) -> PathBuf {
		let mut path: PathBuf = self.dirs.iter().collect();
		path.push(self.file_name());
		path
	}

	/// Resolves the path against `root` and rejects it unless `root` is a strict ancestor.
	pub fn resolve(&self, root: &Path) -> Result<PathBuf> {
		let path = root.join(self.relative_path());
		ensure_contained(root, &path)?;
		Ok(path)
	}
}

impl fmt::Display for ExportPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.relative_path().display())
	}
}

/// Fails unless `root` is a strict ancestor of `path` after lexical normalization.
///
/// Nothing is read from disk: the output tree does not exist yet when paths are checked.
pub fn ensure_contained(root: &Path, path: &Path) -> Result<()> {
	let root_normalized = normalize(root);
	let path_normalized = normalize(path);
	ensure!(
		path_normalized != root_normalized && path_normalized.starts_with(&root_normalized),
		"Unsafe layer name used. Unsafe destination: {path:?} is not inside {root:?}"
	);
	Ok(())
}

/// Resolves `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => match normalized.components().next_back() {
				Some(Component::Normal(_)) => {
					normalized.pop();
				}
				Some(Component::RootDir | Component::Prefix(_)) => {}
				_ => normalized.push(".."),
			},
			other => normalized.push(other),
		}
	}
	normalized
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn chain(segments: &[&str]) -> PathSegmentChain {
		PathSegmentChain::from_segments(segments.iter().copied())
	}

	#[rstest]
	#[case(&["A", "B"], "A/B.png")]
	#[case(&["C"], "C.png")]
	#[case(&["*body", "!eyes:flipx", "a/b:c"], "body/eyes/a_b_c.png")]
	#[case(&["v1.0", "x"], "v1_0/x.png")]
	#[case(&["*", "::flipx"], "_/_.png")]
	#[case(&[":flipxy"], "_.png")]
	fn builds_relative_paths(#[case] raw: &[&str], #[case] expected: &str) -> Result<()> {
		let path = ExportPath::from_chain(&chain(raw), "png")?;
		assert_eq!(path.relative_path(), PathBuf::from(expected));
		Ok(())
	}

	#[test]
	fn segment_order_is_preserved() -> Result<()> {
		let path = ExportPath::from_chain(&chain(&["3", "1", "2"]), "png")?;
		assert_eq!(path.to_string(), PathBuf::from("3/1/2.png").display().to_string());
		Ok(())
	}

	#[test]
	fn empty_chain_is_an_error() {
		let err = ExportPath::from_chain(&PathSegmentChain::default(), "png").unwrap_err();
		assert!(format!("{err:#}").contains("at least one segment"), "{err:#}");
	}

	#[test]
	fn resolves_inside_root() -> Result<()> {
		let path = ExportPath::from_chain(&chain(&["A", "B"]), "png")?;
		assert_eq!(path.resolve(Path::new("/out"))?, PathBuf::from("/out/A/B.png"));
		Ok(())
	}

	#[rstest]
	#[case::parent(&["..", "evil"])]
	#[case::double_parent(&["..", "..", "etc", "passwd"])]
	#[case::absolute(&["/etc", "passwd"])]
	#[case::back_to_root(&["a", "..", "..", "x"])]
	fn rejects_escaping_segments(#[case] segments: &[&str]) -> Result<()> {
		let segments = segments.iter().map(|s| s.to_string()).collect();
		let path = ExportPath::from_sanitized(segments, "png")?;
		let err = path.resolve(Path::new("/out")).unwrap_err();
		assert!(err.to_string().starts_with("Unsafe layer name used"), "{err}");
		Ok(())
	}

	#[test]
	fn sanitized_dot_dot_cannot_escape() -> Result<()> {
		let path = ExportPath::from_chain(&chain(&["..", ".."]), "png")?;
		assert_eq!(path.resolve(Path::new("/out"))?, PathBuf::from("/out/__/__.png"));
		Ok(())
	}

	#[rstest]
	#[case("/out", "/out/a.png", true)]
	#[case("/out", "/out/a/../b.png", true)]
	#[case("/out", "/out", false)]
	#[case("/out", "/out/.", false)]
	#[case("/out", "/out/a/..", false)]
	#[case("/out", "/outside/a.png", false)]
	#[case("/out", "/out/../out2/a.png", false)]
	#[case("out", "out/a.png", true)]
	#[case("./out", "out/a/b.png", true)]
	#[case("out", "out/../../a.png", false)]
	fn containment(#[case] root: &str, #[case] path: &str, #[case] ok: bool) {
		assert_eq!(ensure_contained(Path::new(root), Path::new(path)).is_ok(), ok);
	}

	#[test]
	fn counter_goes_before_the_extension() -> Result<()> {
		let path = ExportPath::from_chain(&chain(&["A", "B"]), "png")?;
		assert_eq!(path.with_counter(2).relative_path(), PathBuf::from("A/B_2.png"));
		assert_eq!(path.file_name(), "B.png");
		Ok(())
	}
}
