//! Mirror/flip decisions for exported leaves.
//!
//! The export engine never touches pixels itself. It only decides, per leaf, which axes the
//! document backend has to flip before the image is written.

use crate::{PathSegmentChain, sanitize::strip_flip_suffix};
use std::ops::BitOr;

/// Axes to flip. `x` mirrors horizontally, `y` flips vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlipFlags {
	pub x: bool,
	pub y: bool,
}

impl FlipFlags {
	pub const NONE: FlipFlags = FlipFlags { x: false, y: false };
	pub const X: FlipFlags = FlipFlags { x: true, y: false };
	pub const Y: FlipFlags = FlipFlags { x: false, y: true };
	pub const XY: FlipFlags = FlipFlags { x: true, y: true };

	pub fn new(x: bool, y: bool) -> Self {
		FlipFlags { x, y }
	}

	pub fn is_none(&self) -> bool {
		!self.x && !self.y
	}

	/// Reads the trailing `:flipx`, `:flipy` and `:flipxy` markers of one raw layer name.
	///
	/// Chained markers accumulate, so `arm:flipx:flipy` yields both axes. Matching is
	/// case-sensitive and only looks at the end of the name.
	pub fn from_name(raw: &str) -> Self {
		let mut flags = FlipFlags::NONE;
		let mut name = raw;
		while let Some(rest) = strip_flip_suffix(name) {
			flags = flags
				| match &name[rest.len()..] {
					":flipxy" => FlipFlags::XY,
					":flipx" => FlipFlags::X,
					_ => FlipFlags::Y,
				};
			name = rest;
		}
		flags
	}

	/// Combines the markers of every raw segment, from the root down to the leaf itself.
	pub fn from_chain(chain: &PathSegmentChain) -> Self {
		chain
			.segments()
			.iter()
			.fold(FlipFlags::NONE, |flags, segment| flags | FlipFlags::from_name(segment))
	}
}

impl BitOr for FlipFlags {
	type Output = FlipFlags;

	fn bitor(self, rhs: Self) -> Self::Output {
		FlipFlags {
			x: self.x || rhs.x,
			y: self.y || rhs.y,
		}
	}
}

/// How flip flags are chosen for each exported leaf.
///
/// The two policies are exclusive: either every leaf gets the same flags, or every leaf gets
/// the flags named by the markers of its own ancestor chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipPolicy {
	Global(FlipFlags),
	Markers,
}

impl FlipPolicy {
	pub fn flags_for(&self, chain: &PathSegmentChain) -> FlipFlags {
		match self {
			FlipPolicy::Global(flags) => *flags,
			FlipPolicy::Markers => FlipFlags::from_chain(chain),
		}
	}
}

impl Default for FlipPolicy {
	fn default() -> Self {
		FlipPolicy::Global(FlipFlags::NONE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("face", FlipFlags::NONE)]
	#[case("arm:flipx", FlipFlags::X)]
	#[case("arm:flipy", FlipFlags::Y)]
	#[case("arm:flipxy", FlipFlags::XY)]
	#[case("arm:flipx:flipy", FlipFlags::XY)]
	#[case("arm:flipx:flipx", FlipFlags::X)]
	#[case("arm:FLIPX", FlipFlags::NONE)]
	#[case("arm:flipx copy", FlipFlags::NONE)]
	#[case("*!arm:flipy", FlipFlags::Y)]
	fn reads_markers_from_name(#[case] raw: &str, #[case] expected: FlipFlags) {
		assert_eq!(FlipFlags::from_name(raw), expected);
	}

	#[test]
	fn markers_combine_along_the_chain() {
		let chain = PathSegmentChain::from_segments(["body:flipx", "arms", "left:flipy"]);
		assert_eq!(FlipFlags::from_chain(&chain), FlipFlags::XY);

		let chain = PathSegmentChain::from_segments(["body", "arms:flipx", "left"]);
		assert_eq!(FlipFlags::from_chain(&chain), FlipFlags::X);

		let chain = PathSegmentChain::from_segments(["body", "arms", "left"]);
		assert!(FlipFlags::from_chain(&chain).is_none());
	}

	#[test]
	fn policy_selects_source_of_flags() {
		let chain = PathSegmentChain::from_segments(["eyes:flipx", "open"]);
		assert_eq!(FlipPolicy::Global(FlipFlags::Y).flags_for(&chain), FlipFlags::Y);
		assert_eq!(FlipPolicy::Markers.flags_for(&chain), FlipFlags::X);
		assert_eq!(FlipPolicy::default().flags_for(&chain), FlipFlags::NONE);
	}
}
