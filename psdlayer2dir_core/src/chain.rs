use std::fmt;

/// Raw layer names from a root node down to and including one node.
///
/// Every chain is owned; extending a chain for a child produces a new value, so the chains of
/// two leaves never alias.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathSegmentChain {
	segments: Vec<String>,
}

impl PathSegmentChain {
	pub fn root(name: &str) -> Self {
		PathSegmentChain {
			segments: vec![name.to_string()],
		}
	}

	pub fn from_segments<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		PathSegmentChain {
			segments: segments.into_iter().map(Into::into).collect(),
		}
	}

	/// Returns a new chain with `name` appended.
	pub fn child(&self, name: &str) -> Self {
		let mut segments = Vec::with_capacity(self.segments.len() + 1);
		segments.extend(self.segments.iter().cloned());
		segments.push(name.to_string());
		PathSegmentChain { segments }
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// The raw name of the node the chain ends at.
	pub fn last(&self) -> Option<&str> {
		self.segments.last().map(String::as_str)
	}
}

/// Slash-joined raw names, as used in log messages.
impl fmt::Display for PathSegmentChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.segments.join("/"))
	}
}
