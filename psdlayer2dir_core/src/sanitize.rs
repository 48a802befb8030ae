//! Rewrites a raw layer name into a segment that is safe to use as a file or directory name.
//!
//! Two stages run in order:
//! 1. [`strip_markers`] removes PSDTool control markers: a leading `*` (radio button), a
//!    leading `!` (forced display) and any chain of trailing `:flipx`, `:flipy`, `:flipxy`.
//! 2. [`replace_unsafe_chars`] replaces every character of [`UNSAFE_CHARS`] with `_`.

/// Characters that are replaced by `_` in the second stage.
pub const UNSAFE_CHARS: [char; 11] = ['<', '>', ':', '"', '/', '\\', '|', '!', '?', '*', '.'];

/// Flip marker suffixes. `:flipxy` comes first so it is never mistaken for `:flipx`.
pub(crate) const FLIP_SUFFIXES: [&str; 3] = [":flipxy", ":flipx", ":flipy"];

/// Sanitizes a single raw name segment. The result may be empty.
pub fn sanitize(raw: &str) -> String {
	replace_unsafe_chars(strip_markers(raw))
}

/// Removes the leading `*` and `!` markers and all trailing flip markers.
pub fn strip_markers(raw: &str) -> &str {
	let mut name = raw;
	if let Some(rest) = name.strip_prefix('*') {
		name = rest;
	}
	if let Some(rest) = name.strip_prefix('!') {
		name = rest;
	}
	while let Some(rest) = strip_flip_suffix(name) {
		name = rest;
	}
	name
}

/// Strips one trailing flip marker, returning `None` when the name carries none.
pub(crate) fn strip_flip_suffix(name: &str) -> Option<&str> {
	FLIP_SUFFIXES.iter().find_map(|suffix| name.strip_suffix(suffix))
}

pub fn replace_unsafe_chars(name: &str) -> String {
	name
		.chars()
		.map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
		.collect()
}
