use anyhow::{Result, bail};
use pretty_assertions::assert_eq;
use psdlayer2dir_derive::context;

#[context("Failed to open {name:?}")]
fn open(name: &str, fail: bool) -> Result<usize> {
	if fail {
		bail!("no such layer");
	}
	Ok(name.len())
}

#[context(move, "Failed to consume {}", "segments")]
fn consume(segments: Vec<String>) -> Result<String> {
	Ok(segments.join("/"))
}

#[test]
fn passes_ok_values_through() {
	assert_eq!(open("Layer 1", false).unwrap(), 7);
	assert_eq!(consume(vec!["A".into(), "B".into()]).unwrap(), "A/B");
}

#[test]
fn prepends_context_to_errors() {
	let err = open("Layer 1", true).unwrap_err();
	assert_eq!(err.to_string(), "Failed to open \"Layer 1\"");
	assert_eq!(err.root_cause().to_string(), "no such layer");
}
