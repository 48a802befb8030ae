//! Layered documents and the directory exporter.
//!
//! A [`LayerDocument`] couples the layer tree of a decoded file with the
//! [`LayerCompositor`] that can render its leaves. [`PsdReader`] builds one from a Photoshop
//! file; [`export_document`] writes every leaf of a document as a PNG file into a new
//! directory tree that mirrors the layer groups.
//!
//! # Quick start
//! ```no_run
//! use psdlayer2dir_core::ExportConfig;
//! use psdlayer2dir_document::{PsdReader, export_document};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut document = PsdReader::open_path(Path::new("character.psd"))?;
//!     let report = export_document(&mut document, &ExportConfig::new("character"))?;
//!     println!("{} files written", report.files.len());
//!     Ok(())
//! }
//! ```
//!
//! # Features
//! - `test`: in-memory [`MockCompositor`] documents for downstream tests.

mod document;
pub use document::*;

mod exporter;
pub use exporter::*;

#[cfg(any(test, feature = "test"))]
mod mock;
#[cfg(any(test, feature = "test"))]
pub use mock::*;

mod photoshop;
pub use photoshop::*;
