//! # psdlayer2dir
//!
//! Exports every layer of a Photoshop file as a PNG image into a directory tree that mirrors
//! the layer groups.
//!
//! ```text
//! character.psd                 character/
//! ├── *body                     ├── body/
//! │   ├── base                  │   ├── base.png
//! │   └── arm:flipx             │   └── arm.png
//! └── background                └── background.png
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use psdlayer2dir::{convert_file, core::ExportConfig};
//! use std::path::Path;
//!
//! let report = convert_file(Path::new("character.psd"), &ExportConfig::new("character")).unwrap();
//! println!("{} layers exported", report.files.len());
//! ```

mod convert;
#[cfg(feature = "cli")]
pub mod logging;

pub use convert::*;

pub use psdlayer2dir_core as core;
pub use psdlayer2dir_derive as derive;
pub use psdlayer2dir_document as document;
pub use psdlayer2dir_image as image;
