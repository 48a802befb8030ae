//! Layer tree traversal and export path derivation.
//!
//! The crate knows nothing about file formats or pixels. It works on a tree of
//! [`LayerNode`]s built by a document backend and answers three questions for every leaf:
//! which raw names lead to it ([`walk`]), which file it is written to ([`ExportPath`]) and
//! which axes are flipped ([`FlipPolicy`]).
//!
//! ```
//! use psdlayer2dir_core::*;
//! use std::path::{Path, PathBuf};
//!
//! let mut layers = vec![
//!     LayerNode::group("A", false, vec![LayerNode::leaf("B", false, ())]),
//!     LayerNode::leaf("C:flipx", false, ()),
//! ];
//!
//! let paths: Vec<PathBuf> = walk(&mut layers)
//!     .map(|record| {
//!         let path = ExportPath::from_chain(&record.chain, IMAGE_EXTENSION).unwrap();
//!         path.resolve(Path::new("/out")).unwrap()
//!     })
//!     .collect();
//!
//! assert_eq!(paths, [PathBuf::from("/out/A/B.png"), PathBuf::from("/out/C.png")]);
//! assert!(layers.iter().all(|node| node.is_visible()));
//! ```

mod chain;
mod config;
mod duplicates;
mod export_path;
mod flip;
mod layer;
pub mod sanitize;
mod walker;

pub use chain::*;
pub use config::*;
pub use duplicates::*;
pub use export_path::*;
pub use flip::*;
pub use layer::*;
pub use walker::*;
