//! Photoshop (PSD) documents.
//!
//! The `psd` crate exposes a PSD as two flat lists, layers and groups, linked by parent ids.
//! [`assemble_tree`] turns those lists into the nested [`LayerNode`](psdlayer2dir_core::LayerNode)
//! tree, and [`PsdCompositor`] renders single leaves.

mod bounds;
mod reader;
mod tree;

pub use bounds::*;
pub use reader::*;
pub use tree::*;
