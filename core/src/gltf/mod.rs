//! glTF 2.0 extraction and binary container export.
//!
//! Reads the single primitive of a source `.glb` into typed arrays, packs it
//! into a fresh buffer together with PNG-encoded textures, and writes the
//! result back out as a self-contained `.glb`.
//!
//! # Buffer layout
//!
//! The output has exactly one buffer. Geometry comes first in the fixed
//! order positions, indices, normals, texcoords, each region starting where
//! the previous one ended. Embedded images follow, appended in the order they
//! are embedded. Regions are never moved once written.
//!
//! # Example
//!
//! ```ignore
//! use glbpack_core::gltf::{AssetGraph, lay_out_primitive, load_primitive};
//!
//! let source = std::fs::read("Cube.glb").unwrap();
//! let primitive = load_primitive(&source).unwrap();
//!
//! let mut graph = AssetGraph::new();
//! lay_out_primitive(&mut graph, primitive).unwrap();
//! let glb = graph.to_glb().unwrap();
//! std::fs::write("out.glb", &glb).unwrap();
//! ```

mod embed;
mod error;
mod exporter;
mod extract;
mod graph;
mod layout;
#[cfg(test)]
mod tests;
mod verify;

pub use embed::PNG_MIME_TYPE;
pub use error::GltfError;
pub use exporter::{GLB_MAGIC, GLB_VERSION, write_glb};
pub use graph::{
    AccessorDesc, AssetGraph, AssetSummary, BufferBuilder, BufferRegion, BufferUsage,
    ComponentType, ElementType, EmbeddedImage, PrimitiveBinding,
};
pub use layout::lay_out_primitive;
pub use verify::{summarize_glb, verify_glb};

use crate::mesh::PrimitiveData;

/// Load the single primitive of a binary glTF container.
///
/// The document must hold exactly one mesh with exactly one primitive whose
/// buffers live in the container's binary chunk. Absent `NORMAL` or
/// `TEXCOORD_0` attributes come back as empty arrays; an absent index
/// accessor comes back as `None`.
pub fn load_primitive(data: &[u8]) -> Result<PrimitiveData, GltfError> {
    extract::load_primitive(data)
}
