//! # glbpack core
//!
//! Assembles a single-mesh asset (geometry, material and textures) into one
//! self-contained binary glTF container.
//!
//! The pipeline is split into small stages that each own one concern:
//!
//! - [`gltf`] extracts typed vertex data from a source `.glb`, lays it out in
//!   a packed buffer, embeds encoded images and composes the output document.
//! - [`texture`] loads 8-bit images and packs roughness/metalness into one
//!   metallic-roughness texture.
//! - [`material`] classifies texture files into material slots.
//! - [`pack`] drives the whole run from an input folder to an output file.

pub mod gltf;
pub mod material;
pub mod mesh;
pub mod pack;
pub mod texture;

pub use pack::{PackError, PackOptions, PackReport, pack_asset};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the core library.
pub fn init() {
    log::debug!("glbpack core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
