//! CPU-side texture types.
//!
//! Provides [`CpuTexture`] for holding raw 8-bit pixel data decoded from
//! image files, and [`merge_roughness_metalness`] for packing two grayscale
//! maps into one metallic-roughness texture.

mod merge;
mod types;

pub use merge::merge_roughness_metalness;
pub use types::{CpuTexture, TextureError};
