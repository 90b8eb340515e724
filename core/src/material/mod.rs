//! Material slot classification.
//!
//! Texture files are tagged with a [`TextureMapKind`] once, at discovery
//! time, and the rest of the pipeline matches on that tag instead of
//! re-inspecting file names.
//!
//! - [`TextureMapKind`] - Which material map a file provides
//! - [`MaterialSlots`] - Texture indices assigned to the output material

mod types;

pub use types::{MaterialSlots, TextureMapKind};
