//! CPU-side mesh attribute types.
//!
//! This module provides the typed data handed from the extractor to the
//! buffer layout builder:
//!
//! - [`AttributeData`] - Flat `f32` components with element arity and bounds
//! - [`IndexData`] - Index stream tagged with its component type
//! - [`PrimitiveData`] - All streams of one mesh primitive
//! - [`AttributeSemantic`] - Which vertex attribute a stream represents

mod data;

pub use data::{AttributeData, AttributeSemantic, IndexData, IndexFormat, PrimitiveData};
