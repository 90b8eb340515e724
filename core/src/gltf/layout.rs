//! Packed geometry layout.
//!
//! Geometry is written to the shared buffer in a fixed order: positions,
//! indices, normals, texcoords. Each region starts exactly where the
//! previous one ended; no alignment padding is inserted.

use crate::mesh::{AttributeData, AttributeSemantic, IndexData, PrimitiveData};

use super::error::GltfError;
use super::graph::{
    AccessorDesc, AssetGraph, BufferUsage, ComponentType, ElementType, PrimitiveBinding,
};

/// Lay out a primitive's streams in the asset buffer and register one region
/// and one accessor per present stream.
///
/// Empty positions are a fatal error and leave the graph untouched. Absent
/// normals, texcoords or indices produce no region and no accessor.
pub fn lay_out_primitive(
    graph: &mut AssetGraph,
    data: PrimitiveData,
) -> Result<PrimitiveBinding, GltfError> {
    if data.positions.is_empty() {
        return Err(GltfError::MissingPositions);
    }
    check_arity(&data.positions, AttributeSemantic::Position)?;
    check_arity(&data.normals, AttributeSemantic::Normal)?;
    check_arity(&data.tex_coords, AttributeSemantic::TexCoord0)?;

    let vertex_count = data.vertex_count();
    let position = push_attribute(graph, &data.positions, AttributeSemantic::Position)?
        .ok_or(GltfError::MissingPositions)?;
    let indices = match &data.indices {
        Some(indices) => push_indices(graph, indices),
        None => None,
    };
    let normal = push_attribute(graph, &data.normals, AttributeSemantic::Normal)?;
    let tex_coord = push_attribute(graph, &data.tex_coords, AttributeSemantic::TexCoord0)?;

    log::debug!(
        "Packed geometry: {} bytes in {} regions",
        graph.buffer().len(),
        graph.regions().len()
    );

    let binding = PrimitiveBinding {
        position,
        indices,
        normal,
        tex_coord,
    };
    graph.primitive = Some(binding);
    graph.vertex_count = vertex_count as u64;
    Ok(binding)
}

fn check_arity(data: &AttributeData, semantic: AttributeSemantic) -> Result<(), GltfError> {
    let components = semantic.components();
    if data.is_empty() {
        return Ok(());
    }
    if data.components != components || data.values.len() % components != 0 {
        return Err(GltfError::AccessorError(format!(
            "{} data has {} values in groups of {}, expected groups of {components}",
            semantic.gltf_name(),
            data.values.len(),
            data.components
        )));
    }
    Ok(())
}

/// Append a float attribute and its accessor; `None` if the attribute is empty.
fn push_attribute(
    graph: &mut AssetGraph,
    data: &AttributeData,
    semantic: AttributeSemantic,
) -> Result<Option<u32>, GltfError> {
    if data.is_empty() {
        return Ok(None);
    }

    let components = semantic.components();
    let element_type = ElementType::from_components(components).ok_or_else(|| {
        GltfError::AccessorError(format!("no element type with {components} components"))
    })?;

    let (min, max) = match (&data.min, &data.max) {
        (Some(min), Some(max)) => (Some(min.clone()), Some(max.clone())),
        // Position bounds are mandatory in the output format.
        _ if semantic == AttributeSemantic::Position => match data.compute_bounds() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        },
        _ => (None, None),
    };

    let region = graph.push_region(&data.to_le_bytes(), BufferUsage::VertexData);
    let accessor = graph.push_accessor(AccessorDesc {
        region,
        byte_offset: 0,
        component_type: ComponentType::F32,
        element_type,
        count: (data.values.len() / components) as u64,
        min,
        max,
    });
    Ok(Some(accessor))
}

/// Append the index stream and its accessor; `None` if there are no indices.
fn push_indices(graph: &mut AssetGraph, indices: &IndexData) -> Option<u32> {
    if indices.is_empty() {
        return None;
    }

    let region = graph.push_region(&indices.to_le_bytes(), BufferUsage::IndexData);
    Some(graph.push_accessor(AccessorDesc {
        region,
        byte_offset: 0,
        component_type: indices.format().into(),
        element_type: ElementType::Scalar,
        count: indices.count() as u64,
        min: None,
        max: None,
    }))
}
