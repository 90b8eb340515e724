//! Attribute extraction from a source glTF document.
//!
//! Reads typed vertex attributes and the index stream of a single primitive
//! by walking the accessor → buffer view → buffer chain. Reads honour the
//! buffer view's byte stride, so interleaved sources are handled.

use gltf_dep::accessor::{DataType, Dimensions};

use crate::mesh::{AttributeData, AttributeSemantic, IndexData, PrimitiveData};

use super::error::GltfError;

/// Parse a binary glTF container and extract its only primitive.
///
/// The source must contain exactly one mesh with exactly one primitive.
pub(crate) fn load_primitive(data: &[u8]) -> Result<PrimitiveData, GltfError> {
    let gltf_dep::Gltf { document, blob } = gltf_dep::Gltf::from_slice(data)?;
    let buffers = resolve_buffers(&document, blob)?;

    let mesh_count = document.meshes().count();
    if mesh_count != 1 {
        return Err(GltfError::UnsupportedLayout(format!(
            "expected exactly one mesh, found {mesh_count}"
        )));
    }
    let Some(mesh) = document.meshes().next() else {
        return Err(GltfError::UnsupportedLayout("document has no mesh".into()));
    };

    let primitive_count = mesh.primitives().count();
    if primitive_count != 1 {
        return Err(GltfError::UnsupportedLayout(format!(
            "expected exactly one primitive, found {primitive_count}"
        )));
    }
    let Some(primitive) = mesh.primitives().next() else {
        return Err(GltfError::UnsupportedLayout("mesh has no primitive".into()));
    };

    extract_primitive(&primitive, &buffers)
}

/// Extract positions, normals, texcoords and indices from a primitive.
pub(crate) fn extract_primitive(
    primitive: &gltf_dep::Primitive<'_>,
    buffers: &[Vec<u8>],
) -> Result<PrimitiveData, GltfError> {
    let positions = read_attribute(primitive, AttributeSemantic::Position, buffers)?;
    let normals = read_attribute(primitive, AttributeSemantic::Normal, buffers)?;
    let tex_coords = read_attribute(primitive, AttributeSemantic::TexCoord0, buffers)?;

    let indices = match primitive.indices() {
        Some(accessor) => Some(read_indices(&accessor, buffers)?),
        None => None,
    };

    log::debug!(
        "Extracted primitive: {} vertices, {} indices, normals={}, texcoords={}",
        positions.element_count(),
        indices.as_ref().map_or(0, IndexData::count),
        !normals.is_empty(),
        !tex_coords.is_empty(),
    );

    Ok(PrimitiveData {
        positions,
        indices,
        normals,
        tex_coords,
    })
}

fn gltf_semantic(semantic: AttributeSemantic) -> gltf_dep::Semantic {
    match semantic {
        AttributeSemantic::Position => gltf_dep::Semantic::Positions,
        AttributeSemantic::Normal => gltf_dep::Semantic::Normals,
        AttributeSemantic::TexCoord0 => gltf_dep::Semantic::TexCoords(0),
    }
}

/// Read one float vertex attribute.
///
/// A missing attribute yields an empty [`AttributeData`]. Bounds are taken
/// from the source accessor's `min`/`max` when both are present.
pub(crate) fn read_attribute(
    primitive: &gltf_dep::Primitive<'_>,
    semantic: AttributeSemantic,
    buffers: &[Vec<u8>],
) -> Result<AttributeData, GltfError> {
    let components = semantic.components();
    let Some(accessor) = primitive.get(&gltf_semantic(semantic)) else {
        return Ok(AttributeData::empty(components));
    };

    if accessor.data_type() != DataType::F32 {
        return Err(GltfError::AccessorError(format!(
            "{} accessor {} has component type {:?}, expected F32",
            semantic.gltf_name(),
            accessor.index(),
            accessor.data_type()
        )));
    }
    if accessor.dimensions().multiplicity() != components {
        return Err(GltfError::AccessorError(format!(
            "{} accessor {} has type {:?}, expected {components} components",
            semantic.gltf_name(),
            accessor.index(),
            accessor.dimensions()
        )));
    }

    let values = read_f32_accessor(&accessor, buffers)?;
    let mut data = AttributeData::new(values, components);

    if let (Some(min), Some(max)) = (
        json_bounds(accessor.min().as_ref(), components),
        json_bounds(accessor.max().as_ref(), components),
    ) {
        data = data.with_bounds(min, max);
    }

    Ok(data)
}

/// Read the index stream, preserving its component type.
///
/// `u8` indices are widened to `u16`; the count is always the accessor count.
pub(crate) fn read_indices(
    accessor: &gltf_dep::Accessor<'_>,
    buffers: &[Vec<u8>],
) -> Result<IndexData, GltfError> {
    if accessor.dimensions() != Dimensions::Scalar {
        return Err(GltfError::AccessorError(format!(
            "index accessor {} is {:?}, expected Scalar",
            accessor.index(),
            accessor.dimensions()
        )));
    }

    let (src_data, src_stride) = read_accessor_bytes(accessor, buffers)?;
    let count = accessor.count();

    match accessor.data_type() {
        DataType::U8 => {
            let indices = (0..count).map(|i| src_data[i * src_stride] as u16).collect();
            log::debug!("Widened {count} u8 indices to u16");
            Ok(IndexData::U16(indices))
        }
        DataType::U16 => {
            let indices = (0..count)
                .map(|i| {
                    let offset = i * src_stride;
                    u16::from_le_bytes([src_data[offset], src_data[offset + 1]])
                })
                .collect();
            Ok(IndexData::U16(indices))
        }
        DataType::U32 => {
            let indices = (0..count)
                .map(|i| {
                    let offset = i * src_stride;
                    u32::from_le_bytes([
                        src_data[offset],
                        src_data[offset + 1],
                        src_data[offset + 2],
                        src_data[offset + 3],
                    ])
                })
                .collect();
            Ok(IndexData::U32(indices))
        }
        other => Err(GltfError::AccessorError(format!(
            "unsupported index type: {other:?}"
        ))),
    }
}

/// Read accessor data as a byte slice starting at the first element,
/// together with the stride between elements.
///
/// Fails if any element would be read past the end of its buffer view.
fn read_accessor_bytes<'a>(
    accessor: &gltf_dep::Accessor<'_>,
    buffers: &'a [Vec<u8>],
) -> Result<(&'a [u8], usize), GltfError> {
    let view = accessor.view().ok_or_else(|| {
        GltfError::AccessorError(format!(
            "accessor {} has no buffer view (sparse accessors not supported)",
            accessor.index()
        ))
    })?;
    let buffer_index = view.buffer().index();
    let buffer_data = buffers.get(buffer_index).ok_or_else(|| {
        GltfError::BufferError(format!("buffer index {buffer_index} out of range"))
    })?;

    let element_size = accessor.data_type().size() * accessor.dimensions().multiplicity();
    let stride = view.stride().unwrap_or(element_size);
    let count = accessor.count();
    let overflow = || {
        GltfError::BufferError(format!(
            "accessor {} byte range overflows (count {count}, stride {stride})",
            accessor.index()
        ))
    };

    let start = view
        .offset()
        .checked_add(accessor.offset())
        .ok_or_else(overflow)?;
    let view_end = view
        .offset()
        .checked_add(view.length())
        .ok_or_else(overflow)?;
    let needed_end = match count.checked_sub(1) {
        None => start,
        Some(last) => last
            .checked_mul(stride)
            .and_then(|span| span.checked_add(element_size))
            .and_then(|span| span.checked_add(start))
            .ok_or_else(overflow)?,
    };
    if needed_end > view_end || view_end > buffer_data.len() {
        return Err(GltfError::BufferError(format!(
            "accessor {} reads bytes {start}..{needed_end} but view {} ends at {view_end} \
             (buffer length {})",
            accessor.index(),
            view.index(),
            buffer_data.len()
        )));
    }

    Ok((&buffer_data[start..view_end], stride))
}

/// Read an f32 accessor as a flat array of components.
fn read_f32_accessor(
    accessor: &gltf_dep::Accessor<'_>,
    buffers: &[Vec<u8>],
) -> Result<Vec<f32>, GltfError> {
    let (src_data, stride) = read_accessor_bytes(accessor, buffers)?;
    let component_count = accessor.dimensions().multiplicity();
    let count = accessor.count();

    // Bounded by the view length checked above.
    let mut result = Vec::with_capacity(count * component_count);
    for i in 0..count {
        let offset = i * stride;
        for c in 0..component_count {
            let byte_offset = offset + c * 4;
            result.push(f32::from_le_bytes([
                src_data[byte_offset],
                src_data[byte_offset + 1],
                src_data[byte_offset + 2],
                src_data[byte_offset + 3],
            ]));
        }
    }

    Ok(result)
}

/// Convert an accessor `min`/`max` JSON array into per-component values.
fn json_bounds(value: Option<&gltf_dep::json::Value>, components: usize) -> Option<Vec<f32>> {
    let values = value?
        .as_array()?
        .iter()
        .map(|v| v.as_f64().map(|f| f as f32))
        .collect::<Option<Vec<f32>>>()?;
    (values.len() == components).then_some(values)
}

/// Resolve all buffer data from the glTF document.
///
/// Only the embedded binary chunk of a `.glb` is supported as a source.
pub(crate) fn resolve_buffers(
    document: &gltf_dep::Document,
    mut blob: Option<Vec<u8>>,
) -> Result<Vec<Vec<u8>>, GltfError> {
    let mut buffers = Vec::new();

    for buffer in document.buffers() {
        match buffer.source() {
            gltf_dep::buffer::Source::Bin => {
                let data = blob.take().ok_or_else(|| {
                    GltfError::BufferError("binary buffer referenced but no blob present".into())
                })?;
                if data.len() < buffer.length() {
                    return Err(GltfError::BufferError(format!(
                        "buffer {} declares {} bytes but the binary chunk holds {}",
                        buffer.index(),
                        buffer.length(),
                        data.len()
                    )));
                }
                buffers.push(data);
            }
            gltf_dep::buffer::Source::Uri(uri) => {
                return Err(GltfError::BufferError(format!(
                    "external buffer URIs not supported: {uri}"
                )));
            }
        }
    }

    Ok(buffers)
}
