//! glTF 2.0 composition and binary container assembly.
//!
//! Converts an [`AssetGraph`] into a glTF JSON document with one buffer, one
//! material, one mesh with a single triangle-list primitive, one node and one
//! default scene, then wraps JSON and buffer into a `.glb` container.

use std::collections::BTreeMap;

use gltf_dep::json as gj;

use super::error::GltfError;
use super::graph::{
    AccessorDesc, AssetGraph, BufferRegion, BufferUsage, ComponentType, ElementType,
    EmbeddedImage, PrimitiveBinding,
};

/// GLB header magic, `"glTF"` in little-endian.
pub const GLB_MAGIC: u32 = 0x46546C67;
/// GLB container version.
pub const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F534A;
const CHUNK_BIN: u32 = 0x004E4942;

/// Base color factor applied to the output material.
const BASE_COLOR_FACTOR: [f32; 4] = [1.0, 0.9, 0.9, 1.0];

impl AssetGraph {
    /// Build the glTF JSON document describing this asset.
    ///
    /// Fails if no geometry has been laid out.
    pub fn to_root(&self) -> Result<gj::Root, GltfError> {
        let binding = self.primitive.ok_or_else(|| {
            GltfError::ExportError("no geometry has been laid out".into())
        })?;

        let mut root = gj::Root::default();

        if !self.buffer.is_empty() {
            root.buffers.push(gj::Buffer {
                byte_length: gj::validation::USize64(self.buffer.len() as u64),
                name: None,
                uri: None,
                extensions: None,
                extras: gj::Extras::default(),
            });
        }
        root.buffer_views = self.regions.iter().map(build_buffer_view).collect();
        root.accessors = self.accessors.iter().map(build_accessor).collect();
        root.images = self.images.iter().map(build_image).collect();
        root.textures = self
            .textures
            .iter()
            .map(|&image| gj::Texture {
                name: None,
                sampler: None,
                source: gj::Index::new(image),
                extensions: None,
                extras: gj::Extras::default(),
            })
            .collect();

        root.materials.push(self.build_material());
        root.meshes.push(gj::Mesh {
            name: None,
            primitives: vec![build_primitive(&binding)],
            weights: None,
            extensions: None,
            extras: gj::Extras::default(),
        });
        root.nodes.push(gj::Node {
            mesh: Some(gj::Index::new(0)),
            ..gj::Node::default()
        });
        root.scenes.push(gj::Scene {
            name: None,
            nodes: vec![gj::Index::new(0)],
            extensions: None,
            extras: gj::Extras::default(),
        });
        root.scene = Some(gj::Index::new(0));
        root.asset = gj::Asset {
            generator: Some(format!("glbpack {}", crate::VERSION)),
            version: "2.0".into(),
            ..Default::default()
        };

        Ok(root)
    }

    fn build_material(&self) -> gj::Material {
        let slots = &self.material;

        let pbr = gj::material::PbrMetallicRoughness {
            base_color_factor: gj::material::PbrBaseColorFactor(BASE_COLOR_FACTOR),
            base_color_texture: slots.base_color.map(texture_info),
            metallic_factor: gj::material::StrengthFactor(1.0),
            roughness_factor: gj::material::StrengthFactor(1.0),
            metallic_roughness_texture: slots.metallic_roughness.map(texture_info),
            extensions: None,
            extras: gj::Extras::default(),
        };
        gj::Material {
            name: None,
            alpha_cutoff: None,
            alpha_mode: gj::validation::Checked::Valid(gj::material::AlphaMode::Opaque),
            double_sided: true,
            pbr_metallic_roughness: pbr,
            normal_texture: slots.normal.map(|index| gj::material::NormalTexture {
                index: gj::Index::new(index),
                scale: 1.0,
                tex_coord: 0,
                extensions: None,
                extras: gj::Extras::default(),
            }),
            occlusion_texture: slots.occlusion.map(|index| gj::material::OcclusionTexture {
                index: gj::Index::new(index),
                strength: gj::material::StrengthFactor(1.0),
                tex_coord: 0,
                extensions: None,
                extras: gj::Extras::default(),
            }),
            emissive_texture: None,
            emissive_factor: gj::material::EmissiveFactor([0.0, 0.0, 0.0]),
            extensions: None,
            extras: gj::Extras::default(),
        }
    }

    /// Serialize the asset into a binary glTF container.
    pub fn to_glb(&self) -> Result<Vec<u8>, GltfError> {
        let root = self.to_root()?;
        let json_bytes = root
            .to_vec()
            .map_err(|e| GltfError::ExportError(format!("JSON serialization failed: {e}")))?;
        write_glb(&json_bytes, self.buffer.as_slice())
    }
}

/// Assemble a `.glb` container from JSON bytes and binary buffer bytes.
///
/// The JSON chunk is padded with spaces and the BIN chunk with zeros to a
/// four-byte boundary. An empty buffer produces no BIN chunk. Fails if the
/// container would exceed the format's 32-bit length fields.
pub fn write_glb(json_bytes: &[u8], buffer_data: &[u8]) -> Result<Vec<u8>, GltfError> {
    let json_pad = (4 - (json_bytes.len() % 4)) % 4;
    let json_chunk_len = json_bytes.len() + json_pad;

    let bin_pad = (4 - (buffer_data.len() % 4)) % 4;
    let bin_chunk_len = buffer_data.len() + bin_pad;

    let has_bin = !buffer_data.is_empty();
    let total_length = 12 + 8 + json_chunk_len + if has_bin { 8 + bin_chunk_len } else { 0 };
    let header_length = glb_length(total_length)?;

    let mut glb = Vec::with_capacity(total_length);

    // Header
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&header_length.to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&glb_length(json_chunk_len)?.to_le_bytes());
    glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    glb.extend_from_slice(json_bytes);
    glb.extend(std::iter::repeat_n(b' ', json_pad));

    // BIN chunk
    if has_bin {
        glb.extend_from_slice(&glb_length(bin_chunk_len)?.to_le_bytes());
        glb.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        glb.extend_from_slice(buffer_data);
        glb.extend(std::iter::repeat_n(0u8, bin_pad));
    }

    Ok(glb)
}

/// Convert a byte length to the `u32` stored in GLB headers.
fn glb_length(length: usize) -> Result<u32, GltfError> {
    u32::try_from(length).map_err(|_| {
        GltfError::ExportError(format!(
            "{length} bytes exceed the 4 GiB limit of a .glb container"
        ))
    })
}

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn build_buffer_view(region: &BufferRegion) -> gj::buffer::View {
    let target = match region.usage {
        BufferUsage::VertexData => Some(gj::buffer::Target::ArrayBuffer),
        BufferUsage::IndexData => Some(gj::buffer::Target::ElementArrayBuffer),
        BufferUsage::None => None,
    };

    gj::buffer::View {
        buffer: gj::Index::new(0),
        byte_offset: Some(gj::validation::USize64(region.offset)),
        byte_length: gj::validation::USize64(region.length),
        byte_stride: None,
        target: target.map(gj::validation::Checked::Valid),
        name: None,
        extensions: None,
        extras: gj::Extras::default(),
    }
}

fn build_accessor(accessor: &AccessorDesc) -> gj::Accessor {
    gj::Accessor {
        buffer_view: Some(gj::Index::new(accessor.region)),
        byte_offset: Some(gj::validation::USize64(accessor.byte_offset)),
        count: gj::validation::USize64(accessor.count),
        component_type: gj::validation::Checked::Valid(gj::accessor::GenericComponentType(
            map_component_type(accessor.component_type),
        )),
        type_: gj::validation::Checked::Valid(map_element_type(accessor.element_type)),
        min: accessor.min.as_deref().map(json_f32_array),
        max: accessor.max.as_deref().map(json_f32_array),
        normalized: false,
        name: None,
        sparse: None,
        extensions: None,
        extras: gj::Extras::default(),
    }
}

fn build_image(image: &EmbeddedImage) -> gj::Image {
    gj::Image {
        buffer_view: Some(gj::Index::new(image.region)),
        mime_type: Some(gj::image::MimeType(image.mime_type.clone())),
        name: image.name.clone(),
        uri: None,
        extensions: None,
        extras: gj::Extras::default(),
    }
}

fn build_primitive(binding: &PrimitiveBinding) -> gj::mesh::Primitive {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        gj::validation::Checked::Valid(gj::mesh::Semantic::Positions),
        gj::Index::new(binding.position),
    );
    if let Some(normal) = binding.normal {
        attributes.insert(
            gj::validation::Checked::Valid(gj::mesh::Semantic::Normals),
            gj::Index::new(normal),
        );
    }
    if let Some(tex_coord) = binding.tex_coord {
        attributes.insert(
            gj::validation::Checked::Valid(gj::mesh::Semantic::TexCoords(0)),
            gj::Index::new(tex_coord),
        );
    }

    gj::mesh::Primitive {
        attributes,
        extensions: None,
        extras: gj::Extras::default(),
        indices: binding.indices.map(gj::Index::new),
        material: Some(gj::Index::new(0)),
        mode: gj::validation::Checked::Valid(gj::mesh::Mode::Triangles),
        targets: None,
    }
}

fn texture_info(index: u32) -> gj::texture::Info {
    gj::texture::Info {
        index: gj::Index::new(index),
        tex_coord: 0,
        extensions: None,
        extras: gj::Extras::default(),
    }
}

fn map_component_type(component_type: ComponentType) -> gj::accessor::ComponentType {
    match component_type {
        ComponentType::F32 => gj::accessor::ComponentType::F32,
        ComponentType::U16 => gj::accessor::ComponentType::U16,
        ComponentType::U32 => gj::accessor::ComponentType::U32,
    }
}

fn map_element_type(element_type: ElementType) -> gj::accessor::Type {
    match element_type {
        ElementType::Scalar => gj::accessor::Type::Scalar,
        ElementType::Vec2 => gj::accessor::Type::Vec2,
        ElementType::Vec3 => gj::accessor::Type::Vec3,
        ElementType::Vec4 => gj::accessor::Type::Vec4,
    }
}

/// Build a JSON array of f32 values (for accessor min/max).
fn json_f32_array(values: &[f32]) -> gj::Value {
    gj::Value::Array(values.iter().map(|&v| gj::Value::from(v as f64)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_glb_header_and_padding() {
        let glb = write_glb(b"{}", &[1, 2, 3]).unwrap();

        assert_eq!(&glb[0..4], &GLB_MAGIC.to_le_bytes());
        assert_eq!(&glb[4..8], &GLB_VERSION.to_le_bytes());
        // 12 header + 8 + 4 json + 8 + 4 bin
        assert_eq!(glb.len(), 36);
        assert_eq!(&glb[8..12], &36u32.to_le_bytes());
        assert_eq!(&glb[12..16], &4u32.to_le_bytes());
        assert_eq!(&glb[20..24], b"{}  ");
        assert_eq!(&glb[24..28], &4u32.to_le_bytes());
        assert_eq!(&glb[32..36], &[1, 2, 3, 0]);
    }

    #[test]
    fn test_write_glb_without_bin_chunk() {
        let glb = write_glb(b"{\"a\":1}", &[]).unwrap();
        assert_eq!(glb.len(), 12 + 8 + 8);
    }

    #[test]
    fn test_glb_length_limit() {
        assert_eq!(glb_length(36).unwrap(), 36);
        assert_eq!(glb_length(u32::MAX as usize).unwrap(), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            glb_length(u32::MAX as usize + 1),
            Err(GltfError::ExportError(_))
        ));
    }

    #[test]
    fn test_to_root_requires_geometry() {
        let graph = AssetGraph::new();
        assert!(matches!(graph.to_root(), Err(GltfError::ExportError(_))));
    }
}
