use gltf_dep::json as gj;

use crate::gltf::{AssetGraph, lay_out_primitive, write_glb};
use crate::mesh::{AttributeData, IndexData, PrimitiveData};

mod layout_test;
mod roundtrip_test;

/// Unit right triangle in the XY plane.
fn triangle_positions() -> AttributeData {
    AttributeData::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], 3)
}

fn triangle_normals() -> AttributeData {
    AttributeData::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0], 3)
}

fn triangle_tex_coords() -> AttributeData {
    AttributeData::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0], 2)
}

/// Triangle drawn from both sides, with every attribute present.
fn triangle_data() -> PrimitiveData {
    PrimitiveData {
        positions: triangle_positions(),
        indices: Some(IndexData::U16(vec![0, 1, 2, 0, 2, 1])),
        normals: triangle_normals(),
        tex_coords: triangle_tex_coords(),
    }
}

/// Build a tightly packed source container with the exporter itself.
fn packed_source(data: PrimitiveData) -> Vec<u8> {
    let mut graph = AssetGraph::new();
    lay_out_primitive(&mut graph, data).expect("lay out source");
    graph.to_glb().expect("serialize source")
}

fn json_array(values: &[f32]) -> gj::Value {
    gj::Value::Array(values.iter().map(|&v| gj::Value::from(v as f64)).collect())
}

fn view(offset: usize, length: usize, stride: Option<usize>, target: gj::buffer::Target) -> gj::buffer::View {
    gj::buffer::View {
        buffer: gj::Index::new(0),
        byte_offset: Some(gj::validation::USize64(offset as u64)),
        byte_length: gj::validation::USize64(length as u64),
        byte_stride: stride.map(gj::buffer::Stride),
        target: Some(gj::validation::Checked::Valid(target)),
        name: None,
        extensions: None,
        extras: gj::Extras::default(),
    }
}

#[allow(clippy::too_many_arguments)]
fn accessor(
    view: u32,
    byte_offset: u64,
    count: usize,
    component_type: gj::accessor::ComponentType,
    type_: gj::accessor::Type,
    min: Option<gj::Value>,
    max: Option<gj::Value>,
) -> gj::Accessor {
    gj::Accessor {
        buffer_view: Some(gj::Index::new(view)),
        byte_offset: Some(gj::validation::USize64(byte_offset)),
        count: gj::validation::USize64(count as u64),
        component_type: gj::validation::Checked::Valid(gj::accessor::GenericComponentType(
            component_type,
        )),
        type_: gj::validation::Checked::Valid(type_),
        min,
        max,
        normalized: false,
        name: None,
        sparse: None,
        extensions: None,
        extras: gj::Extras::default(),
    }
}

/// Build a source container whose positions and texcoords are interleaved in
/// one strided buffer view (20-byte stride), indexed with `u8` indices.
fn interleaved_source(positions: &[[f32; 3]], tex_coords: &[[f32; 2]], indices: &[u8]) -> Vec<u8> {
    let mut bin = Vec::new();
    for (p, uv) in positions.iter().zip(tex_coords) {
        for v in p.iter().chain(uv) {
            bin.extend_from_slice(&v.to_le_bytes());
        }
    }
    let vertex_len = bin.len();
    bin.extend_from_slice(indices);

    let flat: Vec<f32> = positions.iter().flatten().copied().collect();
    let bounds = AttributeData::new(flat, 3).compute_bounds().expect("bounds");

    let mut root = gj::Root::default();
    root.buffers.push(gj::Buffer {
        byte_length: gj::validation::USize64(bin.len() as u64),
        name: None,
        uri: None,
        extensions: None,
        extras: gj::Extras::default(),
    });
    root.buffer_views
        .push(view(0, vertex_len, Some(20), gj::buffer::Target::ArrayBuffer));
    root.buffer_views.push(view(
        vertex_len,
        indices.len(),
        None,
        gj::buffer::Target::ElementArrayBuffer,
    ));
    root.accessors.push(accessor(
        0,
        0,
        positions.len(),
        gj::accessor::ComponentType::F32,
        gj::accessor::Type::Vec3,
        Some(json_array(&bounds.0)),
        Some(json_array(&bounds.1)),
    ));
    root.accessors.push(accessor(
        0,
        12,
        tex_coords.len(),
        gj::accessor::ComponentType::F32,
        gj::accessor::Type::Vec2,
        None,
        None,
    ));
    root.accessors.push(accessor(
        1,
        0,
        indices.len(),
        gj::accessor::ComponentType::U8,
        gj::accessor::Type::Scalar,
        None,
        None,
    ));

    let mut attributes = std::collections::BTreeMap::new();
    attributes.insert(
        gj::validation::Checked::Valid(gj::mesh::Semantic::Positions),
        gj::Index::new(0),
    );
    attributes.insert(
        gj::validation::Checked::Valid(gj::mesh::Semantic::TexCoords(0)),
        gj::Index::new(1),
    );
    root.meshes.push(gj::Mesh {
        name: Some("interleaved".into()),
        primitives: vec![gj::mesh::Primitive {
            attributes,
            extensions: None,
            extras: gj::Extras::default(),
            indices: Some(gj::Index::new(2)),
            material: None,
            mode: gj::validation::Checked::Valid(gj::mesh::Mode::Triangles),
            targets: None,
        }],
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
        version: "2.0".into(),
        ..Default::default()
    };

    let json = root.to_vec().expect("serialize interleaved source");
    write_glb(&json, &bin).expect("assemble interleaved source")
}
