//! Packed buffer layout of composed assets.

use gltf_dep::json as gj;

use crate::gltf::{AssetGraph, BufferUsage, ComponentType, lay_out_primitive};
use crate::mesh::{IndexData, PrimitiveData};

use super::{triangle_data, triangle_normals, triangle_positions};

#[test]
fn test_positions_and_indices_pack_without_padding() {
    let mut graph = AssetGraph::new();
    let data = PrimitiveData {
        positions: triangle_positions(),
        indices: Some(IndexData::U16(vec![0, 1, 2])),
        ..Default::default()
    };

    lay_out_primitive(&mut graph, data).unwrap();

    assert_eq!(graph.accessors().len(), 2);
    assert_eq!(graph.buffer().len(), 3 * 3 * 4 + 3 * 2);
    let offsets: Vec<u64> = graph.regions().iter().map(|r| r.offset).collect();
    assert_eq!(offsets, vec![0, 36]);
    assert_eq!(graph.accessors()[1].component_type, ComponentType::U16);
}

#[test]
fn test_normals_without_tex_coords() {
    let mut graph = AssetGraph::new();
    let data = PrimitiveData {
        positions: triangle_positions(),
        indices: Some(IndexData::U16(vec![0, 1, 2])),
        normals: triangle_normals(),
        ..Default::default()
    };

    let binding = lay_out_primitive(&mut graph, data).unwrap();
    assert!(binding.tex_coord.is_none());

    let layout: Vec<(u64, u64, BufferUsage)> = graph
        .regions()
        .iter()
        .map(|r| (r.offset, r.length, r.usage))
        .collect();
    assert_eq!(
        layout,
        vec![
            (0, 36, BufferUsage::VertexData),
            (36, 6, BufferUsage::IndexData),
            (42, 36, BufferUsage::VertexData),
        ]
    );

    let root = graph.to_root().unwrap();
    let attributes = &root.meshes[0].primitives[0].attributes;
    assert_eq!(attributes.len(), 2);
    assert!(!attributes.contains_key(&gj::validation::Checked::Valid(
        gj::mesh::Semantic::TexCoords(0)
    )));
    assert_eq!(root.accessors.len(), 3);
}

#[test]
fn test_regions_cover_buffer_exactly() {
    let mut graph = AssetGraph::new();
    lay_out_primitive(&mut graph, triangle_data()).unwrap();

    let total: u64 = graph.regions().iter().map(|r| r.length).sum();
    assert_eq!(total, graph.buffer().len() as u64);

    for pair in graph.regions().windows(2) {
        assert_eq!(pair[0].end(), pair[1].offset);
    }

    for accessor in graph.accessors() {
        let region = graph.regions()[accessor.region as usize];
        assert!(accessor.byte_offset + accessor.count * accessor.element_size() <= region.length);
    }
}

#[test]
fn test_composed_document_shape() {
    let mut graph = AssetGraph::new();
    lay_out_primitive(&mut graph, triangle_data()).unwrap();
    let root = graph.to_root().unwrap();

    assert_eq!(root.buffers.len(), 1);
    assert_eq!(root.buffers[0].byte_length.0, graph.buffer().len() as u64);
    assert_eq!(root.meshes.len(), 1);
    assert_eq!(root.materials.len(), 1);
    assert_eq!(root.nodes.len(), 1);
    assert_eq!(root.scenes.len(), 1);
    assert_eq!(root.scene.map(|s| s.value()), Some(0));

    let primitive = &root.meshes[0].primitives[0];
    assert_eq!(primitive.material.map(|m| m.value()), Some(0));
    assert_eq!(
        primitive.mode,
        gj::validation::Checked::Valid(gj::mesh::Mode::Triangles)
    );

    let material = &root.materials[0];
    assert!(material.double_sided);
    assert_eq!(
        material.pbr_metallic_roughness.base_color_factor.0,
        [1.0, 0.9, 0.9, 1.0]
    );
}
