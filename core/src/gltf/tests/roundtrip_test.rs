//! Write a composed asset, reload it and compare.

use crate::gltf::{
    AssetGraph, AssetSummary, GltfError, lay_out_primitive, load_primitive, summarize_glb,
    verify_glb,
};
use crate::material::MaterialSlots;
use crate::mesh::{IndexData, PrimitiveData};
use crate::texture::{CpuTexture, merge_roughness_metalness};

use super::{triangle_data, triangle_normals, triangle_positions};

fn textured_asset() -> AssetGraph {
    let mut graph = AssetGraph::new();
    lay_out_primitive(&mut graph, triangle_data()).unwrap();

    let color = CpuTexture::new(2, 2, 3, vec![200; 12])
        .unwrap()
        .with_name("Crate_Color");
    let roughness = CpuTexture::new(2, 2, 1, vec![10, 20, 30, 40]).unwrap();
    let metalness = CpuTexture::new(2, 2, 1, vec![1, 2, 3, 4]).unwrap();
    let packed = merge_roughness_metalness(&roughness, &metalness).unwrap();

    let base_color = graph.embed_texture(&color).unwrap();
    let metallic_roughness = graph.embed_texture(&packed).unwrap();
    graph.set_material(MaterialSlots {
        base_color: Some(base_color),
        metallic_roughness: Some(metallic_roughness),
        ..Default::default()
    });
    graph
}

#[test]
fn test_roundtrip_geometry() {
    let graph = textured_asset();
    let glb = graph.to_glb().unwrap();

    let reloaded = load_primitive(&glb).unwrap();
    let original = triangle_data();
    assert_eq!(reloaded.positions.values, original.positions.values);
    assert_eq!(reloaded.normals.values, original.normals.values);
    assert_eq!(reloaded.tex_coords.values, original.tex_coords.values);
    assert_eq!(reloaded.indices, original.indices);
}

#[test]
fn test_roundtrip_summary_matches() {
    let graph = textured_asset();
    let glb = graph.to_glb().unwrap();

    let summary = graph.summary();
    assert_eq!(summary.vertex_count, 3);
    assert_eq!(summary.accessor_count, 4);
    assert_eq!(summary.texture_indices, vec![0, 1]);

    assert_eq!(summarize_glb(&glb).unwrap(), summary);
    verify_glb(&glb, &summary).unwrap();
}

#[test]
fn test_roundtrip_embedded_images_decode() {
    let graph = textured_asset();
    let glb = graph.to_glb().unwrap();

    let gltf = gltf_dep::Gltf::from_slice(&glb).unwrap();
    let blob = gltf.blob.as_deref().unwrap();
    let images: Vec<_> = gltf.document.images().collect();
    assert_eq!(images.len(), 2);

    let gltf_dep::image::Source::View { view, mime_type } = images[1].source() else {
        panic!("image should live in a buffer view");
    };
    assert_eq!(mime_type, "image/png");
    let payload = &blob[view.offset()..view.offset() + view.length()];
    let decoded = CpuTexture::from_memory(payload).unwrap();
    assert_eq!(decoded.channels, 4);
    assert_eq!(
        decoded.data,
        vec![255, 10, 1, 255, 255, 20, 2, 255, 255, 30, 3, 255, 255, 40, 4, 255]
    );
}

#[test]
fn test_verify_detects_mismatch() {
    let graph = textured_asset();
    let glb = graph.to_glb().unwrap();

    let wrong_vertices = AssetSummary {
        vertex_count: 4,
        ..graph.summary()
    };
    assert!(matches!(
        verify_glb(&glb, &wrong_vertices),
        Err(GltfError::VerifyError(_))
    ));

    let wrong_textures = AssetSummary {
        texture_indices: vec![0],
        ..graph.summary()
    };
    assert!(matches!(
        verify_glb(&glb, &wrong_textures),
        Err(GltfError::VerifyError(_))
    ));
}

#[test]
fn test_verify_ignores_texture_order() {
    let graph = textured_asset();
    let glb = graph.to_glb().unwrap();

    let reordered = AssetSummary {
        texture_indices: vec![1, 0],
        ..graph.summary()
    };
    verify_glb(&glb, &reordered).unwrap();
}

#[test]
fn test_roundtrip_unpadded_normals() {
    let mut graph = AssetGraph::new();
    let data = PrimitiveData {
        positions: triangle_positions(),
        indices: Some(IndexData::U16(vec![0, 1, 2])),
        normals: triangle_normals(),
        ..Default::default()
    };
    let binding = lay_out_primitive(&mut graph, data).unwrap();
    let normal_accessor = &graph.accessors()[binding.normal.unwrap() as usize];
    assert_eq!(graph.regions()[normal_accessor.region as usize].offset, 42);

    let roughness = CpuTexture::new(1, 1, 1, vec![10]).unwrap();
    let metalness = CpuTexture::new(1, 1, 1, vec![1]).unwrap();
    let packed = merge_roughness_metalness(&roughness, &metalness).unwrap();
    let metallic_roughness = graph.embed_texture(&packed).unwrap();
    graph.set_material(MaterialSlots {
        metallic_roughness: Some(metallic_roughness),
        ..Default::default()
    });

    let glb = graph.to_glb().unwrap();
    verify_glb(&glb, &graph.summary()).unwrap();

    let gltf = gltf_dep::Gltf::from_slice(&glb).unwrap();
    let primitive = gltf.document.meshes().next().unwrap().primitives().next().unwrap();
    let normals = primitive.get(&gltf_dep::Semantic::Normals).unwrap();
    assert_eq!(normals.view().unwrap().offset(), 42);

    let reloaded = load_primitive(&glb).unwrap();
    assert_eq!(reloaded.normals.values, triangle_normals().values);
    assert_eq!(reloaded.indices, Some(IndexData::U16(vec![0, 1, 2])));
    assert!(reloaded.tex_coords.is_empty());
}
