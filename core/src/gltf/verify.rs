//! Round-trip verification of a serialized container.

use super::error::GltfError;
use super::graph::AssetSummary;

/// Reload `glb` and check it against what was composed.
///
/// Compares the primitive's vertex count, the accessor count and the set of
/// texture indices referenced by the material.
pub fn verify_glb(glb: &[u8], expected: &AssetSummary) -> Result<(), GltfError> {
    let actual = summarize_glb(glb)?;

    if actual.vertex_count != expected.vertex_count {
        return Err(GltfError::VerifyError(format!(
            "vertex count {} after reload, expected {}",
            actual.vertex_count, expected.vertex_count
        )));
    }
    if actual.accessor_count != expected.accessor_count {
        return Err(GltfError::VerifyError(format!(
            "accessor count {} after reload, expected {}",
            actual.accessor_count, expected.accessor_count
        )));
    }

    let mut actual_textures = actual.texture_indices;
    let mut expected_textures = expected.texture_indices.clone();
    actual_textures.sort_unstable();
    expected_textures.sort_unstable();
    if actual_textures != expected_textures {
        return Err(GltfError::VerifyError(format!(
            "material textures {actual_textures:?} after reload, expected {expected_textures:?}"
        )));
    }

    log::debug!("Round-trip verification passed");
    Ok(())
}

/// Parse a container and summarize its first mesh primitive and material.
pub fn summarize_glb(glb: &[u8]) -> Result<AssetSummary, GltfError> {
    let gltf = gltf_dep::Gltf::from_slice(glb)?;
    let document = &gltf.document;

    let vertex_count = document
        .meshes()
        .next()
        .and_then(|mesh| mesh.primitives().next())
        .and_then(|primitive| primitive.get(&gltf_dep::Semantic::Positions))
        .map_or(0, |accessor| accessor.count() as u64);

    let texture_indices = match document.materials().next() {
        Some(material) => {
            let pbr = material.pbr_metallic_roughness();
            [
                pbr.base_color_texture().map(|t| t.texture().index()),
                material.normal_texture().map(|t| t.texture().index()),
                material.occlusion_texture().map(|t| t.texture().index()),
                pbr.metallic_roughness_texture().map(|t| t.texture().index()),
            ]
            .into_iter()
            .flatten()
            .map(|index| index as u32)
            .collect()
        }
        None => Vec::new(),
    };

    Ok(AssetSummary {
        vertex_count,
        accessor_count: document.accessors().count(),
        texture_indices,
    })
}
