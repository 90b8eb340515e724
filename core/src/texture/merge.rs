//! Metallic-roughness channel packing.

use super::types::{CpuTexture, TextureError};

/// Fill value for the unused red channel and the opaque alpha channel.
const FILL: u8 = 255;

/// Pack a roughness map and a metalness map into one RGBA texture.
///
/// Every output pixel is `[255, roughness, metalness, 255]`, the layout the
/// glTF metallic-roughness material model samples (roughness in green,
/// metalness in blue). Sources with more than one channel contribute their
/// first channel.
///
/// Both maps must have the same size; there is no resampling.
pub fn merge_roughness_metalness(
    roughness: &CpuTexture,
    metalness: &CpuTexture,
) -> Result<CpuTexture, TextureError> {
    if roughness.dimensions() != metalness.dimensions() {
        return Err(TextureError::DimensionMismatch {
            roughness: roughness.dimensions(),
            metalness: metalness.dimensions(),
        });
    }

    let pixel_count = roughness.pixel_count();
    let mut data = Vec::with_capacity(pixel_count * 4);
    for pixel in 0..pixel_count {
        data.extend_from_slice(&[
            FILL,
            roughness.channel_at(pixel, 0),
            metalness.channel_at(pixel, 0),
            FILL,
        ]);
    }

    log::debug!(
        "Packed {}x{} metallic-roughness texture",
        roughness.width,
        roughness.height
    );

    let merged = CpuTexture::new(roughness.width, roughness.height, 4, data)?;
    Ok(merged.with_name("MetallicRoughness"))
}
