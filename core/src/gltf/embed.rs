//! Image embedding.
//!
//! Textures are PNG-encoded and appended to the shared buffer behind all
//! existing data, so earlier regions are never moved.

use crate::texture::CpuTexture;

use super::error::GltfError;
use super::graph::{AssetGraph, BufferUsage, EmbeddedImage};

/// MIME type declared for every embedded image.
pub const PNG_MIME_TYPE: &str = "image/png";

impl AssetGraph {
    /// Encode `texture` as PNG, append it to the buffer and register an image
    /// and a texture for it.
    ///
    /// Returns the index of the new texture. Encoding failures are fatal and
    /// leave the graph unchanged.
    pub fn embed_texture(&mut self, texture: &CpuTexture) -> Result<u32, GltfError> {
        let png_bytes = encode_texture_to_png(texture)?;

        let region = self.push_region(&png_bytes, BufferUsage::None);
        let image = EmbeddedImage {
            region,
            mime_type: PNG_MIME_TYPE.into(),
            name: texture.name.clone(),
        };
        let image_index = self.images.len() as u32;
        self.images.push(image);

        let texture_index = self.textures.len() as u32;
        self.textures.push(image_index);

        log::debug!(
            "Embedded {} ({}x{}, {} bytes) as texture {texture_index}",
            texture.name.as_deref().unwrap_or("<unnamed>"),
            texture.width,
            texture.height,
            png_bytes.len()
        );
        Ok(texture_index)
    }
}

/// Encode 8-bit pixel data as PNG, keeping its channel count.
pub(crate) fn encode_texture_to_png(texture: &CpuTexture) -> Result<Vec<u8>, GltfError> {
    use image::ImageEncoder;

    let color_type = match texture.channels {
        1 => image::ExtendedColorType::L8,
        2 => image::ExtendedColorType::La8,
        3 => image::ExtendedColorType::Rgb8,
        4 => image::ExtendedColorType::Rgba8,
        other => {
            return Err(GltfError::ImageEncode(format!(
                "unsupported channel count {other}"
            )));
        }
    };

    let expected = texture.pixel_count() * texture.channels as usize;
    if texture.data.len() != expected {
        return Err(GltfError::ImageEncode(format!(
            "{}x{} texture with {} channel(s) needs {expected} bytes, got {}",
            texture.width,
            texture.height,
            texture.channels,
            texture.data.len()
        )));
    }

    let mut png_bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_bytes)
        .write_image(&texture.data, texture.width, texture.height, color_type)
        .map_err(|e| GltfError::ImageEncode(format!("PNG encoding failed: {e}")))?;

    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_appends_after_geometry() {
        let mut graph = AssetGraph::new();
        graph.push_region(&[0u8; 42], BufferUsage::VertexData);

        let texture = CpuTexture::new(2, 2, 4, vec![128; 16]).unwrap().with_name("tex");
        let index = graph.embed_texture(&texture).unwrap();

        assert_eq!(index, 0);
        assert_eq!(graph.images().len(), 1);
        assert_eq!(graph.texture_count(), 1);

        let image = &graph.images()[0];
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.name.as_deref(), Some("tex"));

        let region = graph.regions()[image.region as usize];
        assert_eq!(region.offset, 42);
        assert_eq!(region.usage, BufferUsage::None);
        assert_eq!(region.end() as usize, graph.buffer().len());

        // Payload decodes back to the original pixels.
        let payload = &graph.buffer()[region.offset as usize..region.end() as usize];
        let decoded = CpuTexture::from_memory(payload).unwrap();
        assert_eq!(decoded.data, texture.data);
    }

    #[test]
    fn test_embed_indices_follow_list_length() {
        let mut graph = AssetGraph::new();
        let gray = CpuTexture::new(1, 1, 1, vec![5]).unwrap();
        let rgb = CpuTexture::new(1, 1, 3, vec![1, 2, 3]).unwrap();

        assert_eq!(graph.embed_texture(&gray).unwrap(), 0);
        assert_eq!(graph.embed_texture(&rgb).unwrap(), 1);
        assert_eq!(graph.images()[1].region, 1);
    }

    #[test]
    fn test_embed_rejects_inconsistent_pixels() {
        let mut graph = AssetGraph::new();
        // Bypass the checked constructor to simulate a corrupt buffer.
        let texture = CpuTexture {
            name: None,
            width: 4,
            height: 4,
            channels: 4,
            data: vec![0; 3],
        };

        let err = graph.embed_texture(&texture).unwrap_err();
        assert!(matches!(err, GltfError::ImageEncode(_)));
        assert!(graph.images().is_empty());
        assert!(graph.buffer().is_empty());
    }
}
