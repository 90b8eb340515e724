//! Texture map kinds and material slot assignments.

/// The material map a texture file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureMapKind {
    /// Base color (albedo).
    BaseColor,
    /// Tangent-space normal map.
    Normal,
    /// Single-channel roughness.
    Roughness,
    /// Single-channel metalness.
    Metalness,
    /// Ambient occlusion.
    Occlusion,
    /// File name matched no known keyword.
    Unknown,
}

impl TextureMapKind {
    /// File-name keywords in match order.
    ///
    /// Matching is case-sensitive and the first keyword contained in the
    /// name decides the kind.
    const KEYWORDS: [(&'static str, TextureMapKind); 5] = [
        ("Color", TextureMapKind::BaseColor),
        ("Normal", TextureMapKind::Normal),
        ("Roughness", TextureMapKind::Roughness),
        ("Metalness", TextureMapKind::Metalness),
        ("AmbientOcclusion", TextureMapKind::Occlusion),
    ];

    /// Classify a texture by its file name.
    pub fn classify(file_name: &str) -> Self {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| file_name.contains(keyword))
            .map(|&(_, kind)| kind)
            .unwrap_or(Self::Unknown)
    }

    /// Human-readable name used in logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BaseColor => "base color",
            Self::Normal => "normal",
            Self::Roughness => "roughness",
            Self::Metalness => "metalness",
            Self::Occlusion => "ambient occlusion",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TextureMapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Texture indices for each slot of the single output material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialSlots {
    /// `pbrMetallicRoughness.baseColorTexture`.
    pub base_color: Option<u32>,
    /// `normalTexture`.
    pub normal: Option<u32>,
    /// `occlusionTexture`.
    pub occlusion: Option<u32>,
    /// `pbrMetallicRoughness.metallicRoughnessTexture` (packed).
    pub metallic_roughness: Option<u32>,
}

impl MaterialSlots {
    /// All assigned texture indices, in slot order.
    pub fn texture_indices(&self) -> Vec<u32> {
        [
            self.base_color,
            self.normal,
            self.occlusion,
            self.metallic_roughness,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
