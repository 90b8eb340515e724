//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`AttributeSemantic`] - The vertex attributes carried into the output
//! - [`AttributeData`] - A typed `f32` array with per-component bounds
//! - [`IndexFormat`] - Index component type (u16 or u32)
//! - [`IndexData`] - Index values tagged with their component type
//! - [`PrimitiveData`] - Everything extracted from one source primitive

/// Vertex attribute semantics understood by the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeSemantic {
    /// Vertex position (`POSITION`, vec3).
    Position,
    /// Vertex normal (`NORMAL`, vec3).
    Normal,
    /// First texture coordinate set (`TEXCOORD_0`, vec2).
    TexCoord0,
}

impl AttributeSemantic {
    /// Number of components per element for this semantic.
    pub fn components(&self) -> usize {
        match self {
            Self::Position | Self::Normal => 3,
            Self::TexCoord0 => 2,
        }
    }

    /// Attribute name as written in a glTF primitive.
    pub fn gltf_name(&self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Normal => "NORMAL",
            Self::TexCoord0 => "TEXCOORD_0",
        }
    }
}

/// A flat array of `f32` components grouped into fixed-size elements.
///
/// `min` and `max`, when present, hold one value per component of an
/// element (so their length equals `components`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeData {
    /// Flat component values, `components` per element.
    pub values: Vec<f32>,
    /// Components per element (1..=4).
    pub components: usize,
    /// Per-component minimum, if known.
    pub min: Option<Vec<f32>>,
    /// Per-component maximum, if known.
    pub max: Option<Vec<f32>>,
}

impl AttributeData {
    /// Create attribute data without bounds.
    pub fn new(values: Vec<f32>, components: usize) -> Self {
        Self {
            values,
            components,
            min: None,
            max: None,
        }
    }

    /// Create an empty array (used for absent optional attributes).
    pub fn empty(components: usize) -> Self {
        Self::new(Vec::new(), components)
    }

    /// Attach per-component bounds.
    pub fn with_bounds(mut self, min: Vec<f32>, max: Vec<f32>) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Whether the array holds no components.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of elements (vertices) in the array.
    pub fn element_count(&self) -> usize {
        if self.components == 0 {
            0
        } else {
            self.values.len() / self.components
        }
    }

    /// Size in bytes once packed tightly.
    pub fn byte_len(&self) -> usize {
        self.values.len() * size_of::<f32>()
    }

    /// Compute per-component bounds from the values.
    ///
    /// Returns `None` for an empty array.
    pub fn compute_bounds(&self) -> Option<(Vec<f32>, Vec<f32>)> {
        if self.is_empty() || self.components == 0 {
            return None;
        }

        let mut min = vec![f32::MAX; self.components];
        let mut max = vec![f32::MIN; self.components];
        for element in self.values.chunks_exact(self.components) {
            for (c, &v) in element.iter().enumerate() {
                min[c] = min[c].min(v);
                max[c] = max[c].max(v);
            }
        }
        Some((min, max))
    }

    /// Little-endian bytes of all components.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.values).to_vec()
    }
}

/// Index component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers.
    #[default]
    Uint16,
    /// 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// Index values tagged with their original component type.
///
/// The index stream is carried typed until packing so the output accessor can
/// restate the exact component type and count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    /// 16-bit indices.
    U16(Vec<u16>),
    /// 32-bit indices.
    U32(Vec<u32>),
}

impl IndexData {
    /// Component type of the stored indices.
    pub fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::Uint16,
            Self::U32(_) => IndexFormat::Uint32,
        }
    }

    /// Number of indices.
    pub fn count(&self) -> usize {
        match self {
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    /// Whether the stream holds no indices.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Size in bytes once packed.
    pub fn byte_len(&self) -> usize {
        self.count() * self.format().size()
    }

    /// Little-endian bytes of the stream.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            Self::U16(v) => bytemuck::cast_slice(v).to_vec(),
            Self::U32(v) => bytemuck::cast_slice(v).to_vec(),
        }
    }
}

/// All streams extracted from one source primitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimitiveData {
    /// Vertex positions (vec3). Required for packing.
    pub positions: AttributeData,
    /// Index stream, if the primitive is indexed.
    pub indices: Option<IndexData>,
    /// Vertex normals (vec3), possibly empty.
    pub normals: AttributeData,
    /// First texture coordinate set (vec2), possibly empty.
    pub tex_coords: AttributeData,
}

impl PrimitiveData {
    /// Number of vertices, taken from the position stream.
    pub fn vertex_count(&self) -> usize {
        self.positions.element_count()
    }
}
