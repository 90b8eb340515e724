//! In-memory output asset.
//!
//! [`AssetGraph`] owns the shared binary buffer and the typed metadata that
//! describes it: buffer regions, accessors, embedded images, textures, the
//! material slots and the primitive's attribute bindings. It is converted to
//! glTF JSON only when serialized (see `exporter`).

use crate::material::MaterialSlots;
use crate::mesh::IndexFormat;

/// Append-only byte store backing the output's single buffer.
///
/// Data can only be added at the end, so every offset returned by
/// [`append`](Self::append) stays valid for the lifetime of the builder.
#[derive(Debug, Default, Clone)]
pub struct BufferBuilder {
    data: Vec<u8>,
}

impl BufferBuilder {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes and return the absolute offset they were written at.
    pub fn append(&mut self, bytes: &[u8]) -> u64 {
        let offset = self.data.len() as u64;
        self.data.extend_from_slice(bytes);
        offset
    }

    /// Current length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View of all bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the builder and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Intended GPU usage of a buffer region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Vertex attribute data (`ARRAY_BUFFER`).
    VertexData,
    /// Index data (`ELEMENT_ARRAY_BUFFER`).
    IndexData,
    /// No specific target (embedded images).
    None,
}

/// A byte range within the shared buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferRegion {
    /// Byte offset into the shared buffer.
    pub offset: u64,
    /// Length in bytes.
    pub length: u64,
    /// Intended usage.
    pub usage: BufferUsage,
}

impl BufferRegion {
    /// One past the last byte of the region.
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }
}

/// Accessor component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// 32-bit float.
    F32,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
}

impl ComponentType {
    /// Size of one component in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::F32 | Self::U32 => 4,
            Self::U16 => 2,
        }
    }
}

impl From<IndexFormat> for ComponentType {
    fn from(format: IndexFormat) -> Self {
        match format {
            IndexFormat::Uint16 => Self::U16,
            IndexFormat::Uint32 => Self::U32,
        }
    }
}

/// Accessor element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Single component.
    Scalar,
    /// Two components.
    Vec2,
    /// Three components.
    Vec3,
    /// Four components.
    Vec4,
}

impl ElementType {
    /// Element type with the given number of components.
    pub fn from_components(components: usize) -> Option<Self> {
        match components {
            1 => Some(Self::Scalar),
            2 => Some(Self::Vec2),
            3 => Some(Self::Vec3),
            4 => Some(Self::Vec4),
            _ => None,
        }
    }

    /// Components per element.
    pub fn components(&self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }
}

/// Typed view over a buffer region.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorDesc {
    /// Index into [`AssetGraph::regions`].
    pub region: u32,
    /// Byte offset within the region.
    pub byte_offset: u64,
    /// Component type.
    pub component_type: ComponentType,
    /// Element type.
    pub element_type: ElementType,
    /// Number of elements.
    pub count: u64,
    /// Per-component minimum (omitted for indices).
    pub min: Option<Vec<f32>>,
    /// Per-component maximum (omitted for indices).
    pub max: Option<Vec<f32>>,
}

impl AccessorDesc {
    /// Size of one element in bytes.
    pub fn element_size(&self) -> u64 {
        (self.component_type.size() * self.element_type.components()) as u64
    }
}

/// An image stored inside the shared buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Index into [`AssetGraph::regions`].
    pub region: u32,
    /// MIME type of the encoded payload.
    pub mime_type: String,
    /// Optional image name.
    pub name: Option<String>,
}

/// Accessor indices bound to the single mesh primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveBinding {
    /// `POSITION` accessor.
    pub position: u32,
    /// Index accessor, if the primitive is indexed.
    pub indices: Option<u32>,
    /// `NORMAL` accessor, if present.
    pub normal: Option<u32>,
    /// `TEXCOORD_0` accessor, if present.
    pub tex_coord: Option<u32>,
}

/// The composed output asset.
#[derive(Debug, Default)]
pub struct AssetGraph {
    pub(super) buffer: BufferBuilder,
    pub(super) regions: Vec<BufferRegion>,
    pub(super) accessors: Vec<AccessorDesc>,
    pub(super) images: Vec<EmbeddedImage>,
    /// Texture records, each holding its source image index.
    pub(super) textures: Vec<u32>,
    pub(super) material: MaterialSlots,
    pub(super) primitive: Option<PrimitiveBinding>,
    pub(super) vertex_count: u64,
}

impl AssetGraph {
    /// Create an empty asset.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared buffer bytes.
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// All registered buffer regions, in registration order.
    pub fn regions(&self) -> &[BufferRegion] {
        &self.regions
    }

    /// All accessors, in registration order.
    pub fn accessors(&self) -> &[AccessorDesc] {
        &self.accessors
    }

    /// All embedded images.
    pub fn images(&self) -> &[EmbeddedImage] {
        &self.images
    }

    /// Number of texture records.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Material slot assignments.
    pub fn material(&self) -> &MaterialSlots {
        &self.material
    }

    /// Assign the material's texture slots.
    pub fn set_material(&mut self, slots: MaterialSlots) {
        self.material = slots;
    }

    /// Attribute bindings of the primitive, once geometry is laid out.
    pub fn primitive(&self) -> Option<&PrimitiveBinding> {
        self.primitive.as_ref()
    }

    /// Append bytes to the shared buffer and register a region over them.
    ///
    /// Returns the region index.
    pub fn push_region(&mut self, bytes: &[u8], usage: BufferUsage) -> u32 {
        let offset = self.buffer.append(bytes);
        let index = self.regions.len() as u32;
        self.regions.push(BufferRegion {
            offset,
            length: bytes.len() as u64,
            usage,
        });
        index
    }

    /// Register an accessor and return its index.
    pub fn push_accessor(&mut self, accessor: AccessorDesc) -> u32 {
        let index = self.accessors.len() as u32;
        self.accessors.push(accessor);
        index
    }

    /// Summary used to check a serialized container after reloading it.
    pub fn summary(&self) -> AssetSummary {
        AssetSummary {
            vertex_count: self.vertex_count,
            accessor_count: self.accessors.len(),
            texture_indices: self.material.texture_indices(),
        }
    }
}

/// Counts that must survive a write/read round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSummary {
    /// Number of vertices of the primitive.
    pub vertex_count: u64,
    /// Number of accessors in the document.
    pub accessor_count: usize,
    /// Texture indices referenced by the material, in slot order.
    pub texture_indices: Vec<u32>,
}
