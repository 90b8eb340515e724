//! Error types for glTF extraction and export.

/// Errors that can occur while reading the source asset or building the
/// output container.
#[derive(Debug)]
pub enum GltfError {
    /// Failed to parse the glTF document.
    Parse(gltf_dep::Error),
    /// The source document does not have the expected shape
    /// (exactly one mesh with one primitive).
    UnsupportedLayout(String),
    /// The primitive has no position data.
    MissingPositions,
    /// Error reading accessor data.
    AccessorError(String),
    /// Error resolving buffer data.
    BufferError(String),
    /// Failed to encode an image for embedding.
    ImageEncode(String),
    /// Failed to serialize the output document.
    ExportError(String),
    /// The serialized container did not reload as composed.
    VerifyError(String),
}

impl std::fmt::Display for GltfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "glTF parse error: {e}"),
            Self::UnsupportedLayout(msg) => write!(f, "unsupported source layout: {msg}"),
            Self::MissingPositions => write!(f, "primitive has no POSITION data"),
            Self::AccessorError(msg) => write!(f, "accessor error: {msg}"),
            Self::BufferError(msg) => write!(f, "buffer error: {msg}"),
            Self::ImageEncode(msg) => write!(f, "image encode error: {msg}"),
            Self::ExportError(msg) => write!(f, "export error: {msg}"),
            Self::VerifyError(msg) => write!(f, "round-trip verification failed: {msg}"),
        }
    }
}

impl std::error::Error for GltfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<gltf_dep::Error> for GltfError {
    fn from(e: gltf_dep::Error) -> Self {
        Self::Parse(e)
    }
}
