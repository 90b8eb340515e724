//! End-to-end packing of one asset folder into a single `.glb`.
//!
//! A run discovers `<base>.glb` and the `<base>*.png` maps next to it,
//! extracts the mesh, packs roughness and metalness into one texture, embeds
//! every map into the output buffer and writes `<output>/<base>.glb`.
//!
//! Every failure is fatal. Nothing is written unless the whole asset was
//! composed (and, by default, verified) successfully.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::gltf::{AssetGraph, GltfError, lay_out_primitive, load_primitive, verify_glb};
use crate::material::{MaterialSlots, TextureMapKind};
use crate::texture::{CpuTexture, TextureError, merge_roughness_metalness};

/// Errors produced by a packing run.
#[derive(Error, Debug)]
pub enum PackError {
    #[error("Input folder does not exist: {}", .0.display())]
    InputFolderMissing(PathBuf),
    #[error("Source mesh not found: {}", .0.display())]
    MissingMesh(PathBuf),
    #[error("No {0} map found for the asset")]
    MissingTexture(TextureMapKind),
    #[error("Texture file matches no known map keyword: {}", .0.display())]
    UnclassifiedTexture(PathBuf),
    #[error("Output would overwrite the source mesh: {}", .0.display())]
    OverwriteInput(PathBuf),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Gltf(#[from] GltfError),
    #[error(transparent)]
    Texture(#[from] TextureError),
}

impl PackError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Settings for one packing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    /// Asset base name; selects `<base>.glb` and `<base>*.png`.
    pub base_name: String,
    /// Folder holding the source mesh and texture maps.
    pub input_dir: PathBuf,
    /// Folder the packed `.glb` is written to.
    pub output_dir: PathBuf,
    /// Reject texture files that match no map keyword.
    pub strict: bool,
    /// Reload the serialized bytes and check them before writing.
    pub verify: bool,
}

impl PackOptions {
    /// Options writing to the current directory, verification on.
    pub fn new(base_name: impl Into<String>, input_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_name: base_name.into(),
            input_dir: input_dir.into(),
            output_dir: PathBuf::from("."),
            strict: false,
            verify: true,
        }
    }

    /// Write the packed asset to `output_dir` instead.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Fail on texture files that match no map keyword.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or skip the reload check before writing.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Path of the source mesh.
    pub fn mesh_path(&self) -> PathBuf {
        self.input_dir.join(format!("{}.glb", self.base_name))
    }

    /// Path the packed asset is written to.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.glb", self.base_name))
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackReport {
    /// Where the packed asset was written.
    pub output_path: PathBuf,
    /// Size of the written file in bytes.
    pub bytes: usize,
    /// Accessors in the output document.
    pub accessor_count: usize,
    /// Textures in the output document.
    pub texture_count: usize,
}

/// Files that make up one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    /// The source `.glb`.
    pub mesh: PathBuf,
    /// One file per recognised map kind.
    pub textures: BTreeMap<TextureMapKind, PathBuf>,
    /// Map kinds in the order their files were discovered.
    pub order: Vec<TextureMapKind>,
}

impl SourceSet {
    /// Scan `input_dir` for the mesh and texture maps of `base_name`.
    ///
    /// Textures are PNG files whose name contains `base_name`, visited in
    /// file-name order. The first file of each kind wins.
    pub fn discover(input_dir: &Path, base_name: &str, strict: bool) -> Result<Self, PackError> {
        let mesh = input_dir.join(format!("{base_name}.glb"));
        if !mesh.is_file() {
            return Err(PackError::MissingMesh(mesh));
        }

        let entries = std::fs::read_dir(input_dir).map_err(|e| PackError::io(input_dir, e))?;
        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PackError::io(input_dir, e))?;
            let path = entry.path();
            if !path.is_file() || !is_png(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str())
                && name.contains(base_name)
            {
                candidates.push((name.to_owned(), path));
            }
        }
        candidates.sort();

        let mut textures: BTreeMap<TextureMapKind, PathBuf> = BTreeMap::new();
        let mut order = Vec::new();
        for (name, path) in candidates {
            let kind = TextureMapKind::classify(map_suffix(&name, base_name));
            if kind == TextureMapKind::Unknown {
                if strict {
                    return Err(PackError::UnclassifiedTexture(path));
                }
                log::warn!("Skipping {name}: no known map keyword in file name");
                continue;
            }
            if let Some(existing) = textures.get(&kind) {
                log::warn!(
                    "Ignoring {name}: {kind} map already provided by {}",
                    existing.display()
                );
                continue;
            }
            log::debug!("Found {kind} map: {name}");
            textures.insert(kind, path);
            order.push(kind);
        }

        Ok(Self {
            mesh,
            textures,
            order,
        })
    }

    /// File providing the given map, if one was found.
    pub fn texture(&self, kind: TextureMapKind) -> Option<&Path> {
        self.textures.get(&kind).map(PathBuf::as_path)
    }

    fn require(&self, kind: TextureMapKind) -> Result<&Path, PackError> {
        self.texture(kind).ok_or(PackError::MissingTexture(kind))
    }
}

/// Part of a texture file name after the base name, so keywords inside the
/// base name itself never decide the map kind.
fn map_suffix<'a>(file_name: &'a str, base_name: &str) -> &'a str {
    match file_name.find(base_name) {
        Some(start) => &file_name[start + base_name.len()..],
        None => file_name,
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Pack one asset folder into `<output_dir>/<base_name>.glb`.
pub fn pack_asset(options: &PackOptions) -> Result<PackReport, PackError> {
    if !options.input_dir.is_dir() {
        return Err(PackError::InputFolderMissing(options.input_dir.clone()));
    }

    let sources = SourceSet::discover(&options.input_dir, &options.base_name, options.strict)?;
    let output_path = options.output_path();
    if same_file(&output_path, &sources.mesh) {
        return Err(PackError::OverwriteInput(output_path));
    }

    let source_bytes = std::fs::read(&sources.mesh).map_err(|e| PackError::io(&sources.mesh, e))?;
    let primitive = load_primitive(&source_bytes)?;
    log::info!(
        "Loaded {} ({} vertices)",
        sources.mesh.display(),
        primitive.vertex_count()
    );

    let metallic_roughness = {
        let roughness = CpuTexture::load(sources.require(TextureMapKind::Roughness)?)?;
        let metalness = CpuTexture::load(sources.require(TextureMapKind::Metalness)?)?;
        merge_roughness_metalness(&roughness, &metalness)?
    };

    let mut graph = AssetGraph::new();
    lay_out_primitive(&mut graph, primitive)?;

    let mut slots = MaterialSlots::default();
    for &kind in &sources.order {
        let slot = match kind {
            TextureMapKind::BaseColor => &mut slots.base_color,
            TextureMapKind::Normal => &mut slots.normal,
            TextureMapKind::Occlusion => &mut slots.occlusion,
            // Packed into the metallic-roughness texture below.
            TextureMapKind::Roughness | TextureMapKind::Metalness => continue,
            TextureMapKind::Unknown => continue,
        };
        let Some(path) = sources.texture(kind) else {
            continue;
        };
        let texture = CpuTexture::load(path)?;
        *slot = Some(graph.embed_texture(&texture)?);
    }
    slots.metallic_roughness = Some(graph.embed_texture(&metallic_roughness)?);
    graph.set_material(slots);

    let glb = graph.to_glb()?;
    if options.verify {
        verify_glb(&glb, &graph.summary())?;
    }

    std::fs::create_dir_all(&options.output_dir)
        .map_err(|e| PackError::io(&options.output_dir, e))?;
    std::fs::write(&output_path, &glb).map_err(|e| PackError::io(&output_path, e))?;

    log::info!(
        "Wrote {} ({} bytes, {} accessors, {} textures)",
        output_path.display(),
        glb.len(),
        graph.accessors().len(),
        graph.texture_count()
    );

    Ok(PackReport {
        output_path,
        bytes: glb.len(),
        accessor_count: graph.accessors().len(),
        texture_count: graph.texture_count(),
    })
}

/// Whether two paths name the same file, resolving symlinks and `..` when
/// both exist.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
