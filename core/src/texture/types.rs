//! 8-bit texture data and image file loading.

use std::path::{Path, PathBuf};

/// Errors that can occur while loading or combining textures.
#[derive(Debug)]
pub enum TextureError {
    /// The image file could not be opened or decoded.
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying codec error.
        source: image::ImageError,
    },
    /// Two maps that must be combined have different sizes.
    DimensionMismatch {
        /// Size of the roughness map.
        roughness: (u32, u32),
        /// Size of the metalness map.
        metalness: (u32, u32),
    },
    /// Pixel data does not match the declared size or channel count.
    InvalidData(String),
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "failed to load texture {}: {source}", path.display())
            }
            Self::DimensionMismatch {
                roughness,
                metalness,
            } => write!(
                f,
                "roughness map is {}x{} but metalness map is {}x{}",
                roughness.0, roughness.1, metalness.0, metalness.1
            ),
            Self::InvalidData(msg) => write!(f, "invalid texture data: {msg}"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Raw 8-bit texture data in row-major, channel-interleaved order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuTexture {
    /// Optional name carried into the output image record.
    pub name: Option<String>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel (1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA).
    pub channels: u8,
    /// Pixel bytes, `width * height * channels` long.
    pub data: Vec<u8>,
}

impl CpuTexture {
    /// Create a texture, checking that `data` matches the declared size.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, TextureError> {
        if !(1..=4).contains(&channels) {
            return Err(TextureError::InvalidData(format!(
                "unsupported channel count {channels}"
            )));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(TextureError::InvalidData(format!(
                "{width}x{height}x{channels} texture needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            name: None,
            width,
            height,
            channels,
            data,
        })
    }

    /// Set the texture name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Size as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Decode an image from memory, keeping its native channel count.
    ///
    /// 16-bit and float images are reduced to 8 bits per channel.
    pub fn from_memory(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(img))
    }

    /// Load an image file, keeping its native channel count.
    ///
    /// The file stem becomes the texture name.
    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let mut texture = Self::from_dynamic(img);
        texture.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());

        log::debug!(
            "Loaded {} ({}x{}, {} channel(s))",
            path.display(),
            texture.width,
            texture.height,
            texture.channels
        );
        Ok(texture)
    }

    fn from_dynamic(img: image::DynamicImage) -> Self {
        let (width, height) = image::GenericImageView::dimensions(&img);
        let (channels, data) = match img.color().channel_count() {
            1 => (1, img.into_luma8().into_raw()),
            2 => (2, img.into_luma_alpha8().into_raw()),
            3 => (3, img.into_rgb8().into_raw()),
            _ => (4, img.into_rgba8().into_raw()),
        };

        Self {
            name: None,
            width,
            height,
            channels,
            data,
        }
    }

    /// Value of channel `channel` at pixel index `pixel`.
    pub(crate) fn channel_at(&self, pixel: usize, channel: usize) -> u8 {
        self.data[pixel * self.channels as usize + channel]
    }
}
