//! Reading and writing canvas images.
//!
//! The format is chosen from the file extension. PNG keeps the alpha
//! channel; JPEG and BMP are written flattened, with fully transparent
//! pixels turned white.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use paintkit_core::CanvasError;
use thiserror::Error;

use crate::surface::{Snapshot, Surface};

/// Image file errors.
#[derive(Error, Debug)]
pub enum FileIoError {
    #[error("Unsupported image format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read image {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("No file associated with this canvas")]
    NoFile,

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

pub type FileIoResult<T> = Result<T, FileIoError>;

/// Formats the canvas can be opened from and saved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFileFormat {
    Png,
    Jpeg,
    Bmp,
}

impl ImageFileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    pub fn supports_alpha(self) -> bool {
        self == Self::Png
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }

    fn require(path: &Path) -> FileIoResult<Self> {
        Self::from_path(path).ok_or_else(|| FileIoError::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }
}

/// Saving `from` content as `to` drops transparency.
pub fn is_lossy_conversion(from: ImageFileFormat, to: ImageFileFormat) -> bool {
    from.supports_alpha() && !to.supports_alpha()
}

/// What to do with a save-as request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDecision {
    /// Write without asking.
    Proceed,
    /// The target format loses transparency; ask before writing.
    ConfirmLossy {
        from: ImageFileFormat,
        to: ImageFileFormat,
    },
}

/// Decide whether writing to `target` needs confirmation. Canvases with no
/// file yet count as PNG content.
pub fn save_decision(current: Option<&Path>, target: &Path) -> FileIoResult<SaveDecision> {
    let to = ImageFileFormat::require(target)?;
    let from = current
        .and_then(ImageFileFormat::from_path)
        .unwrap_or(ImageFileFormat::Png);
    if is_lossy_conversion(from, to) {
        Ok(SaveDecision::ConfirmLossy { from, to })
    } else {
        Ok(SaveDecision::Proceed)
    }
}

pub fn load_surface(path: &Path) -> FileIoResult<Surface> {
    ImageFileFormat::require(path)?;
    let image = image::open(path).map_err(|source| FileIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let surface = Surface::from_rgba_image(&image.to_rgba8())?;
    tracing::info!(
        "Loaded {} ({}x{})",
        path.display(),
        surface.width(),
        surface.height()
    );
    Ok(surface)
}

pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> FileIoResult<()> {
    let format = ImageFileFormat::require(path)?;
    let rgba = snapshot.to_rgba_image();
    let image = if format.supports_alpha() {
        DynamicImage::ImageRgba8(rgba)
    } else {
        DynamicImage::ImageRgb8(flatten(&rgba))
    };
    image
        .save_with_format(path, format.image_format())
        .map_err(|source| FileIoError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!("Saved {}", path.display());
    Ok(())
}

pub fn save_surface(surface: &Surface, path: &Path) -> FileIoResult<()> {
    save_snapshot(&surface.snapshot(), path)
}

/// PNG bytes of a snapshot, alpha preserved.
pub fn encode_png(snapshot: &Snapshot) -> FileIoResult<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(snapshot.to_rgba_image())
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(FileIoError::Encode)?;
    Ok(bytes.into_inner())
}

/// Drop alpha. Fully transparent pixels become white; anything else keeps
/// its colour channels.
fn flatten(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        if a == 0 {
            image::Rgb([255, 255, 255])
        } else {
            image::Rgb([r, g, b])
        }
    })
}
