// SPDX-License-Identifier: MPL-2.0
//! Image loading and decoding from various formats (PNG, JPEG, GIF, SVG, etc.).

use crate::error::{Error, Result};
use image_rs::{ImageError, RgbaImage};
use resvg::usvg;
use std::fs;
use std::path::{Path, PathBuf};
use tiny_skia::{ColorU8, Pixmap};

/// A decoded source bitmap, stored premultiplied so it can be drawn directly
/// onto the preview surface. Never empty: both dimensions are at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixmap: Pixmap,
}

impl SourceImage {
    /// Creates a `SourceImage` from straight (non-premultiplied) RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if either dimension is zero or the buffer
    /// does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let rgba = RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| Error::Decode("pixel buffer does not match dimensions".into()))?;
        Self::from_rgba_image(&rgba)
    }

    /// Creates a `SourceImage` from an `image` crate RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if either dimension is zero.
    pub fn from_rgba_image(rgba: &RgbaImage) -> Result<Self> {
        let (width, height) = rgba.dimensions();
        let mut pixmap = allocate(width, height)?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(Self { pixmap })
    }

    /// Wraps an already premultiplied pixmap (as produced by resvg).
    fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Returns the premultiplied pixmap for drawing.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        // Image dimensions comfortably fit f32 for a ratio
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.width() as f32 / self.height() as f32;
        ratio
    }
}

fn allocate(width: u32, height: u32) -> Result<Pixmap> {
    if width == 0 || height == 0 {
        return Err(Error::Decode(format!(
            "image has empty dimensions ({width}x{height})"
        )));
    }
    Pixmap::new(width, height)
        .ok_or_else(|| Error::Decode(format!("cannot allocate a {width}x{height} bitmap")))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Decodes encoded image bytes. `svg` selects the vector rasterizer.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not a supported image or the
/// decoded image has empty dimensions.
pub fn decode_image(bytes: &[u8], svg: bool) -> Result<SourceImage> {
    if svg {
        let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
            .map_err(|e| Error::Decode(e.to_string()))?;

        let pixmap_size = tree.size().to_int_size();
        let mut pixmap = allocate(pixmap_size.width(), pixmap_size.height())?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(SourceImage::from_pixmap(pixmap))
    } else {
        let img = image_rs::load_from_memory(bytes)?;
        SourceImage::from_rgba_image(&img.to_rgba8())
    }
}

/// Load an image from the given path and return its decoded bitmap.
///
/// Supports common raster formats (PNG, JPEG, GIF, etc.) as well as SVG.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The image format is invalid, unsupported or empty ([`Error::Decode`])
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<SourceImage> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    decode_image(&bytes, is_svg(path))
}

/// Asynchronous variant of [`load_image`].
///
/// The file is read without blocking the caller's task and decoding runs on
/// the blocking pool; the returned future resolves exactly once.
///
/// # Errors
///
/// Same as [`load_image`]; a panicking decoder is reported as [`Error::Decode`].
pub async fn load_image_async(path: PathBuf) -> Result<SourceImage> {
    let bytes = tokio::fs::read(&path).await?;
    let svg = is_svg(&path);
    tokio::task::spawn_blocking(move || decode_image(&bytes, svg))
        .await
        .map_err(|e| Error::Decode(format!("decoder task failed: {e}")))?
}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}
