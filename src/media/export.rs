// SPDX-License-Identifier: MPL-2.0
//! Avatar export.
//!
//! Resamples the full square preview surface down to the export size and
//! encodes it as JPEG using the `image` crate.

use crate::domain::editing::{JpegQuality, SurfaceSize};
use crate::error::{Error, ExportError, Result};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::imageops::{self, FilterType};
use image_rs::{Rgb, RgbImage};
use std::path::Path;
use tiny_skia::Pixmap;

/// A JPEG-encoded avatar, ready to be written to disk or uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAvatar {
    bytes: Vec<u8>,
    side: u32,
}

impl EncodedAvatar {
    pub(crate) fn new(bytes: Vec<u8>, side: u32) -> Self {
        Self { bytes, side }
    }

    /// Encoded JPEG bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Side length of the square image, in pixels.
    #[must_use]
    pub fn side(&self) -> u32 {
        self.side
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes the JPEG to a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Flattens a premultiplied surface onto opaque black.
///
/// Premultiplied channels already equal the color composited over black,
/// which is what a browser canvas produces for uncovered areas in a JPEG.
fn flatten(surface: &Pixmap) -> RgbImage {
    RgbImage::from_fn(surface.width(), surface.height(), |x, y| {
        let idx = (y * surface.width() + x) as usize;
        let px = surface.pixels()[idx];
        Rgb([px.red(), px.green(), px.blue()])
    })
}

/// Samples the whole surface `(0, 0, P, P)`, resamples it to `export × export`
/// and encodes it as JPEG at the given quality.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder fails.
pub fn export_crop(
    surface: &Pixmap,
    export: SurfaceSize,
    quality: JpegQuality,
) -> Result<EncodedAvatar> {
    let side = export.get();
    let flat = flatten(surface);
    let resized = if flat.width() == side && flat.height() == side {
        flat
    } else {
        imageops::resize(&flat, side, side, FilterType::Triangle)
    };

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.value());
    encoder
        .encode_image(&resized)
        .map_err(|e| Error::Export(ExportError::Encode(e.to_string())))?;

    log::debug!(
        "Exported {}x{} surface to {side}x{side} JPEG ({} bytes, quality {})",
        surface.width(),
        surface.height(),
        bytes.len(),
        quality.value()
    );

    Ok(EncodedAvatar::new(bytes, side))
}

/// One-shot asynchronous export: the encode runs on the blocking pool and the
/// future resolves exactly once with the encoded avatar or an error.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] on encoder failure and
/// [`ExportError::TaskAborted`] if the background task dies.
pub async fn export_crop_async(
    surface: Pixmap,
    export: SurfaceSize,
    quality: JpegQuality,
) -> Result<EncodedAvatar> {
    tokio::task::spawn_blocking(move || export_crop(&surface, export, quality))
        .await
        .map_err(|_| Error::Export(ExportError::TaskAborted))?
}
