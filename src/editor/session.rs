// SPDX-License-Identifier: MPL-2.0
//! Pan/zoom session for one loaded image.
//!
//! A [`Session`] maps source-image pixels onto the square preview surface with
//! a uniform `scale` (preview pixels per source pixel) followed by a
//! translation to `(offset_x, offset_y)`, the top-left corner of the scaled
//! image. All gesture math lives here so that it can be exercised without a
//! drawing surface.

use crate::domain::editing::SurfaceSize;
use crate::editor::drag::DragState;
use crate::error::{Error, Result};
use crate::media::SourceImage;
use tiny_skia::Point;

/// Where the scaled image lands on the preview surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Editing state for one image load.
#[derive(Debug, Clone)]
pub struct Session {
    image: SourceImage,
    preview: SurfaceSize,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    drag: DragState,
}

impl Session {
    /// Fits `image` into the preview so that its shorter axis exactly fills
    /// the surface and the longer axis is centered (and may overflow).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the image has an empty dimension.
    pub fn new(image: SourceImage, preview: SurfaceSize) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::Decode(format!(
                "image has empty dimensions ({}x{})",
                image.width(),
                image.height()
            )));
        }

        let side = preview.as_f32();
        let (width, height) = dimensions_f32(&image);

        let (scale, offset_x, offset_y) = if image.aspect_ratio() > 1.0 {
            let scale = side / height;
            (scale, (side - width * scale) / 2.0, 0.0)
        } else {
            let scale = side / width;
            (scale, 0.0, (side - height * scale) / 2.0)
        };

        log::debug!(
            "Session fitted {}x{} image: scale={scale}, offset=({offset_x}, {offset_y})",
            image.width(),
            image.height()
        );

        Ok(Self {
            image,
            preview,
            scale,
            offset_x,
            offset_y,
            drag: DragState::default(),
        })
    }

    #[must_use]
    pub fn image(&self) -> &SourceImage {
        &self.image
    }

    #[must_use]
    pub fn preview(&self) -> SurfaceSize {
        self.preview
    }

    /// Preview pixels per source pixel.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Top-left corner of the scaled image on the preview surface.
    #[must_use]
    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    #[must_use]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    /// Rectangle covered by the scaled image, in preview coordinates.
    #[must_use]
    pub fn placement(&self) -> Placement {
        let (width, height) = dimensions_f32(&self.image);
        Placement {
            x: self.offset_x,
            y: self.offset_y,
            width: width * self.scale,
            height: height * self.scale,
        }
    }

    /// Source-image coordinates of the given preview point.
    #[must_use]
    pub fn source_point_at(&self, preview_x: f32, preview_y: f32) -> (f32, f32) {
        (
            (preview_x - self.offset_x) / self.scale,
            (preview_y - self.offset_y) / self.scale,
        )
    }

    /// Rescales around the preview center: the source point under
    /// `(P/2, P/2)` stays put, and any earlier panning is kept.
    ///
    /// Non-positive or non-finite scales are ignored and `false` is returned.
    pub fn zoom_to(&mut self, new_scale: f32) -> bool {
        if !(new_scale.is_finite() && new_scale > 0.0) {
            log::warn!("Ignoring invalid zoom scale {new_scale}");
            return false;
        }

        let center = self.preview.center();
        let ratio = new_scale / self.scale;
        self.offset_x = center - (center - self.offset_x) * ratio;
        self.offset_y = center - (center - self.offset_y) * ratio;
        self.scale = new_scale;
        true
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag.start(Point::from_xy(x, y));
    }

    /// Applies the pointer movement since the last position to the offset.
    /// Returns `false` (and changes nothing) when no drag is active.
    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        match self.drag.advance(Point::from_xy(x, y)) {
            Some((dx, dy)) => {
                self.offset_x += dx;
                self.offset_y += dy;
                log::trace!("Drag delta ({dx}, {dy}) -> offset ({}, {})", self.offset_x, self.offset_y);
                true
            }
            None => false,
        }
    }

    pub fn end_drag(&mut self) {
        self.drag.stop();
    }
}

fn dimensions_f32(image: &SourceImage) -> (f32, f32) {
    // Pixel dimensions are far below the range where f32 loses integer precision
    #[allow(clippy::cast_precision_loss)]
    let dims = (image.width() as f32, image.height() as f32);
    dims
}
