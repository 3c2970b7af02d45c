// SPDX-License-Identifier: MPL-2.0
//! Preview surface.
//!
//! The controller draws through the [`Surface`] trait so that tests can stub
//! rendering; [`PixmapSurface`] is the software implementation backed by a
//! `tiny-skia` pixmap.

use crate::domain::editing::SurfaceSize;
use crate::editor::session::Placement;
use crate::error::{Error, Result};
use crate::media::SourceImage;
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

/// A square drawing area of fixed size.
pub trait Surface {
    /// Side length of the surface.
    fn size(&self) -> SurfaceSize;

    /// Clears the surface to transparent.
    fn clear(&mut self);

    /// Draws `image` scaled into `placement`. Parts outside the surface are clipped.
    fn draw_image(&mut self, image: &SourceImage, placement: Placement);

    /// Copy of the current pixels, or `None` if nothing was drawn since the
    /// surface was created or last reset.
    fn snapshot(&self) -> Option<Pixmap>;

    /// Clears the surface and forgets that anything was drawn.
    fn reset(&mut self);
}

/// Software surface rendering into a premultiplied RGBA pixmap.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    size: SurfaceSize,
    pixmap: Pixmap,
    rendered: bool,
}

impl PixmapSurface {
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a pixmap of this size cannot be allocated.
    pub fn new(size: SurfaceSize) -> Result<Self> {
        let pixmap = Pixmap::new(size.get(), size.get()).ok_or_else(|| {
            Error::Config(format!("cannot allocate a {0}x{0} preview surface", size.get()))
        })?;
        Ok(Self {
            size,
            pixmap,
            rendered: false,
        })
    }

    /// Current pixels, regardless of whether anything was drawn.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn draw_image(&mut self, image: &SourceImage, placement: Placement) {
        // Image dimensions are well inside f32's exact integer range
        #[allow(clippy::cast_precision_loss)]
        let (sx, sy) = (
            placement.width / image.width() as f32,
            placement.height / image.height() as f32,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            image.pixmap().as_ref(),
            &paint,
            Transform::from_row(sx, 0.0, 0.0, sy, placement.x, placement.y),
            None,
        );
        self.rendered = true;
    }

    fn snapshot(&self) -> Option<Pixmap> {
        self.rendered.then(|| self.pixmap.clone())
    }

    fn reset(&mut self) {
        self.clear();
        self.rendered = false;
    }
}
