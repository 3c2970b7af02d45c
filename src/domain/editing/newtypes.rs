// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for cropping values,
//! ensuring they are always within valid ranges.

use crate::config::defaults::{
    DEFAULT_JPEG_QUALITY, DEFAULT_ZOOM_PERCENT, MAX_JPEG_QUALITY, MAX_ZOOM_PERCENT,
    MIN_JPEG_QUALITY, MIN_ZOOM_PERCENT,
};

// =============================================================================
// ZoomRange
// =============================================================================

/// Bounds of the zoom slider, in percent.
///
/// The host UI owns the numeric range; the controller only ever sees values
/// that went through [`ZoomRange::clamp`]. A reversed pair is swapped and a
/// non-positive minimum is raised so that the resulting scale stays positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    min: f32,
    max: f32,
}

impl ZoomRange {
    /// Smallest minimum accepted, keeps `scale > 0`.
    const FLOOR: f32 = 1.0;

    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let lo = if lo.is_finite() { lo.max(Self::FLOOR) } else { MIN_ZOOM_PERCENT };
        let hi = if hi.is_finite() { hi.max(lo) } else { MAX_ZOOM_PERCENT.max(lo) };
        Self { min: lo, max: hi }
    }

    #[must_use]
    pub fn min(self) -> f32 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f32 {
        self.max
    }

    /// Clamps a raw slider value into the range. NaN maps to the minimum.
    #[must_use]
    pub fn clamp(self, percent: f32) -> ZoomPercent {
        if percent.is_nan() {
            return ZoomPercent(self.min);
        }
        ZoomPercent(percent.clamp(self.min, self.max))
    }

    #[must_use]
    pub fn contains(self, percent: f32) -> bool {
        percent >= self.min && percent <= self.max
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM_PERCENT,
            max: MAX_ZOOM_PERCENT,
        }
    }
}

// =============================================================================
// ZoomPercent
// =============================================================================

/// Zoom percentage, guaranteed to lie within the [`ZoomRange`] that produced it.
///
/// Only [`ZoomRange::clamp`] creates values, so a `ZoomPercent` is always
/// strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPercent(f32);

impl ZoomPercent {
    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the zoom as a scale factor (e.g., 150% → 1.5).
    #[must_use]
    pub fn as_scale(self) -> f32 {
        self.0 / 100.0
    }
}

impl Default for ZoomPercent {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_PERCENT)
    }
}

// =============================================================================
// JpegQuality
// =============================================================================

/// JPEG encoder quality, guaranteed to be within 1–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegQuality(u8);

impl JpegQuality {
    /// Creates a new quality value, clamping to the valid range.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY))
    }

    /// Builds a quality from a 0.0–1.0 factor, as browsers express it.
    #[must_use]
    pub fn from_factor(factor: f32) -> Self {
        let percent = (factor.clamp(0.0, 1.0) * 100.0).round();
        // Clamped to 0..=100 above, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = percent as u8;
        Self::new(percent)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for JpegQuality {
    fn default() -> Self {
        Self(DEFAULT_JPEG_QUALITY)
    }
}

// =============================================================================
// SurfaceSize
// =============================================================================

/// Side length of a square surface in pixels, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize(u32);

impl SurfaceSize {
    /// Returns `None` for a zero side length.
    #[must_use]
    pub fn new(side: u32) -> Option<Self> {
        (side > 0).then_some(Self(side))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_f32(self) -> f32 {
        // Surface sizes are small UI dimensions, well inside f32's exact integer range
        #[allow(clippy::cast_precision_loss)]
        let side = self.0 as f32;
        side
    }

    /// Geometric center of the surface, on both axes.
    #[must_use]
    pub fn center(self) -> f32 {
        self.as_f32() / 2.0
    }
}

// =============================================================================
// Tests
// =============================================================================
