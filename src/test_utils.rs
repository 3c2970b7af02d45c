// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::media::SourceImage;

/// Opaque mid-grey image of the given size.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn solid_image(width: u32, height: u32) -> SourceImage {
    let pixels = [128, 128, 128, 255].repeat((width * height) as usize);
    SourceImage::from_rgba(width, height, pixels).expect("non-empty test image")
}
