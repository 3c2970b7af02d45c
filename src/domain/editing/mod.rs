// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for the avatar cropper:
//! - [`ZoomRange`]: Slider bounds configured by the host UI
//! - [`ZoomPercent`]: Slider value clamped to a [`ZoomRange`]
//! - [`JpegQuality`]: Encoder quality factor
//! - [`SurfaceSize`]: Side length of a square drawing surface

pub mod newtypes;

pub use newtypes::{JpegQuality, SurfaceSize, ZoomPercent, ZoomRange};
