// SPDX-License-Identifier: MPL-2.0
//! Media handling for the avatar cropper.
//!
//! Decoding user-supplied files into drawable bitmaps and encoding the final
//! avatar crop.

pub mod export;
pub mod image;

// Re-export commonly used types
pub use export::{export_crop, export_crop_async, EncodedAvatar};
pub use image::{decode_image, load_image, load_image_async, SourceImage};
