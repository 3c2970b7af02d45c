// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Geometry**: Preview surface and export sizes
//! - **Zoom**: Slider percentage bounds
//! - **Encoding**: JPEG quality
//! - **Upload**: Endpoint path, form field names and limits

// ==========================================================================
// Geometry Defaults
// ==========================================================================

/// Side length of the square preview surface, in pixels.
pub const PREVIEW_SIZE: u32 = 300;

/// Side length of the square exported avatar, in pixels.
pub const EXPORT_SIZE: u32 = 200;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Slider value shown before any image is loaded (100% = one source pixel per preview pixel).
pub const DEFAULT_ZOOM_PERCENT: f32 = 100.0;

/// Minimum slider value.
pub const MIN_ZOOM_PERCENT: f32 = 10.0;

/// Maximum slider value.
pub const MAX_ZOOM_PERCENT: f32 = 500.0;

// ==========================================================================
// Encoding Defaults
// ==========================================================================

/// JPEG quality used for the exported avatar (0.9 on a 0-1 scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Lowest accepted JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Highest accepted JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Path of the avatar upload endpoint, relative to the server URL.
pub const UPLOAD_PATH: &str = "/profile/upload-avatar";

/// Multipart field carrying the encoded image.
pub const AVATAR_FIELD: &str = "avatar";

/// File name attached to the image part.
pub const AVATAR_FILENAME: &str = "avatar.jpg";

/// MIME type attached to the image part.
pub const AVATAR_MIME: &str = "image/jpeg";

/// Multipart field and hidden input name carrying the anti-forgery token.
pub const CSRF_FIELD: &str = "gorilla.csrf.Token";

/// Largest multipart body the server accepts (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 << 20;

/// Default request timeout for the upload, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of redirects followed after the upload.
pub const MAX_REDIRECTS: usize = 10;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Geometry validation
    assert!(PREVIEW_SIZE > 0);
    assert!(EXPORT_SIZE > 0);
    assert!(EXPORT_SIZE <= PREVIEW_SIZE);

    // Zoom validation
    assert!(MIN_ZOOM_PERCENT > 0.0);
    assert!(MIN_ZOOM_PERCENT < DEFAULT_ZOOM_PERCENT);
    assert!(MAX_ZOOM_PERCENT > DEFAULT_ZOOM_PERCENT);

    // Encoding validation
    assert!(MIN_JPEG_QUALITY > 0);
    assert!(MAX_JPEG_QUALITY <= 100);
    assert!(DEFAULT_JPEG_QUALITY >= MIN_JPEG_QUALITY);
    assert!(DEFAULT_JPEG_QUALITY <= MAX_JPEG_QUALITY);

    // Upload validation
    assert!(MAX_UPLOAD_BYTES > 0);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS > 0);
};
