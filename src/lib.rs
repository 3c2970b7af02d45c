// SPDX-License-Identifier: MPL-2.0
//! `avatar_crop` turns a user-supplied picture into a square profile avatar.
//!
//! The image is fitted into a fixed square preview, panned with pointer or
//! touch drags and zoomed around the preview center. The preview is then
//! resampled to the export size, encoded as JPEG and optionally uploaded to
//! the profile server.

pub mod cli;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod logging;
pub mod media;
pub mod upload;

#[cfg(test)]
pub mod test_utils;
