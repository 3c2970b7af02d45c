// SPDX-License-Identifier: MPL-2.0
//! Editor message/event types.

use crate::editor::gesture::PointerEvent;
use crate::error::Result;
use crate::media::SourceImage;
use std::path::PathBuf;

/// Input delivered to the editor by its host.
#[derive(Debug, Clone)]
pub enum Message {
    /// The file input changed; `None` when the picker was dismissed.
    FileSelected(Option<PathBuf>),
    /// Background decode finished for `path`.
    ImageLoaded {
        path: PathBuf,
        result: Result<SourceImage>,
    },
    /// Zoom slider moved to the given percentage.
    ZoomChanged(f32),
    Pointer(PointerEvent),
    Cancel,
}

impl From<PointerEvent> for Message {
    fn from(event: PointerEvent) -> Self {
        Message::Pointer(event)
    }
}

/// Events propagated to the host for side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// The host should read and decode this file, then reply with
    /// [`Message::ImageLoaded`].
    LoadRequested(PathBuf),
    /// Text to show to the user.
    Notify(String),
}
