// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning the image inside the
//! preview surface.

use tiny_skia::Point;

/// Manages grab-and-drag state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Last pointer position seen during the drag
    pub anchor: Option<Point>,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Point) {
        self.is_dragging = true;
        self.anchor = Some(position);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.anchor = None;
    }

    /// Returns the movement since the previous pointer position and moves the
    /// anchor to `position`.
    ///
    /// Deltas chain from anchor to anchor, so a sequence of moves sums to the
    /// displacement from drag start to the last position.
    pub fn advance(&mut self, position: Point) -> Option<(f32, f32)> {
        if !self.is_dragging {
            return None;
        }

        let anchor = self.anchor?;
        self.anchor = Some(position);
        Some((position.x - anchor.x, position.y - anchor.y))
    }
}
