// SPDX-License-Identifier: MPL-2.0
//! Pointer input.
//!
//! Mouse and touch input are normalized into [`PointerEvent`]s expressed in
//! preview-surface coordinates, so the controller handles a single gesture
//! model.

use tiny_skia::Point;

/// Device-independent pointer input on the preview surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// The pointer left the surface; treated like a release.
    Leave,
}

/// Raw mouse input, already relative to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseEvent {
    ButtonPressed { x: f32, y: f32 },
    CursorMoved { x: f32, y: f32 },
    ButtonReleased,
    CursorLeft,
}

/// Raw touch input in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    Start { touches: Vec<Point> },
    Move { touches: Vec<Point> },
    End,
    Cancel,
}

/// Mouse coordinates are already surface-relative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseAdapter;

impl MouseAdapter {
    #[must_use]
    pub fn translate(&self, event: MouseEvent) -> PointerEvent {
        match event {
            MouseEvent::ButtonPressed { x, y } => PointerEvent::Down(Point::from_xy(x, y)),
            MouseEvent::CursorMoved { x, y } => PointerEvent::Move(Point::from_xy(x, y)),
            MouseEvent::ButtonReleased => PointerEvent::Up,
            MouseEvent::CursorLeft => PointerEvent::Leave,
        }
    }
}

impl From<MouseEvent> for PointerEvent {
    fn from(event: MouseEvent) -> Self {
        MouseAdapter.translate(event)
    }
}

/// Converts touches to surface coordinates using the surface's page origin.
///
/// Only the first touch point is tracked; touch events without any point are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchAdapter {
    origin: Point,
}

impl Default for TouchAdapter {
    fn default() -> Self {
        Self::new(Point::zero())
    }
}

impl TouchAdapter {
    #[must_use]
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    #[must_use]
    pub fn translate(&self, event: &TouchEvent) -> Option<PointerEvent> {
        match event {
            TouchEvent::Start { touches } => self.first(touches).map(PointerEvent::Down),
            TouchEvent::Move { touches } => self.first(touches).map(PointerEvent::Move),
            TouchEvent::End | TouchEvent::Cancel => Some(PointerEvent::Up),
        }
    }

    fn first(&self, touches: &[Point]) -> Option<Point> {
        touches
            .first()
            .map(|touch| Point::from_xy(touch.x - self.origin.x, touch.y - self.origin.y))
    }
}
