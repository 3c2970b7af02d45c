// SPDX-License-Identifier: MPL-2.0
//! Zoom slider state
//!
//! Mirrors the host UI's percentage slider and its numeric label. The slider
//! owns the numeric range; the controller converts its value into a scale.

use crate::domain::editing::{ZoomPercent, ZoomRange};

/// Percentage slider bound to the zoom operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomSlider {
    range: ZoomRange,
    value: ZoomPercent,
    label: String,
}

impl ZoomSlider {
    #[must_use]
    pub fn new(range: ZoomRange) -> Self {
        let value = range.clamp(ZoomPercent::default().value());
        Self {
            range,
            value,
            label: format_label(value.value()),
        }
    }

    #[must_use]
    pub fn range(&self) -> ZoomRange {
        self.range
    }

    #[must_use]
    pub fn value(&self) -> ZoomPercent {
        self.value
    }

    /// Text shown next to the slider, e.g. `"150%"`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Moves the slider, clamping to its range, and returns the accepted value.
    pub fn set(&mut self, percent: f32) -> ZoomPercent {
        self.value = self.range.clamp(percent);
        self.label = format_label(self.value.value());
        self.value
    }

    /// Positions the slider to reflect a scale computed elsewhere (after a
    /// fresh load). Rounded to whole percent like a browser range input.
    pub fn sync_to_scale(&mut self, scale: f32) -> ZoomPercent {
        self.set((scale * 100.0).round())
    }

    /// Returns the slider to its default position.
    pub fn reset(&mut self) {
        *self = Self::new(self.range);
    }
}

impl Default for ZoomSlider {
    fn default() -> Self {
        Self::new(ZoomRange::default())
    }
}

fn format_label(percent: f32) -> String {
    format!("{}%", format_number(percent))
}

/// Formats a number for display (removes unnecessary decimal places)
#[must_use]
pub fn format_number(value: f32) -> String {
    if value.fract().abs() < f32::EPSILON {
        // Value has no fractional part, so it represents an integer exactly
        #[allow(clippy::cast_possible_truncation)]
        let int_value = value as i32;
        format!("{int_value}")
    } else {
        format!("{value:.1}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
