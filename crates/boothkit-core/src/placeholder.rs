//! The placeholder data model.
//!
//! A placeholder marks where one guest photo lands on the frame. All of its
//! geometry is normalized: `x`, `y`, `width` and `height` are fractions of
//! the active canvas dimensions with a top-left origin, so a layout is
//! independent of the pixel size of the frame it was designed over.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_SLOT_FRACTION;
use crate::geometry::CanvasSize;

/// How a photo is fitted into its placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Fill the slot, cropping overflow.
    #[default]
    Cover,
    /// Letterbox the photo inside the slot.
    Contain,
}

/// A rational width:height ratio lock.
///
/// Stored as integers so "3:4" survives serialization exactly. The ratio is
/// visual: a locked slot keeps this shape on screen regardless of the canvas
/// pixel aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub num: u32,
    pub den: u32,
}

impl AspectRatio {
    pub fn new(num: u32, den: u32) -> Self {
        debug_assert!(num > 0 && den > 0, "aspect ratio terms must be positive");
        Self { num, den }
    }

    /// The ratio as a scalar (width over height).
    pub fn value(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Height a slot of `width` must have for this ratio to hold visually
    /// on a canvas with the given pixel dimensions.
    pub fn height_for_width(&self, width: f64, canvas: CanvasSize) -> f64 {
        width * canvas.width / (self.value() * canvas.height)
    }

    /// Inverse of [`height_for_width`](Self::height_for_width).
    pub fn width_for_height(&self, height: f64, canvas: CanvasSize) -> f64 {
        height * self.value() * canvas.height / canvas.width
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

/// One photo slot in a template.
///
/// Ids are allocated by the session and are never reused within it, so a
/// placeholder's identity is stable across its whole lifetime (moves,
/// resizes, alignment passes). Invariant: `width` and `height` stay at or
/// above [`MIN_SLOT_FRACTION`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Optional ratio lock; `None` means free resizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<AspectRatio>,
    #[serde(default)]
    pub fit: FitMode,
}

impl Placeholder {
    /// Creates a new placeholder with free aspect and the default fit mode.
    pub fn new(id: u64, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            x,
            y,
            width: width.max(MIN_SLOT_FRACTION),
            height: height.max(MIN_SLOT_FRACTION),
            aspect: None,
            fit: FitMode::default(),
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Hit test in normalized coordinates.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Translates the slot, leaving size untouched.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut p = self.clone();
        p.x += dx;
        p.y += dy;
        p
    }

    /// Re-derives height from width for aspect-locked slots.
    ///
    /// No-op when the slot is free. Called whenever the canvas pixel
    /// dimensions change so locked slots keep their visual shape.
    pub fn reconcile_aspect(&mut self, canvas: CanvasSize) {
        if let Some(ratio) = self.aspect {
            self.height = ratio
                .height_for_width(self.width, canvas)
                .max(MIN_SLOT_FRACTION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_minimum_size() {
        let p = Placeholder::new(1, 0.1, 0.1, 0.001, 0.0);
        assert!(p.width >= MIN_SLOT_FRACTION);
        assert!(p.height >= MIN_SLOT_FRACTION);
    }

    #[test]
    fn edges_and_center() {
        let p = Placeholder::new(1, 0.2, 0.3, 0.4, 0.2);
        assert!((p.right() - 0.6).abs() < 1e-12);
        assert!((p.center_x() - 0.4).abs() < 1e-12);
        assert!((p.center_y() - 0.4).abs() < 1e-12);
        assert!(p.contains(0.4, 0.4));
        assert!(!p.contains(0.7, 0.4));
    }

    #[test]
    fn aspect_lock_accounts_for_canvas_shape() {
        // A 1:1 lock on a 2:1 canvas needs height = 2x width in normalized
        // units to look square.
        let ratio = AspectRatio::new(1, 1);
        let canvas = CanvasSize::new(1000.0, 500.0);
        let h = ratio.height_for_width(0.2, canvas);
        assert!((h - 0.4).abs() < 1e-12);
        let w = ratio.width_for_height(h, canvas);
        assert!((w - 0.2).abs() < 1e-12);
    }

    #[test]
    fn serde_round_trip_keeps_optional_fields() {
        let mut p = Placeholder::new(7, 0.1, 0.2, 0.3, 0.4);
        p.aspect = Some(AspectRatio::new(3, 4));
        p.fit = FitMode::Contain;
        let json = serde_json::to_string(&p).unwrap();
        let back: Placeholder = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
