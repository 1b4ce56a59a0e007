//! Normalized-rectangle geometry helpers.
//!
//! The designer works in two coordinate spaces: normalized canvas fractions
//! ([0,1] per axis) for all model geometry, and display pixels for
//! thresholds the user perceives (snap radius, handle size). `CanvasSize`
//! carries the pixel dimensions needed to convert between the two.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::placeholder::Placeholder;

/// Pixel dimensions of the canvas a template is edited against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        debug_assert!(
            width > 0.0 && height > 0.0,
            "canvas dimensions must be positive, got {width}x{height}"
        );
        Self { width, height }
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Converts a display-pixel length to a normalized x extent.
    pub fn px_to_norm_x(&self, px: f64) -> f64 {
        px / self.width
    }

    /// Converts a display-pixel length to a normalized y extent.
    pub fn px_to_norm_y(&self, px: f64) -> f64 {
        px / self.height
    }

    /// Reduced "w:h" form of the pixel dimensions, e.g. "4:3" for 800x600.
    pub fn aspect_string(&self) -> String {
        let w = self.width.round().max(1.0) as u64;
        let h = self.height.round().max(1.0) as u64;
        let g = gcd(w, h);
        format!("{}:{}", w / g, h / g)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Axis-aligned bounding box in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }

    /// Union bounding box of the given placeholders, `None` when the
    /// iterator is empty.
    pub fn of<'a>(slots: impl IntoIterator<Item = &'a Placeholder>) -> Option<Self> {
        let mut bbox: Option<BoundingBox> = None;
        for slot in slots {
            let b = bbox.get_or_insert(BoundingBox {
                min_x: f64::INFINITY,
                min_y: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                max_y: f64::NEG_INFINITY,
            });
            b.min_x = b.min_x.min(slot.left());
            b.min_y = b.min_y.min(slot.top());
            b.max_x = b.max_x.max(slot.right());
            b.max_y = b.max_y.max(slot.bottom());
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_string_reduces() {
        assert_eq!(CanvasSize::new(800.0, 600.0).aspect_string(), "4:3");
        assert_eq!(CanvasSize::new(150.0, 200.0).aspect_string(), "3:4");
        assert_eq!(CanvasSize::new(1920.0, 1080.0).aspect_string(), "16:9");
    }

    #[test]
    fn bounding_box_of_empty_set_is_none() {
        assert_eq!(BoundingBox::of(Vec::<&Placeholder>::new()), None);
    }

    #[test]
    fn bounding_box_unions_slots() {
        let a = Placeholder::new(1, 0.1, 0.1, 0.2, 0.2);
        let b = Placeholder::new(2, 0.5, 0.4, 0.3, 0.3);
        let bbox = BoundingBox::of([&a, &b]).unwrap();
        assert!((bbox.min_x - 0.1).abs() < 1e-12);
        assert!((bbox.max_x - 0.8).abs() < 1e-12);
        assert!((bbox.min_y - 0.1).abs() < 1e-12);
        assert!((bbox.max_y - 0.7).abs() < 1e-12);
        assert!((bbox.center_x() - 0.45).abs() < 1e-12);
    }
}
