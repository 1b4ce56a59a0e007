//! Geometry and snap engine.
//!
//! Pure functions over geometry frozen at gesture start: given the selection
//! as it was on pointer-down and the absolute pointer delta since, compute
//! the corrected delta (move) or the corrected rectangle (resize), plus the
//! transient guide lines to draw.
//!
//! Snap candidates per axis are the canvas lines 0, 0.5 and 1 and the
//! edges/centers of every placeholder NOT under manipulation. The winner is
//! the candidate with the smallest absolute deviation under the pixel
//! threshold; ties go to the first candidate found in iteration order. Each
//! axis emits at most one guide.

use boothkit_core::{BoundingBox, CanvasSize, Placeholder};
use smallvec::SmallVec;

/// Orientation of a snap guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    /// A vertical line at a fixed x.
    Vertical,
    /// A horizontal line at a fixed y.
    Horizontal,
}

/// A transient alignment line shown while a gesture is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    pub axis: GuideAxis,
    /// Normalized position along the perpendicular axis.
    pub position: f64,
}

/// Vertical half of a corner handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalSide {
    Top,
    Bottom,
}

/// Horizontal half of a corner handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalSide {
    Left,
    Right,
}

/// An edge-midpoint handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSide {
    Top,
    Right,
    Bottom,
    Left,
}

/// One of the eight resize handles of a selected placeholder.
///
/// Corners move both edges; edge midpoints move one. The variant structure
/// replaces handle-code strings so every resize branch is an exhaustive
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Corner(VerticalSide, HorizontalSide),
    Edge(EdgeSide),
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::Corner(VerticalSide::Top, HorizontalSide::Left),
        Handle::Corner(VerticalSide::Top, HorizontalSide::Right),
        Handle::Corner(VerticalSide::Bottom, HorizontalSide::Left),
        Handle::Corner(VerticalSide::Bottom, HorizontalSide::Right),
        Handle::Edge(EdgeSide::Top),
        Handle::Edge(EdgeSide::Right),
        Handle::Edge(EdgeSide::Bottom),
        Handle::Edge(EdgeSide::Left),
    ];

    /// Which horizontal edge this handle moves, if any.
    pub fn horizontal(self) -> Option<HorizontalSide> {
        match self {
            Handle::Corner(_, side) => Some(side),
            Handle::Edge(EdgeSide::Left) => Some(HorizontalSide::Left),
            Handle::Edge(EdgeSide::Right) => Some(HorizontalSide::Right),
            Handle::Edge(EdgeSide::Top) | Handle::Edge(EdgeSide::Bottom) => None,
        }
    }

    /// Which vertical edge this handle moves, if any.
    pub fn vertical(self) -> Option<VerticalSide> {
        match self {
            Handle::Corner(side, _) => Some(side),
            Handle::Edge(EdgeSide::Top) => Some(VerticalSide::Top),
            Handle::Edge(EdgeSide::Bottom) => Some(VerticalSide::Bottom),
            Handle::Edge(EdgeSide::Left) | Handle::Edge(EdgeSide::Right) => None,
        }
    }

    /// True for the top/bottom edge midpoints, where height drives width
    /// under an aspect lock.
    pub fn is_vertical_only(self) -> bool {
        matches!(self, Handle::Edge(EdgeSide::Top) | Handle::Edge(EdgeSide::Bottom))
    }

    /// Normalized position of the handle on a placeholder (corner points and
    /// edge midpoints), used for hit-testing.
    pub fn anchor_point(self, slot: &Placeholder) -> (f64, f64) {
        match self {
            Handle::Corner(v, h) => {
                let x = match h {
                    HorizontalSide::Left => slot.left(),
                    HorizontalSide::Right => slot.right(),
                };
                let y = match v {
                    VerticalSide::Top => slot.top(),
                    VerticalSide::Bottom => slot.bottom(),
                };
                (x, y)
            }
            Handle::Edge(EdgeSide::Top) => (slot.center_x(), slot.top()),
            Handle::Edge(EdgeSide::Bottom) => (slot.center_x(), slot.bottom()),
            Handle::Edge(EdgeSide::Left) => (slot.left(), slot.center_y()),
            Handle::Edge(EdgeSide::Right) => (slot.right(), slot.center_y()),
        }
    }
}

/// A resolved axis snap: the correction to add to the tested coordinate and
/// the candidate line it lands on.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSnap {
    correction: f64,
    line: f64,
}

/// Smallest absolute deviation across all (test point, candidate) pairs,
/// strictly under `threshold`. Strict `<` against the running minimum keeps
/// ties deterministic: the first pair found wins.
fn best_axis_snap(test_points: &[f64], candidates: &[f64], threshold: f64) -> Option<AxisSnap> {
    let mut best: Option<AxisSnap> = None;
    let mut best_deviation = threshold;
    for &point in test_points {
        for &line in candidates {
            let deviation = (line - point).abs();
            if deviation < best_deviation {
                best_deviation = deviation;
                best = Some(AxisSnap {
                    correction: line - point,
                    line,
                });
            }
        }
    }
    best
}

/// Candidate snap lines along one axis: the canvas edges and center, then
/// the leading edge, center and trailing edge of every non-manipulated slot.
fn candidate_lines(others: &[Placeholder], axis: GuideAxis) -> SmallVec<[f64; 32]> {
    let mut lines: SmallVec<[f64; 32]> = SmallVec::new();
    lines.push(0.0);
    lines.push(0.5);
    lines.push(1.0);
    for slot in others {
        match axis {
            GuideAxis::Vertical => {
                lines.push(slot.left());
                lines.push(slot.center_x());
                lines.push(slot.right());
            }
            GuideAxis::Horizontal => {
                lines.push(slot.top());
                lines.push(slot.center_y());
                lines.push(slot.bottom());
            }
        }
    }
    lines
}

/// Result of resolving a move gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResolution {
    pub dx: f64,
    pub dy: f64,
    pub guides: SmallVec<[SnapGuide; 2]>,
}

/// Corrects a raw move delta so the selection's bounding box snaps to the
/// nearest candidate line per axis.
///
/// `selected` is the manipulated subset frozen at gesture start; `others`
/// are the remaining slots of the active template. Deltas are absolute from
/// gesture start, never incremental.
pub fn resolve_move(
    selected: &[Placeholder],
    others: &[Placeholder],
    dx: f64,
    dy: f64,
    canvas: CanvasSize,
    threshold_px: f64,
) -> MoveResolution {
    let mut guides: SmallVec<[SnapGuide; 2]> = SmallVec::new();
    let Some(bbox) = BoundingBox::of(selected) else {
        return MoveResolution { dx, dy, guides };
    };

    let mut out_dx = dx;
    let x_tests = [bbox.min_x + dx, bbox.center_x() + dx, bbox.max_x + dx];
    let x_candidates = candidate_lines(others, GuideAxis::Vertical);
    if let Some(snap) = best_axis_snap(&x_tests, &x_candidates, canvas.px_to_norm_x(threshold_px)) {
        out_dx += snap.correction;
        guides.push(SnapGuide {
            axis: GuideAxis::Vertical,
            position: snap.line,
        });
    }

    let mut out_dy = dy;
    let y_tests = [bbox.min_y + dy, bbox.center_y() + dy, bbox.max_y + dy];
    let y_candidates = candidate_lines(others, GuideAxis::Horizontal);
    if let Some(snap) = best_axis_snap(&y_tests, &y_candidates, canvas.px_to_norm_y(threshold_px)) {
        out_dy += snap.correction;
        guides.push(SnapGuide {
            axis: GuideAxis::Horizontal,
            position: snap.line,
        });
    }

    MoveResolution {
        dx: out_dx,
        dy: out_dy,
        guides,
    }
}

/// Result of resolving a resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeResolution {
    pub slot: Placeholder,
    pub guides: SmallVec<[SnapGuide; 2]>,
}

/// Computes the resized rectangle for a handle drag.
///
/// The moving edge is snapped through the same candidate scan as moves.
/// Top/left handles pin the opposite edge: position changes only by the
/// exact amount the size changed. Dimensions never drop below
/// `min_fraction`.
///
/// Aspect lock: top/bottom edge handles let height drive a recomputed width;
/// every other handle lets width drive height, and handles that include the
/// top re-anchor y so the bottom edge stays fixed. The asymmetry is part of
/// the editing contract.
pub fn resolve_resize(
    start: &Placeholder,
    handle: Handle,
    dx: f64,
    dy: f64,
    others: &[Placeholder],
    canvas: CanvasSize,
    threshold_px: f64,
    min_fraction: f64,
) -> ResizeResolution {
    let mut slot = start.clone();
    let mut guides: SmallVec<[SnapGuide; 2]> = SmallVec::new();

    if let Some(side) = handle.horizontal() {
        let candidates = candidate_lines(others, GuideAxis::Vertical);
        let threshold = canvas.px_to_norm_x(threshold_px);
        match side {
            HorizontalSide::Right => {
                let mut edge = start.right() + dx;
                if let Some(snap) = best_axis_snap(&[edge], &candidates, threshold) {
                    edge = snap.line;
                    guides.push(SnapGuide {
                        axis: GuideAxis::Vertical,
                        position: snap.line,
                    });
                }
                slot.width = (edge - start.left()).max(min_fraction);
            }
            HorizontalSide::Left => {
                let mut edge = start.left() + dx;
                if let Some(snap) = best_axis_snap(&[edge], &candidates, threshold) {
                    edge = snap.line;
                    guides.push(SnapGuide {
                        axis: GuideAxis::Vertical,
                        position: snap.line,
                    });
                }
                let width = (start.right() - edge).max(min_fraction);
                slot.width = width;
                // Right edge is the pinned anchor.
                slot.x = start.right() - width;
            }
        }
    }

    if let Some(side) = handle.vertical() {
        let candidates = candidate_lines(others, GuideAxis::Horizontal);
        let threshold = canvas.px_to_norm_y(threshold_px);
        match side {
            VerticalSide::Bottom => {
                let mut edge = start.bottom() + dy;
                if let Some(snap) = best_axis_snap(&[edge], &candidates, threshold) {
                    edge = snap.line;
                    guides.push(SnapGuide {
                        axis: GuideAxis::Horizontal,
                        position: snap.line,
                    });
                }
                slot.height = (edge - start.top()).max(min_fraction);
            }
            VerticalSide::Top => {
                let mut edge = start.top() + dy;
                if let Some(snap) = best_axis_snap(&[edge], &candidates, threshold) {
                    edge = snap.line;
                    guides.push(SnapGuide {
                        axis: GuideAxis::Horizontal,
                        position: snap.line,
                    });
                }
                let height = (start.bottom() - edge).max(min_fraction);
                slot.height = height;
                // Bottom edge is the pinned anchor.
                slot.y = start.bottom() - height;
            }
        }
    }

    if let Some(ratio) = start.aspect {
        if handle.is_vertical_only() {
            slot.width = ratio.width_for_height(slot.height, canvas).max(min_fraction);
        } else {
            slot.height = ratio.height_for_width(slot.width, canvas).max(min_fraction);
            if handle.vertical() == Some(VerticalSide::Top) {
                slot.y = start.bottom() - slot.height;
            }
        }
    }

    ResizeResolution { slot, guides }
}
