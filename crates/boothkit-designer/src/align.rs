//! Alignment and distribution over a selection.
//!
//! All functions take the full placeholder sequence plus the selected id
//! set and return a fresh sequence; unselected slots pass through
//! untouched. A single-slot selection aligns against the canvas, a
//! multi-slot selection aligns against its own bounding box.

use std::collections::BTreeSet;

use boothkit_core::{BoundingBox, Placeholder};

/// Alignment directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Axis for equal-gap distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributeAxis {
    Horizontal,
    Vertical,
}

/// Keeps the old coordinate when the recomputed one differs only by float
/// noise. History diffs snapshots by exact equality, so applying the same
/// transform twice must reproduce the bytes of the first application.
fn settle_coord(old: f64, new: f64) -> f64 {
    if (new - old).abs() < 1e-9 {
        old
    } else {
        new
    }
}

/// Aligns the selected placeholders.
///
/// Exactly one selected: the canvas (0 / centered / flush with 1) is the
/// target. Two or more: the selection's own bounding box is, so the group
/// aligns internally without moving as a whole.
pub fn align_selected(
    slots: &[Placeholder],
    selected: &BTreeSet<u64>,
    alignment: Alignment,
) -> Vec<Placeholder> {
    let chosen: Vec<&Placeholder> = slots.iter().filter(|p| selected.contains(&p.id)).collect();
    if chosen.is_empty() {
        return slots.to_vec();
    }

    let bbox = if chosen.len() > 1 {
        BoundingBox::of(chosen.iter().copied())
    } else {
        None
    };

    slots
        .iter()
        .map(|p| {
            if !selected.contains(&p.id) {
                return p.clone();
            }
            let mut slot = p.clone();
            let target = match (alignment, &bbox) {
                (Alignment::Left, None) => 0.0,
                (Alignment::Left, Some(b)) => b.min_x,
                (Alignment::CenterHorizontal, None) => 0.5 - slot.width / 2.0,
                (Alignment::CenterHorizontal, Some(b)) => b.center_x() - slot.width / 2.0,
                (Alignment::Right, None) => 1.0 - slot.width,
                (Alignment::Right, Some(b)) => b.max_x - slot.width,
                (Alignment::Top, None) => 0.0,
                (Alignment::Top, Some(b)) => b.min_y,
                (Alignment::Middle, None) => 0.5 - slot.height / 2.0,
                (Alignment::Middle, Some(b)) => b.center_y() - slot.height / 2.0,
                (Alignment::Bottom, None) => 1.0 - slot.height,
                (Alignment::Bottom, Some(b)) => b.max_y - slot.height,
            };
            match alignment {
                Alignment::Left | Alignment::CenterHorizontal | Alignment::Right => {
                    slot.x = settle_coord(slot.x, target);
                }
                Alignment::Top | Alignment::Middle | Alignment::Bottom => {
                    slot.y = settle_coord(slot.y, target);
                }
            }
            slot
        })
        .collect()
}

/// Equal-gap distribution along one axis.
///
/// Requires at least three selected placeholders, otherwise the input is
/// returned unchanged. The outermost two (by leading edge) keep their
/// positions; the gap between every adjacent pair of selected slots comes
/// out numerically equal.
pub fn distribute_selected(
    slots: &[Placeholder],
    selected: &BTreeSet<u64>,
    axis: DistributeAxis,
) -> Vec<Placeholder> {
    let mut chosen: Vec<&Placeholder> = slots.iter().filter(|p| selected.contains(&p.id)).collect();
    if chosen.len() < 3 {
        return slots.to_vec();
    }

    let leading = |p: &Placeholder| match axis {
        DistributeAxis::Horizontal => p.x,
        DistributeAxis::Vertical => p.y,
    };
    let extent = |p: &Placeholder| match axis {
        DistributeAxis::Horizontal => p.width,
        DistributeAxis::Vertical => p.height,
    };

    chosen.sort_by(|a, b| {
        leading(a)
            .partial_cmp(&leading(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let first = chosen.first().expect("len >= 3");
    let last = chosen.last().expect("len >= 3");
    let inner_total: f64 = chosen[1..chosen.len() - 1].iter().map(|p| extent(p)).sum();
    let gap = (leading(last) - (leading(first) + extent(first)) - inner_total)
        / (chosen.len() - 1) as f64;

    // New leading coordinate per inner slot, applied cumulatively.
    let mut targets: std::collections::HashMap<u64, f64> = std::collections::HashMap::new();
    let mut cursor = leading(first) + extent(first);
    for slot in &chosen[1..chosen.len() - 1] {
        cursor += gap;
        targets.insert(slot.id, cursor);
        cursor += extent(slot);
    }

    slots
        .iter()
        .map(|p| {
            if let Some(&pos) = targets.get(&p.id) {
                let mut slot = p.clone();
                match axis {
                    DistributeAxis::Horizontal => slot.x = settle_coord(slot.x, pos),
                    DistributeAxis::Vertical => slot.y = settle_coord(slot.y, pos),
                }
                slot
            } else {
                p.clone()
            }
        })
        .collect()
}

/// Auto-arrange heuristic for two or more selected placeholders.
///
/// The dominant spread axis of the selection's bounding box becomes the
/// distribution axis; the cross axis is aligned to the shared centroid.
/// Exactly two items degenerate to cross-axis alignment alone (no gap
/// computation below three items); three or more also get the equal-gap
/// distribution on the primary axis.
pub fn auto_arrange(slots: &[Placeholder], selected: &BTreeSet<u64>) -> Vec<Placeholder> {
    let chosen: Vec<&Placeholder> = slots.iter().filter(|p| selected.contains(&p.id)).collect();
    if chosen.len() < 2 {
        return slots.to_vec();
    }

    let bbox = BoundingBox::of(chosen.iter().copied()).expect("non-empty selection");
    let primary = if bbox.width() >= bbox.height() {
        DistributeAxis::Horizontal
    } else {
        DistributeAxis::Vertical
    };

    let n = chosen.len() as f64;
    let centroid_x = chosen.iter().map(|p| p.center_x()).sum::<f64>() / n;
    let centroid_y = chosen.iter().map(|p| p.center_y()).sum::<f64>() / n;

    let aligned: Vec<Placeholder> = slots
        .iter()
        .map(|p| {
            if !selected.contains(&p.id) {
                return p.clone();
            }
            let mut slot = p.clone();
            match primary {
                DistributeAxis::Horizontal => {
                    slot.y = settle_coord(slot.y, centroid_y - slot.height / 2.0);
                }
                DistributeAxis::Vertical => {
                    slot.x = settle_coord(slot.x, centroid_x - slot.width / 2.0);
                }
            }
            slot
        })
        .collect();

    if chosen.len() == 2 {
        return aligned;
    }
    distribute_selected(&aligned, selected, primary)
}
