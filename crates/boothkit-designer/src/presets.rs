//! Preset placeholder arrangements.
//!
//! Presets replace the active template's placeholders with a deterministic
//! arrangement computed from a fixed outer margin and inter-cell gap, both
//! fractions of the canvas. The formulas are exact: a 2x2 grid with
//! margin 0.05 and gap 0.03 yields four 0.435-wide cells.

use boothkit_core::Placeholder;
use serde::{Deserialize, Serialize};

/// The built-in arrangements offered by the designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetKind {
    /// One slot filling the area inside the margin.
    Single,
    /// Four equal cells.
    Grid2x2,
    /// One wide slot over two half-width slots.
    OneOverTwo,
    /// Three full-width rows.
    VerticalStrip3,
    /// Four full-width rows.
    VerticalStrip4,
    /// Three full-height columns.
    HorizontalStrip3,
}

impl PresetKind {
    pub const ALL: [PresetKind; 6] = [
        PresetKind::Single,
        PresetKind::Grid2x2,
        PresetKind::OneOverTwo,
        PresetKind::VerticalStrip3,
        PresetKind::VerticalStrip4,
        PresetKind::HorizontalStrip3,
    ];

    /// Number of slots the preset produces.
    pub fn slot_count(self) -> usize {
        match self {
            PresetKind::Single => 1,
            PresetKind::Grid2x2 => 4,
            PresetKind::OneOverTwo => 3,
            PresetKind::VerticalStrip3 | PresetKind::HorizontalStrip3 => 3,
            PresetKind::VerticalStrip4 => 4,
        }
    }
}

/// Computes the normalized rectangles for a preset.
///
/// Returned as `(x, y, width, height)` in reading order. Ids are assigned by
/// the caller so the same formulas serve both templates.
pub fn preset_rects(kind: PresetKind, margin: f64, gap: f64) -> Vec<(f64, f64, f64, f64)> {
    let inner = 1.0 - 2.0 * margin;
    match kind {
        PresetKind::Single => vec![(margin, margin, inner, inner)],
        PresetKind::Grid2x2 => {
            // The gap shrinks the cells; the far column/row starts at
            // margin + cell (0.485 with the defaults).
            let cell = (inner - gap) / 2.0;
            let far = margin + cell;
            vec![
                (margin, margin, cell, cell),
                (far, margin, cell, cell),
                (margin, far, cell, cell),
                (far, far, cell, cell),
            ]
        }
        PresetKind::OneOverTwo => {
            let row = (inner - gap) / 2.0;
            let half = (inner - gap) / 2.0;
            vec![
                (margin, margin, inner, row),
                (margin, margin + row + gap, half, row),
                (margin + half + gap, margin + row + gap, half, row),
            ]
        }
        PresetKind::VerticalStrip3 => {
            let row = (inner - 2.0 * gap) / 3.0;
            (0..3)
                .map(|i| (margin, margin + i as f64 * (row + gap), inner, row))
                .collect()
        }
        PresetKind::VerticalStrip4 => {
            let row = (inner - 3.0 * gap) / 4.0;
            (0..4)
                .map(|i| (margin, margin + i as f64 * (row + gap), inner, row))
                .collect()
        }
        PresetKind::HorizontalStrip3 => {
            let col = (inner - 2.0 * gap) / 3.0;
            (0..3)
                .map(|i| (margin + i as f64 * (col + gap), margin, col, inner))
                .collect()
        }
    }
}

/// Materializes a preset into placeholders using caller-supplied ids.
pub fn preset_placeholders(
    kind: PresetKind,
    margin: f64,
    gap: f64,
    mut next_id: impl FnMut() -> u64,
) -> Vec<Placeholder> {
    preset_rects(kind, margin, gap)
        .into_iter()
        .map(|(x, y, w, h)| Placeholder::new(next_id(), x, y, w, h))
        .collect()
}
