//! Designer configuration.
//!
//! Tuning knobs the operator can change without rebuilding: snap radius,
//! handle size, preset spacing. Defaults mirror the constants in
//! [`crate::constants`]; `boothkit-settings` handles loading and saving the
//! TOML file these deserialize from.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Runtime-tunable designer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    /// Snap attraction radius in display pixels.
    pub snap_threshold_px: f64,
    /// Resize-handle visual size and hit tolerance in display pixels.
    pub handle_size_px: f64,
    /// Minimum placeholder extent as a canvas fraction.
    pub min_slot_fraction: f64,
    /// Outer margin of preset arrangements.
    pub preset_margin: f64,
    /// Gap between preset cells.
    pub preset_gap: f64,
    /// Arrow-key nudge in display pixels.
    pub nudge_step_px: f64,
    /// Arrow-key nudge with the fast modifier.
    pub fast_nudge_step_px: f64,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            snap_threshold_px: constants::SNAP_THRESHOLD_PX,
            handle_size_px: constants::HANDLE_SIZE_PX,
            min_slot_fraction: constants::MIN_SLOT_FRACTION,
            preset_margin: constants::PRESET_MARGIN,
            preset_gap: constants::PRESET_GAP,
            nudge_step_px: constants::NUDGE_STEP_PX,
            fast_nudge_step_px: constants::FAST_NUDGE_STEP_PX,
        }
    }
}
