//! Shared constants for the layout designer.
//!
//! All fractions are expressed in normalized canvas units ([0,1] of the
//! active canvas dimension); pixel values are display pixels before
//! device-pixel-ratio scaling.

/// Smallest allowed placeholder extent, as a fraction of the canvas dimension.
pub const MIN_SLOT_FRACTION: f64 = 0.02;

/// Outer margin used by preset arrangements.
pub const PRESET_MARGIN: f64 = 0.05;

/// Gap between cells in preset arrangements.
pub const PRESET_GAP: f64 = 0.03;

/// Snap attraction radius in display pixels.
pub const SNAP_THRESHOLD_PX: f64 = 10.0;

/// Visual size of a resize handle in display pixels, also the hit tolerance.
pub const HANDLE_SIZE_PX: f64 = 12.0;

/// Offset applied to duplicated/pasted placeholders.
pub const DUPLICATE_OFFSET: f64 = 0.02;

/// Default width of a freeform placeholder.
pub const FREEFORM_WIDTH: f64 = 0.30;

/// Canvas size used when a template has no decoded source image.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Added to template B's placeholder ids in a merged export so they can
/// never collide with template A's ids.
pub const MERGED_ID_OFFSET: u64 = 1_000_000;

/// Arrow-key nudge step in display pixels.
pub const NUDGE_STEP_PX: f64 = 1.0;

/// Arrow-key nudge step with the fast modifier held.
pub const FAST_NUDGE_STEP_PX: f64 = 10.0;
