//! # Boothkit Designer
//!
//! The interactive layout designer at the heart of Boothkit: a
//! direct-manipulation 2D editor for placing photo slots ("placeholders")
//! over an uploaded frame image.
//!
//! ## Core Components
//!
//! ### Model
//! - **Template**: one ordered placeholder set plus its source frame image
//! - **Presets**: deterministic grid/strip/single arrangements
//! - **Selection**: multi-select with additive toggling
//!
//! ### Geometry
//! - **Snap engine**: move/resize deltas corrected against canvas and
//!   neighbor edges/centers, with transient guide lines
//! - **Align/Distribute**: batch transforms over a selection, including the
//!   equal-gap distribution and the auto-arrange heuristic
//!
//! ### Session
//! - **History**: linear, branch-discarding snapshot history over the
//!   template pair
//! - **Dual-template coordination**: templates A and B edited independently,
//!   exported singly or merged side-by-side with coordinate remapping
//! - **Interaction**: pointer state machine (idle / moving / resizing) and
//!   the keyboard surface
//!
//! ## Architecture
//!
//! ```text
//! DesignerSession
//!   ├── Template A / Template B (placeholders + frame image)
//!   ├── SelectionManager (active-template scope)
//!   ├── History (pair snapshots + cursor)
//!   └── Gesture state (frozen geometry, snap guides)
//!
//! snap / align (pure geometry, no session state)
//! ```
//!
//! All model geometry is normalized to [0,1] canvas fractions; display-pixel
//! thresholds (snap radius, handle size) are converted through the canvas
//! pixel dimensions at the point of use.

pub mod align;
pub mod history;
pub mod presets;
pub mod selection_manager;
pub mod session;
pub mod snap;
pub mod template;

pub use align::{Alignment, DistributeAxis};
pub use history::{History, Snapshot};
pub use presets::PresetKind;
pub use selection_manager::SelectionManager;
pub use session::{
    DecodeTicket, DesignerSession, ExportPayload, Gesture, Key, KeyEvent, Modifiers,
};
pub use snap::{EdgeSide, GuideAxis, Handle, HorizontalSide, SnapGuide, VerticalSide};
pub use template::{FrameImage, IdAllocator, Template};

pub use boothkit_core::{
    AspectRatio, CanvasSize, DesignerConfig, FitMode, Placeholder, TemplateSlot,
};
