//! Templates: one independently edited placeholder set plus its frame.
//!
//! Every mutating operation builds a fresh placeholder vector instead of
//! splicing in place. History snapshots compare by value, so an operation
//! that changes nothing produces an equal vector and is skipped by the
//! history manager; old snapshots can be retained without aliasing.

use std::sync::Arc;

use boothkit_core::constants::{DUPLICATE_OFFSET, FREEFORM_WIDTH, MIN_SLOT_FRACTION};
use boothkit_core::{CanvasSize, DesignerConfig, FitMode, Placeholder};
use image::RgbaImage;

use crate::presets::{preset_placeholders, PresetKind};

/// Allocates placeholder ids, monotonically increasing and never reused
/// within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Starts allocation above `floor` (used when seeding with externally
    /// supplied placeholders).
    pub fn starting_after(floor: u64) -> Self {
        Self { next: floor + 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded source frame image.
#[derive(Clone)]
pub struct FrameImage {
    pixels: RgbaImage,
}

impl FrameImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn size(&self) -> CanvasSize {
        let (w, h) = self.pixels.dimensions();
        CanvasSize::new(w as f64, h as f64)
    }
}

impl std::fmt::Debug for FrameImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.pixels.dimensions();
        f.debug_struct("FrameImage")
            .field("width", &w)
            .field("height", &h)
            .finish()
    }
}

/// One placeholder set with its source image and export flag.
#[derive(Debug, Clone, Default)]
pub struct Template {
    placeholders: Vec<Placeholder>,
    frame: Option<Arc<FrameImage>>,
    export_enabled: bool,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn get(&self, id: u64) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.id == id)
    }

    /// Replaces the whole placeholder sequence.
    pub fn set_placeholders(&mut self, placeholders: Vec<Placeholder>) {
        self.placeholders = placeholders;
    }

    pub fn frame(&self) -> Option<&Arc<FrameImage>> {
        self.frame.as_ref()
    }

    /// Installs (or clears) the decoded frame and re-derives the heights of
    /// aspect-locked slots against the new canvas shape.
    pub fn set_frame(&mut self, frame: Option<Arc<FrameImage>>) {
        self.frame = frame;
        let canvas = self.canvas_size();
        let mut slots = self.placeholders.clone();
        for slot in &mut slots {
            slot.reconcile_aspect(canvas);
        }
        self.placeholders = slots;
    }

    pub fn export_enabled(&self) -> bool {
        self.export_enabled
    }

    pub fn set_export_enabled(&mut self, enabled: bool) {
        self.export_enabled = enabled;
    }

    /// Pixel dimensions of the frame, or the 800x600 default without one.
    pub fn canvas_size(&self) -> CanvasSize {
        self.frame
            .as_ref()
            .map(|f| f.size())
            .unwrap_or_default()
    }

    /// Adds a default slot: 30% of the canvas width, visually square,
    /// centered. Returns the new id.
    pub fn add_freeform(&mut self, ids: &mut IdAllocator) -> u64 {
        let canvas = self.canvas_size();
        let width = FREEFORM_WIDTH;
        let height = (width * canvas.aspect()).max(MIN_SLOT_FRACTION);
        let id = ids.next_id();
        let slot = Placeholder::new(id, (1.0 - width) / 2.0, (1.0 - height) / 2.0, width, height);
        let mut slots = self.placeholders.clone();
        slots.push(slot);
        self.placeholders = slots;
        id
    }

    /// Replaces all placeholders with a preset arrangement.
    pub fn apply_preset(&mut self, kind: PresetKind, ids: &mut IdAllocator, config: &DesignerConfig) {
        self.placeholders = preset_placeholders(kind, config.preset_margin, config.preset_gap, || {
            ids.next_id()
        });
    }

    /// Removes every placeholder whose id is in `ids`.
    pub fn remove_ids(&mut self, ids: &std::collections::BTreeSet<u64>) {
        self.placeholders = self
            .placeholders
            .iter()
            .filter(|p| !ids.contains(&p.id))
            .cloned()
            .collect();
    }

    /// Clones the given placeholders with fresh ids and a small offset,
    /// clamped so each copy stays inside the canvas. Returns the new ids in
    /// template order.
    pub fn duplicate(
        &mut self,
        ids_to_copy: &std::collections::BTreeSet<u64>,
        ids: &mut IdAllocator,
    ) -> Vec<u64> {
        let sources: Vec<Placeholder> = self
            .placeholders
            .iter()
            .filter(|p| ids_to_copy.contains(&p.id))
            .cloned()
            .collect();
        self.paste(&sources, ids)
    }

    /// Appends copies of `sources` with fresh ids and the duplicate offset.
    pub fn paste(&mut self, sources: &[Placeholder], ids: &mut IdAllocator) -> Vec<u64> {
        let mut slots = self.placeholders.clone();
        let mut new_ids = Vec::with_capacity(sources.len());
        for source in sources {
            let mut copy = source.clone();
            copy.id = ids.next_id();
            copy.x = (copy.x + DUPLICATE_OFFSET).clamp(0.0, (1.0 - copy.width).max(0.0));
            copy.y = (copy.y + DUPLICATE_OFFSET).clamp(0.0, (1.0 - copy.height).max(0.0));
            new_ids.push(copy.id);
            slots.push(copy);
        }
        self.placeholders = slots;
        new_ids
    }

    /// Translates the given placeholders by a fixed delta.
    pub fn translate_ids(&mut self, ids: &std::collections::BTreeSet<u64>, dx: f64, dy: f64) {
        self.placeholders = self
            .placeholders
            .iter()
            .map(|p| {
                if ids.contains(&p.id) {
                    p.translated(dx, dy)
                } else {
                    p.clone()
                }
            })
            .collect();
    }

    /// Replaces a single placeholder by id, keeping order.
    pub fn replace(&mut self, slot: Placeholder) {
        self.placeholders = self
            .placeholders
            .iter()
            .map(|p| if p.id == slot.id { slot.clone() } else { p.clone() })
            .collect();
    }

    /// Sets or clears the aspect lock on the given placeholders, re-deriving
    /// locked heights immediately.
    pub fn set_aspect(
        &mut self,
        ids: &std::collections::BTreeSet<u64>,
        aspect: Option<boothkit_core::AspectRatio>,
    ) {
        let canvas = self.canvas_size();
        self.placeholders = self
            .placeholders
            .iter()
            .map(|p| {
                if ids.contains(&p.id) {
                    let mut slot = p.clone();
                    slot.aspect = aspect;
                    slot.reconcile_aspect(canvas);
                    slot
                } else {
                    p.clone()
                }
            })
            .collect();
    }

    /// Sets the fit mode on the given placeholders.
    pub fn set_fit(&mut self, ids: &std::collections::BTreeSet<u64>, fit: FitMode) {
        self.placeholders = self
            .placeholders
            .iter()
            .map(|p| {
                if ids.contains(&p.id) {
                    let mut slot = p.clone();
                    slot.fit = fit;
                    slot
                } else {
                    p.clone()
                }
            })
            .collect();
    }
}
