//! Pointer state machine: idle, moving a selection, or resizing one slot.
//!
//! All pointer coordinates are normalized canvas positions. Geometry is
//! frozen on pointer-down; every `pointer_move` recomputes from the frozen
//! state and the absolute delta, so snap corrections never accumulate
//! across frames. History records once, on pointer-up.

use boothkit_core::Placeholder;

use crate::snap::{resolve_move, resolve_resize, Handle};

use super::DesignerSession;

/// Current pointer gesture.
#[derive(Debug, Clone)]
pub enum Gesture {
    Idle,
    /// Dragging the selected slots.
    Moving {
        origin: (f64, f64),
        /// Selected slots as of pointer-down.
        frozen: Vec<Placeholder>,
        /// Everything else, fixed snap targets for the whole drag.
        others: Vec<Placeholder>,
    },
    /// Dragging one resize handle of the sole selected slot.
    Resizing {
        origin: (f64, f64),
        frozen: Placeholder,
        others: Vec<Placeholder>,
        handle: Handle,
    },
}

impl DesignerSession {
    /// Pointer-down at a normalized canvas position.
    ///
    /// Hit priority: resize handles of the sole selected slot first, then
    /// placeholder bodies topmost-first, then empty canvas. Selection click
    /// semantics apply before any move starts, so a plain click on an
    /// already-selected slot drags the whole group.
    pub fn pointer_down(&mut self, x: f64, y: f64, additive: bool) {
        self.guides.clear();

        if self.selection.handles_visible() {
            if let Some((handle, slot)) = self.hit_handle(x, y) {
                let others = self.slots_except(&[slot.id]);
                self.gesture = Gesture::Resizing {
                    origin: (x, y),
                    frozen: slot,
                    others,
                    handle,
                };
                return;
            }
        }

        let hit = self.hit_slot(x, y);
        self.selection.click(hit, additive);

        if hit.map_or(false, |id| self.selection.is_selected(id)) {
            let selected = self.selected_ids();
            let frozen: Vec<Placeholder> = self
                .active_template()
                .placeholders()
                .iter()
                .filter(|p| selected.contains(&p.id))
                .cloned()
                .collect();
            let others = self.slots_except(&frozen.iter().map(|p| p.id).collect::<Vec<_>>());
            self.gesture = Gesture::Moving {
                origin: (x, y),
                frozen,
                others,
            };
        } else {
            self.gesture = Gesture::Idle;
        }
    }

    /// Pointer-move to a normalized canvas position; live-updates the model
    /// without touching history.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let canvas = self.active_template().canvas_size();
        let threshold = self.config.snap_threshold_px;
        let min_fraction = self.config.min_slot_fraction;

        // The gesture holds frozen geometry only; cloning it keeps the
        // borrow checker out of the mutation below.
        match self.gesture.clone() {
            Gesture::Idle => {}
            Gesture::Moving {
                origin,
                frozen,
                others,
            } => {
                let resolution =
                    resolve_move(&frozen, &others, x - origin.0, y - origin.1, canvas, threshold);
                self.guides = resolution.guides;
                for slot in &frozen {
                    self.active_template_mut()
                        .replace(slot.translated(resolution.dx, resolution.dy));
                }
            }
            Gesture::Resizing {
                origin,
                frozen,
                others,
                handle,
            } => {
                let resolution = resolve_resize(
                    &frozen,
                    handle,
                    x - origin.0,
                    y - origin.1,
                    &others,
                    canvas,
                    threshold,
                    min_fraction,
                );
                self.guides = resolution.guides;
                self.active_template_mut().replace(resolution.slot);
            }
        }
    }

    /// Pointer-up: the gesture settles into one history entry (or none, for
    /// a click that moved nothing).
    pub fn pointer_up(&mut self) {
        let what = match self.gesture {
            Gesture::Idle => None,
            Gesture::Moving { .. } => Some("move"),
            Gesture::Resizing { .. } => Some("resize"),
        };
        self.gesture = Gesture::Idle;
        self.guides.clear();
        if let Some(what) = what {
            self.settle(what);
        }
    }

    /// Topmost placeholder containing the point, scanning back-to-front
    /// (later slots render on top).
    fn hit_slot(&self, x: f64, y: f64) -> Option<u64> {
        self.active_template()
            .placeholders()
            .iter()
            .rev()
            .find(|p| p.contains(x, y))
            .map(|p| p.id)
    }

    /// Handle under the point on the sole selected slot, if any.
    ///
    /// The hit tolerance is the configured handle size scaled by the device
    /// pixel ratio, converted per axis into normalized units.
    fn hit_handle(&self, x: f64, y: f64) -> Option<(Handle, Placeholder)> {
        let id = self.selection.sole()?;
        let slot = self.active_template().get(id)?.clone();
        let canvas = self.active_template().canvas_size();
        let tolerance_px = self.config.handle_size_px * self.scale_factor / 2.0;
        let tol_x = canvas.px_to_norm_x(tolerance_px);
        let tol_y = canvas.px_to_norm_y(tolerance_px);

        for handle in Handle::ALL {
            let (hx, hy) = handle.anchor_point(&slot);
            if (x - hx).abs() <= tol_x && (y - hy).abs() <= tol_y {
                return Some((handle, slot));
            }
        }
        None
    }

    fn slots_except(&self, excluded: &[u64]) -> Vec<Placeholder> {
        self.active_template()
            .placeholders()
            .iter()
            .filter(|p| !excluded.contains(&p.id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PresetKind;

    #[test]
    fn click_selects_topmost_overlapping_slot() {
        let mut session = DesignerSession::default();
        let below = session.add_freeform();
        let above = session.add_freeform(); // same rect, added later: on top
        session.pointer_down(0.5, 0.5, false);
        session.pointer_up();
        assert!(session.selection().is_selected(above));
        assert!(!session.selection().is_selected(below));
    }

    #[test]
    fn drag_produces_one_history_entry() {
        let mut session = DesignerSession::default();
        let id = session.add_freeform();
        let before = session.active_template().get(id).unwrap().clone();
        let history_len = session.history.len();

        session.pointer_down(0.5, 0.5, false);
        session.pointer_move(0.55, 0.5);
        session.pointer_move(0.62, 0.53);
        session.pointer_up();

        let after = session.active_template().get(id).unwrap();
        assert!(after.x > before.x);
        assert_eq!(session.history.len(), history_len + 1);
    }

    #[test]
    fn zero_length_drag_records_nothing() {
        let mut session = DesignerSession::default();
        session.add_freeform();
        let history_len = session.history.len();
        session.pointer_down(0.5, 0.5, false);
        session.pointer_up();
        assert_eq!(session.history.len(), history_len);
    }

    #[test]
    fn guides_clear_on_pointer_up() {
        let mut session = DesignerSession::default();
        session.apply_preset(PresetKind::Grid2x2);
        let id = session
            .active_template()
            .placeholders()
            .first()
            .map(|p| p.id)
            .unwrap();
        session.pointer_down(0.1, 0.1, false);
        assert!(session.selection().is_selected(id));
        // Drag the top-left cell so its left edge approaches the canvas
        // edge: within 10px of x=0 on the 800px default canvas.
        session.pointer_move(0.052, 0.1);
        assert!(!session.guides().is_empty());
        session.pointer_up();
        assert!(session.guides().is_empty());
    }

    #[test]
    fn handle_drag_resizes_instead_of_moving() {
        let mut session = DesignerSession::default();
        let id = session.add_freeform();
        let start = session.active_template().get(id).unwrap().clone();

        // Grab the bottom-right corner (0.65, 0.70 for the default
        // freeform slot) and pull outward.
        session.pointer_down(start.right(), start.bottom(), false);
        assert!(matches!(session.gesture, Gesture::Resizing { .. }));
        session.pointer_move(start.right() + 0.1, start.bottom() + 0.1);
        session.pointer_up();

        let resized = session.active_template().get(id).unwrap();
        assert!((resized.x - start.x).abs() < 1e-12);
        assert!((resized.y - start.y).abs() < 1e-12);
        assert!(resized.width > start.width);
        assert!(resized.height > start.height);
    }

    #[test]
    fn group_drag_moves_every_selected_slot() {
        let mut session = DesignerSession::default();
        session.apply_preset(PresetKind::VerticalStrip3);
        session.select_all();
        let before: Vec<f64> = session
            .active_template()
            .placeholders()
            .iter()
            .map(|p| p.y)
            .collect();

        // Plain click inside a selected slot keeps the group, then drag.
        session.pointer_down(0.5, 0.1, false);
        assert_eq!(session.selection().len(), 3);
        session.pointer_move(0.5, 0.143);
        session.pointer_up();

        let after: Vec<f64> = session
            .active_template()
            .placeholders()
            .iter()
            .map(|p| p.y)
            .collect();
        for (b, a) in before.iter().zip(&after) {
            assert!(a > b);
        }
        // Rigid translation: pairwise offsets preserved.
        assert!(((after[1] - after[0]) - (before[1] - before[0])).abs() < 1e-12);
    }
}
