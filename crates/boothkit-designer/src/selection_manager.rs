//! Selection state for the active template.
//!
//! A selection is a set of placeholder ids scoped to whichever template is
//! active; switching templates always clears it, so cross-template
//! selections cannot exist. Exactly one selected slot is the precondition
//! for resize handles, expressed once in [`SelectionManager::handles_visible`]
//! and consumed by both the hit-tester and the renderer.

use std::collections::BTreeSet;

/// Tracks which placeholders are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    ids: BTreeSet<u64>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &BTreeSet<u64> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// The sole selected id, when exactly one slot is selected.
    pub fn sole(&self) -> Option<u64> {
        if self.ids.len() == 1 {
            self.ids.iter().next().copied()
        } else {
            None
        }
    }

    /// Resize handles are shown (and hit-tested) only for a single-slot
    /// selection.
    pub fn handles_visible(&self) -> bool {
        self.ids.len() == 1
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replaces the selection with one id.
    pub fn select_only(&mut self, id: u64) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Toggles one id in or out (additive-modifier click).
    pub fn toggle(&mut self, id: u64) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Selects every given id.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = u64>) {
        self.ids = ids.into_iter().collect();
    }

    /// Applies click semantics: plain click replaces (or clears on empty
    /// canvas), additive click toggles (or leaves the selection alone on
    /// empty canvas). Clicking an already-selected slot without the modifier
    /// keeps the current multi-selection so it can be dragged as a group.
    pub fn click(&mut self, hit: Option<u64>, additive: bool) {
        match (hit, additive) {
            (Some(id), true) => self.toggle(id),
            (Some(id), false) => {
                if !self.is_selected(id) {
                    self.select_only(id);
                }
            }
            (None, false) => self.clear(),
            (None, true) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_click_replaces_selection() {
        let mut sel = SelectionManager::new();
        sel.select_all([1, 2, 3]);
        sel.click(Some(4), false);
        assert_eq!(sel.ids().iter().copied().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn plain_click_on_selected_slot_keeps_group() {
        let mut sel = SelectionManager::new();
        sel.select_all([1, 2]);
        sel.click(Some(2), false);
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn additive_click_toggles() {
        let mut sel = SelectionManager::new();
        sel.click(Some(1), true);
        sel.click(Some(2), true);
        assert_eq!(sel.len(), 2);
        sel.click(Some(1), true);
        assert!(!sel.is_selected(1));
        assert!(sel.is_selected(2));
    }

    #[test]
    fn empty_canvas_click_clears_unless_additive() {
        let mut sel = SelectionManager::new();
        sel.select_all([1, 2]);
        sel.click(None, true);
        assert_eq!(sel.len(), 2);
        sel.click(None, false);
        assert!(sel.is_empty());
    }

    #[test]
    fn handles_require_exactly_one() {
        let mut sel = SelectionManager::new();
        assert!(!sel.handles_visible());
        sel.select_only(7);
        assert!(sel.handles_visible());
        assert_eq!(sel.sole(), Some(7));
        sel.toggle(8);
        assert!(!sel.handles_visible());
        assert_eq!(sel.sole(), None);
    }
}
