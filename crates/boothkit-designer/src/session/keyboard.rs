//! Keyboard chords and arrow nudges.
//!
//! Shortcuts are suppressed while a text input has focus, so typing a
//! layout name never deletes slots. `handle_key` reports whether the event
//! was consumed so the host can decide on default handling.

use super::DesignerSession;

/// Keys the designer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Delete,
    Backspace,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    A,
    C,
    V,
    Y,
    Z,
}

/// Modifier state for a key event. `command` covers both Ctrl and the
/// platform command key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub command: bool,
    pub shift: bool,
}

/// A keyboard event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// True while a text input (layout name field) has focus.
    pub in_text_input: bool,
}

impl DesignerSession {
    /// Dispatches a keyboard event. Returns true when consumed.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        if event.in_text_input {
            return false;
        }

        let step = if event.modifiers.shift {
            self.config.fast_nudge_step_px
        } else {
            self.config.nudge_step_px
        };

        match (event.key, event.modifiers.command) {
            (Key::Delete | Key::Backspace, _) => {
                if self.selection.is_empty() {
                    return false;
                }
                self.remove_selected();
                true
            }
            (Key::Z, true) => {
                if event.modifiers.shift {
                    self.redo();
                } else {
                    self.undo();
                }
                true
            }
            (Key::Y, true) => {
                self.redo();
                true
            }
            (Key::A, true) => {
                self.select_all();
                true
            }
            (Key::C, true) => {
                if self.selection.is_empty() {
                    return false;
                }
                self.copy_selected();
                true
            }
            (Key::V, true) => {
                self.paste_clipboard();
                true
            }
            (Key::ArrowLeft, false) => {
                self.nudge_selected(-step, 0.0);
                true
            }
            (Key::ArrowRight, false) => {
                self.nudge_selected(step, 0.0);
                true
            }
            (Key::ArrowUp, false) => {
                self.nudge_selected(0.0, -step);
                true
            }
            (Key::ArrowDown, false) => {
                self.nudge_selected(0.0, step);
                true
            }
            _ => false,
        }
    }
}
