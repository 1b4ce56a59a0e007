//! Linear, branch-discarding undo/redo over template-pair snapshots.
//!
//! The history is an append-only vector of immutable snapshots plus a
//! cursor that is always a valid index. Recording after an undo truncates
//! everything past the cursor; no redo branches survive a new edit. A fresh
//! session starts with one entry (the empty state) so the first undo is a
//! no-op.

use boothkit_core::Placeholder;
use serde::{Deserialize, Serialize};

/// Immutable copy of both templates' placeholder sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub a: Vec<Placeholder>,
    pub b: Vec<Placeholder>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            a: Vec::new(),
            b: Vec::new(),
        }
    }
}

/// Snapshot history with a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
}

impl History {
    /// Starts the history with `initial` as its only entry.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    /// Records a snapshot, discarding any redo branch.
    ///
    /// Returns `false` (and records nothing) when the snapshot equals the
    /// current entry: redundant edits must not pollute the timeline.
    pub fn record(&mut self, snapshot: Snapshot) -> bool {
        if snapshot == *self.current() {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor += 1;
        true
    }

    /// Steps back one entry, returning the snapshot to restore.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Steps forward one entry, returning the snapshot to restore.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Snapshot::empty())
    }
}
