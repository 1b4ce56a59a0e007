//! Saved layouts and the persistence port.
//!
//! A saved layout is a named snapshot of one template's placeholder
//! sequence, independent of any frame image. The designer talks to storage
//! only through the [`LayoutStore`] trait; file-backed implementations live
//! in `boothkit-settings`, and [`MemoryLayoutStore`] backs tests and
//! embedded hosts that bring their own persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PersistenceError, Result};
use crate::placeholder::Placeholder;

/// A persisted, named placeholder arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLayout {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub placeholders: Vec<Placeholder>,
}

impl SavedLayout {
    /// Builds a new record with a fresh id and the current timestamp.
    /// The placeholder sequence is deep-copied; later edits to the source
    /// template never reach the record.
    pub fn new(name: &str, placeholders: &[Placeholder]) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            placeholders: placeholders.to_vec(),
        }
    }
}

/// Keyed store for saved layouts.
///
/// Duplicate names are allowed; records are identified by id only. `list`
/// returns newest-first.
pub trait LayoutStore {
    /// Persists a copy of `placeholders` under `name`.
    fn save(&mut self, name: &str, placeholders: &[Placeholder]) -> Result<SavedLayout>;

    /// All stored layouts, newest first.
    fn list(&self) -> Result<Vec<SavedLayout>>;

    /// Removes the layout with the given id.
    fn delete(&mut self, id: &Uuid) -> Result<()>;
}

/// In-memory [`LayoutStore`]. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutStore {
    layouts: Vec<SavedLayout>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn save(&mut self, name: &str, placeholders: &[Placeholder]) -> Result<SavedLayout> {
        let layout = SavedLayout::new(name, placeholders);
        self.layouts.push(layout.clone());
        Ok(layout)
    }

    fn list(&self) -> Result<Vec<SavedLayout>> {
        let mut layouts = self.layouts.clone();
        layouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(layouts)
    }

    fn delete(&mut self, id: &Uuid) -> Result<()> {
        let before = self.layouts.len();
        self.layouts.retain(|l| l.id != *id);
        if self.layouts.len() == before {
            return Err(PersistenceError::NotFound(*id).into());
        }
        Ok(())
    }
}
