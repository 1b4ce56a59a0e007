//! File-backed saved-layout store.
//!
//! One JSON file holds every saved layout. The file is read once at open
//! and rewritten wholesale on each mutation; layouts are small (a name plus
//! a handful of rectangles), so atomicity beats cleverness here. A corrupt
//! file is logged and treated as empty — saving over it is the recovery
//! path.

use std::path::{Path, PathBuf};

use boothkit_core::{LayoutStore, PersistenceError, Placeholder, Result, SavedLayout};
use uuid::Uuid;

const LAYOUTS_FILE: &str = "layouts.json";

/// Platform layouts file location, e.g. `~/.config/boothkit/layouts.json`.
pub fn default_layouts_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("boothkit").join(LAYOUTS_FILE))
}

/// [`LayoutStore`] persisted to a JSON file.
#[derive(Debug)]
pub struct FileLayoutStore {
    path: PathBuf,
    layouts: Vec<SavedLayout>,
}

impl FileLayoutStore {
    /// Opens the store at `path`, reading any existing layouts. A missing
    /// file is an empty store; a malformed one is logged and ignored.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let layouts = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<SavedLayout>>(&content) {
                Ok(layouts) => layouts,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "ignoring malformed layouts file"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(PersistenceError::Io(e).into()),
        };
        Ok(Self { path, layouts })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(PersistenceError::Io)?;
        }
        let content = serde_json::to_string_pretty(&self.layouts)
            .map_err(|e| PersistenceError::Malformed(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(PersistenceError::Io)?;
        Ok(())
    }
}

impl LayoutStore for FileLayoutStore {
    fn save(&mut self, name: &str, placeholders: &[Placeholder]) -> Result<SavedLayout> {
        let layout = SavedLayout::new(name, placeholders);
        self.layouts.push(layout.clone());
        self.persist()?;
        tracing::info!(name, id = %layout.id, "saved layout");
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
        self.persist()?;
        Ok(())
    }
}
