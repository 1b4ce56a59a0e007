//! # Boothkit Core
//!
//! Core types, traits, and utilities for Boothkit.
//! Provides the fundamental abstractions shared by the layout designer and
//! the settings/persistence layer: the placeholder data model, normalized
//! geometry helpers, the error taxonomy, and the saved-layout store port.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod placeholder;

pub use config::DesignerConfig;
pub use error::{Error, ExportError, PersistenceError, Result};
pub use geometry::{BoundingBox, CanvasSize};
pub use layout::{LayoutStore, MemoryLayoutStore, SavedLayout};
pub use placeholder::{AspectRatio, FitMode, Placeholder};

/// Identifies one of the two templates edited in a designer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSlot {
    A,
    B,
}

impl TemplateSlot {
    /// Index into per-slot arrays.
    pub fn index(self) -> usize {
        match self {
            TemplateSlot::A => 0,
            TemplateSlot::B => 1,
        }
    }
}

impl std::fmt::Display for TemplateSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSlot::A => write!(f, "A"),
            TemplateSlot::B => write!(f, "B"),
        }
    }
}
