//! Error handling for Boothkit
//!
//! Provides error types for the two fallible surfaces of the designer core:
//! - Export errors (merge preconditions)
//! - Persistence errors (saved-layout store, config files)
//!
//! Interactive editing operations never raise: invalid geometry is clamped
//! and unsatisfied preconditions degrade to no-ops, per the designer's
//! "losing work is the one unacceptable failure" rule.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;
use uuid::Uuid;

use crate::TemplateSlot;

/// Export error type
///
/// Raised when an explicit export confirmation cannot proceed. The designer
/// model is never modified by a rejected export.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// A merged export was requested but a template has no source image
    #[error("template {0} has no source image; a merged export needs both")]
    MissingSourceImage(TemplateSlot),

    /// No template is flagged for export
    #[error("no template is flagged for export")]
    NothingToExport,
}

/// Persistence error type
///
/// Covers the saved-layout store and configuration files. Corrupt data read
/// back from disk is reported here by the store implementation; callers are
/// expected to log it and continue with an empty store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data did not parse
    #[error("malformed stored data: {0}")]
    Malformed(String),

    /// No saved layout with the given id
    #[error("saved layout {0} not found")]
    NotFound(Uuid),
}

/// Top-level error type for Boothkit operations
#[derive(Error, Debug)]
pub enum Error {
    /// Export precondition failure
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Persistence layer failure
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Convenient result type used throughout Boothkit
pub type Result<T> = std::result::Result<T, Error>;
