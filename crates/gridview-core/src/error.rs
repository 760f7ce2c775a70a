//! Unified error types for the gridview crates
//!
//! [`GridError`] covers the three failure classes of the grid state layer:
//! - an external id that the index layer cannot resolve
//! - a reference to an element that does not exist in its map
//! - an import document or scenario that violates its contract
//!
//! Read paths return these errors instead of substituting sentinel values; the
//! UI layer picks its own display fallback.

use std::fmt;

use thiserror::Error;

/// The kind of grid element an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Entity,
    Fuse,
    Cable,
    Meter,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Entity => write!(f, "entity"),
            ElementKind::Fuse => write!(f, "fuse"),
            ElementKind::Cable => write!(f, "cable"),
            ElementKind::Meter => write!(f, "meter"),
        }
    }
}

/// Unified error type for grid model operations.
#[derive(Error, Debug)]
pub enum GridError {
    /// The id is not registered in the index layer.
    #[error("unresolved {kind} id {id}")]
    UnresolvedId { kind: ElementKind, id: usize },

    /// A referenced element does not exist in its map.
    #[error("missing {kind} {id}")]
    MissingReference { kind: ElementKind, id: usize },

    /// An element with the same id is already registered.
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: ElementKind, id: usize },

    /// The import document violates the grid JSON contract.
    #[error("Malformed import: {0}")]
    MalformedImport(String),

    /// The scenario cannot be turned into a synthetic grid.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    pub fn unresolved(kind: ElementKind, id: usize) -> Self {
        GridError::UnresolvedId { kind, id }
    }

    pub fn missing(kind: ElementKind, id: usize) -> Self {
        GridError::MissingReference { kind, id }
    }

    /// True for the "not found" family (unresolved id or missing reference).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GridError::UnresolvedId { .. } | GridError::MissingReference { .. }
        )
    }
}

/// Convenience type alias for Results using GridError.
pub type GridResult<T> = Result<T, GridError>;

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Parse(err.to_string())
    }
}
