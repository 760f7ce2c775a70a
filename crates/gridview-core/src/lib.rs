//! # gridview-core: Distribution Grid Model
//!
//! Plain data structures describing a low-voltage distribution network as seen
//! by the gridview front-end.
//!
//! ## Design
//!
//! The [`Grid`] is an arena: every element lives in exactly one id-keyed map and
//! references other elements by id only.
//! - **Entities** (substations, cabinets, ...) own the ids of their fuses
//! - **Cables** reference exactly two fuses, one per end, plus attached meters
//! - **Fuses** and **Meters** are registered once in their global maps
//!
//! Time-varying measurements (fuse state, confidence, loads, consumption) are not
//! stored on the elements themselves. They live in dense arrays owned by the UI
//! state store and are addressed through an [`IdIndex`].
//!
//! ## Quick Start
//!
//! ```rust
//! use gridview_core::*;
//!
//! let mut grid = Grid::new();
//! grid.fuses.insert(FuseId::new(0), Fuse::new(FuseId::new(0)));
//! grid.fuses.insert(FuseId::new(1), Fuse::new(FuseId::new(1)));
//! grid.cables.insert(
//!     CableId::new(0),
//!     Cable::new(CableId::new(0), FuseId::new(0), FuseId::new(1)),
//! );
//! assert_eq!(grid.cables.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Elements, measurement value types and the [`Grid`] aggregate
//! - [`index`] - External id to dense offset translation
//! - [`graph_utils`] - Topological analysis (energized islands)
//! - [`error`] - Unified error type

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod error;
pub mod graph_utils;
pub mod index;
pub mod model;

pub use error::{ElementKind, GridError, GridResult};
pub use graph_utils::{find_islands, IslandAnalysis, IslandSummary};
pub use index::{AddressingMode, ExternalId, IdIndex};
pub use model::{
    opposite_state, Cable, ConfidenceLevel, Entity, EntityType, Fuse, GeoLocation, Grid, Meter,
    State, ULoad,
};

// Newtype wrappers for IDs for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuseId(usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CableId(usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeterId(usize);

impl EntityId {
    #[inline]
    pub fn new(value: usize) -> Self {
        EntityId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl FuseId {
    #[inline]
    pub fn new(value: usize) -> Self {
        FuseId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl CableId {
    #[inline]
    pub fn new(value: usize) -> Self {
        CableId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl MeterId {
    #[inline]
    pub fn new(value: usize) -> Self {
        MeterId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FuseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MeterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
