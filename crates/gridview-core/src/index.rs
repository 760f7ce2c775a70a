//! External id to dense offset translation.
//!
//! Per-element time series (consumption, fuse state, confidence, loads) are kept
//! in flat arrays. An [`IdIndex`] maps the externally visible id of an element
//! to its slot in those arrays. Every lookup goes through the map, even for
//! synthetic grids where ids are already dense; those simply carry an identity
//! map.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{ElementKind, GridError, GridResult};
use crate::{CableId, EntityId, FuseId, MeterId};

/// Typed ids that can be addressed through an [`IdIndex`].
pub trait ExternalId: Copy + Eq + Hash {
    const KIND: ElementKind;

    fn from_raw(value: usize) -> Self;
    fn raw(&self) -> usize;
}

impl ExternalId for EntityId {
    const KIND: ElementKind = ElementKind::Entity;

    fn from_raw(value: usize) -> Self {
        EntityId::new(value)
    }
    fn raw(&self) -> usize {
        self.value()
    }
}

impl ExternalId for FuseId {
    const KIND: ElementKind = ElementKind::Fuse;

    fn from_raw(value: usize) -> Self {
        FuseId::new(value)
    }
    fn raw(&self) -> usize {
        self.value()
    }
}

impl ExternalId for CableId {
    const KIND: ElementKind = ElementKind::Cable;

    fn from_raw(value: usize) -> Self {
        CableId::new(value)
    }
    fn raw(&self) -> usize {
        self.value()
    }
}

impl ExternalId for MeterId {
    const KIND: ElementKind = ElementKind::Meter;

    fn from_raw(value: usize) -> Self {
        MeterId::new(value)
    }
    fn raw(&self) -> usize {
        self.value()
    }
}

/// How the ids of the current grid were assigned.
///
/// Purely informational: lookups behave the same in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressingMode {
    /// Ids are dense and sequential; every offset equals its id.
    Identity,
    /// Ids are arbitrary and translated through the map.
    #[default]
    Indexed,
}

/// Map from an external id to a dense array offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdIndex<K: ExternalId> {
    offsets: HashMap<K, usize>,
}

impl<K: ExternalId> Default for IdIndex<K> {
    fn default() -> Self {
        Self {
            offsets: HashMap::new(),
        }
    }
}

impl<K: ExternalId> IdIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity map for ids `0..len`.
    pub fn identity(len: usize) -> Self {
        let offsets = (0..len).map(|i| (K::from_raw(i), i)).collect();
        Self { offsets }
    }

    /// Register `id` at `offset`. Fails if the id is already registered.
    pub fn insert(&mut self, id: K, offset: usize) -> GridResult<()> {
        if self.offsets.contains_key(&id) {
            return Err(GridError::DuplicateId {
                kind: K::KIND,
                id: id.raw(),
            });
        }
        self.offsets.insert(id, offset);
        Ok(())
    }

    pub fn get(&self, id: K) -> Option<usize> {
        self.offsets.get(&id).copied()
    }

    /// Resolve `id` to its offset, or fail with [`GridError::UnresolvedId`].
    pub fn resolve(&self, id: K) -> GridResult<usize> {
        self.get(id)
            .ok_or_else(|| GridError::unresolved(K::KIND, id.raw()))
    }

    pub fn contains(&self, id: K) -> bool {
        self.offsets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// True when every registered id maps to itself.
    pub fn is_identity(&self) -> bool {
        self.offsets.iter().all(|(id, offset)| id.raw() == *offset)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.offsets.iter().map(|(id, offset)| (*id, *offset))
    }
}
