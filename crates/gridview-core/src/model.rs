//! Grid elements and measurement value types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CableId, EntityId, FuseId, MeterId};

/// Switching state of a fuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    Open,
    #[default]
    Closed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Open => write!(f, "OPEN"),
            State::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Toggle between [`State::Open`] and [`State::Closed`].
pub fn opposite_state(state: State) -> State {
    match state {
        State::Open => State::Closed,
        State::Closed => State::Open,
    }
}

/// Confidence score attached to an estimated value.
///
/// Scores are fractions in `[0, 1]`. A negative score means "unknown", which is
/// also the default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceLevel {
    pub level: f64,
}

impl ConfidenceLevel {
    pub const UNKNOWN: f64 = -1.0;

    pub fn new(level: f64) -> Self {
        Self { level }
    }

    pub fn unknown() -> Self {
        Self {
            level: Self::UNKNOWN,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.level < 0.0
    }

    /// Percentage string without the `%` sign; `"-1"` when unknown.
    pub fn pretty_conf(&self) -> String {
        if self.is_unknown() {
            return "-1".to_string();
        }
        format!("{:.0}", self.level * 100.0)
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::unknown()
    }
}

/// An uncertain load: magnitude plus the confidence of the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ULoad {
    pub load: f64,
    pub confidence: ConfidenceLevel,
}

impl ULoad {
    pub const DEFAULT_PRECISION: usize = 2;

    pub fn new(load: f64, confidence: f64) -> Self {
        Self {
            load,
            confidence: ConfidenceLevel::new(confidence),
        }
    }

    pub fn pretty_load(&self) -> String {
        self.pretty_load_with(Self::DEFAULT_PRECISION)
    }

    pub fn pretty_load_with(&self, precision: usize) -> String {
        format!("{:.*}", precision, self.load)
    }

    pub fn pretty_conf(&self) -> String {
        self.confidence.pretty_conf()
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub long: f64,
}

/// Topological node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Substation,
    Transformer,
    Cabinet,
    ConsumerSite,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Substation => write!(f, "substation"),
            EntityType::Transformer => write!(f, "transformer"),
            EntityType::Cabinet => write!(f, "cabinet"),
            EntityType::ConsumerSite => write!(f, "consumer-site"),
        }
    }
}

/// A topological node owning one or more fuses.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: EntityType,
    pub name: String,
    /// Fuses mounted in this entity, in insertion order.
    pub fuses: Vec<FuseId>,
    pub location: Option<GeoLocation>,
}

impl Entity {
    /// New entity with a generated display name and no fuses.
    pub fn new(id: EntityId, entity_type: EntityType) -> Self {
        Self {
            id,
            entity_type,
            name: format!("{entity_type} {id}"),
            fuses: Vec::new(),
            location: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fuse {
    pub id: FuseId,
    pub name: String,
}

impl Fuse {
    pub fn new(id: FuseId) -> Self {
        Self {
            id,
            name: format!("Fuse {id}"),
        }
    }
}

/// Conductor segment between two fuses.
#[derive(Debug, Clone, PartialEq)]
pub struct Cable {
    pub id: CableId,
    pub name: String,
    pub fuse1: FuseId,
    pub fuse2: FuseId,
    pub meters: Vec<MeterId>,
}

impl Cable {
    pub fn new(id: CableId, fuse1: FuseId, fuse2: FuseId) -> Self {
        Self {
            id,
            name: format!("Cable {id}"),
            fuse1,
            fuse2,
            meters: Vec::new(),
        }
    }

    pub fn fuses(&self) -> [FuseId; 2] {
        [self.fuse1, self.fuse2]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meter {
    pub id: MeterId,
    pub name: String,
    pub location: Option<GeoLocation>,
}

impl Meter {
    pub fn new(id: MeterId) -> Self {
        Self {
            id,
            name: format!("Meter {id}"),
            location: None,
        }
    }
}

/// Aggregate root: every element of the network, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub cables: BTreeMap<CableId, Cable>,
    pub fuses: BTreeMap<FuseId, Fuse>,
    pub meters: BTreeMap<MeterId, Meter>,
    pub entities: BTreeMap<EntityId, Entity>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cables.is_empty()
            && self.fuses.is_empty()
            && self.meters.is_empty()
            && self.entities.is_empty()
    }

    /// Entity owning the given fuse, if any.
    pub fn fuse_owner(&self, fuse: FuseId) -> Option<&Entity> {
        self.entities
            .values()
            .find(|entity| entity.fuses.contains(&fuse))
    }
}
