//! Event types for reactive UI updates.

use gridview_core::{CableId, EntityId, FuseId, MeterId, State};

/// Events emitted by the grid state store after each successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// The whole grid was replaced.
    GridReplaced {
        source: GridSource,
        n_fuses: usize,
        n_cables: usize,
        n_meters: usize,
        n_entities: usize,
    },

    /// An entity was added.
    EntityAdded { id: EntityId },

    /// A cable and its two fuses were added.
    CableAdded {
        id: CableId,
        fuses: [FuseId; 2],
    },

    /// A meter was added.
    MeterAdded { id: MeterId },

    /// A meter was attached to a cable.
    MeterConnected { meter: MeterId, cable: CableId },

    /// A meter reported a new consumption value.
    ConsumptionUpdated { id: MeterId, value: f64 },

    /// The confidence of a fuse status changed.
    ConfidenceUpdated { id: FuseId, level: f64 },

    /// A fuse was opened or closed.
    FuseSwitched { id: FuseId, state: State },

    /// New load estimates arrived for a fuse.
    FuseLoadsUpdated { id: FuseId, count: usize },

    /// New load estimates arrived for a cable.
    CableLoadsUpdated { id: CableId, count: usize },
}

/// How a replacement grid was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSource {
    Empty,
    Scenario,
    Json,
}

impl std::fmt::Display for GridSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridSource::Empty => write!(f, "empty"),
            GridSource::Scenario => write!(f, "scenario"),
            GridSource::Json => write!(f, "json"),
        }
    }
}
