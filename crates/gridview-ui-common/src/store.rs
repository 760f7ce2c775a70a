//! Grid state store.
//!
//! The [`GridState`] owns the live [`GridData`] snapshot: the grid topology, the
//! id to offset maps, and the per-element measurement series. UI actions call
//! its mutation methods; UI bindings read through its getters. Every successful
//! mutation broadcasts a [`GridEvent`] so views can refresh.
//!
//! Getters never substitute sentinel values. An id that cannot be resolved is
//! reported as an error; [`crate::view::GridView`] turns those errors into the
//! display fallbacks the front-end renders.

use gridview_core::{
    opposite_state, AddressingMode, Cable, CableId, ConfidenceLevel, ElementKind, Entity, EntityId,
    EntityType, Fuse, FuseId, Grid, GridError, GridResult, Meter, MeterId, State, ULoad,
};
use gridview_io::{grid_to_json, json_to_grid, parse_grid_json, to_pretty_string, GridData, GridJson};
use gridview_scenarios::Scenario;
use tokio::sync::broadcast;
use tracing::debug;

use crate::events::{GridEvent, GridSource};

/// Default capacity of the change event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// The live grid plus its measurement series.
pub struct GridState {
    data: GridData,

    /// How the ids of the current grid were assigned.
    mode: AddressingMode,

    /// Event broadcaster for state changes.
    events_tx: broadcast::Sender<GridEvent>,
}

impl GridState {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create an empty store whose event channel buffers `capacity` events per
    /// subscriber.
    pub fn with_event_capacity(capacity: usize) -> Self {
        let (events_tx, _) = broadcast::channel(capacity.max(1));
        Self {
            data: GridData::new(),
            mode: AddressingMode::Indexed,
            events_tx,
        }
    }

    /// Subscribe to grid events.
    pub fn subscribe(&self) -> broadcast::Receiver<GridEvent> {
        self.events_tx.subscribe()
    }

    pub fn grid(&self) -> &Grid {
        &self.data.grid
    }

    /// The full snapshot (grid, index maps and series).
    pub fn data(&self) -> &GridData {
        &self.data
    }

    pub fn addressing_mode(&self) -> AddressingMode {
        self.mode
    }

    pub fn fuse_ids(&self) -> impl Iterator<Item = FuseId> + '_ {
        self.data.grid.fuses.keys().copied()
    }

    pub fn cable_ids(&self) -> impl Iterator<Item = CableId> + '_ {
        self.data.grid.cables.keys().copied()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────

    pub fn fuse_state(&self, id: FuseId) -> GridResult<State> {
        let offset = self.data.fuse_idx.resolve(id)?;
        slot(&self.data.fuses_state, offset, ElementKind::Fuse, id.value()).copied()
    }

    pub fn fuse_is_closed(&self, id: FuseId) -> GridResult<bool> {
        Ok(self.fuse_state(id)? == State::Closed)
    }

    pub fn fuse_uloads(&self, id: FuseId) -> GridResult<&[ULoad]> {
        let offset = self.data.fuse_idx.resolve(id)?;
        slot(&self.data.fuses_uloads, offset, ElementKind::Fuse, id.value()).map(Vec::as_slice)
    }

    pub fn cable_uloads(&self, id: CableId) -> GridResult<&[ULoad]> {
        let offset = self.data.cable_idx.resolve(id)?;
        slot(&self.data.cables_uloads, offset, ElementKind::Cable, id.value()).map(Vec::as_slice)
    }

    /// Confidence of the fuse status, resolved through the fuse index.
    pub fn fuse_conf(&self, id: FuseId) -> GridResult<ConfidenceLevel> {
        let offset = self.data.fuse_idx.resolve(id)?;
        slot(&self.data.fuses_conf, offset, ElementKind::Fuse, id.value()).copied()
    }

    pub fn fuse_conf_level(&self, id: FuseId) -> GridResult<f64> {
        Ok(self.fuse_conf(id)?.level)
    }

    pub fn fuse_conf_level_str(&self, id: FuseId) -> GridResult<String> {
        Ok(self.fuse_conf(id)?.pretty_conf())
    }

    pub fn meter_cons(&self, id: MeterId) -> GridResult<f64> {
        let offset = self.data.meter_idx.resolve(id)?;
        slot(&self.data.meters_cons, offset, ElementKind::Meter, id.value()).copied()
    }

    pub fn meter_name(&self, id: MeterId) -> GridResult<&str> {
        self.data
            .grid
            .meters
            .get(&id)
            .map(|meter| meter.name.as_str())
            .ok_or_else(|| GridError::missing(ElementKind::Meter, id.value()))
    }

    /// Meters attached to a cable, in connection order.
    pub fn meters(&self, cable_id: CableId) -> GridResult<Vec<&Meter>> {
        let cable = self.cable(cable_id)?;
        cable
            .meters
            .iter()
            .map(|id| {
                self.data
                    .grid
                    .meters
                    .get(id)
                    .ok_or_else(|| GridError::missing(ElementKind::Meter, id.value()))
            })
            .collect()
    }

    /// Export document for the current grid.
    pub fn export_json(&self) -> GridResult<GridJson> {
        grid_to_json(&self.data)
    }

    /// The current grid as a pretty-printed JSON document.
    pub fn grid_json(&self) -> GridResult<String> {
        to_pretty_string(&self.export_json()?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Whole-grid initializers
    // ─────────────────────────────────────────────────────────────────────

    /// Discard the current grid and start from an empty one.
    pub fn init_empty(&mut self) {
        self.replace(GridData::new(), AddressingMode::Indexed, GridSource::Empty);
    }

    /// Replace the grid with a synthetic one sized by the scenario.
    ///
    /// `N` fuses are paired consecutively into `N / 2` cables, each carrying one
    /// meter. Fuse, cable and meter ids are dense, so the index maps are
    /// identities.
    pub fn init_from_scenario(&mut self, scenario: &Scenario) -> GridResult<()> {
        let n_fuses = scenario.fuse_count()?;
        let mut data = GridData::new();

        for i in 0..n_fuses {
            data.register_fuse(
                Fuse::new(FuseId::new(i)),
                State::Closed,
                ConfidenceLevel::unknown(),
                Vec::new(),
            )?;
        }

        for i in 0..n_fuses / 2 {
            let meter = MeterId::new(i);
            data.register_meter(Meter::new(meter), 0.0)?;

            let mut cable = Cable::new(CableId::new(i), FuseId::new(i * 2), FuseId::new(i * 2 + 1));
            cable.meters.push(meter);
            data.register_cable(cable, Vec::new())?;
        }

        debug!(scenario = %scenario.scenario_id, n_fuses, "grid generated from scenario");
        self.replace(data, AddressingMode::Identity, GridSource::Scenario);
        Ok(())
    }

    /// Replace the grid with the one described by an import document.
    ///
    /// The current grid is kept untouched if the document is rejected.
    pub fn init_from_json(&mut self, json: &GridJson) -> GridResult<()> {
        let data = json_to_grid(json)?;
        self.replace(data, AddressingMode::Indexed, GridSource::Json);
        Ok(())
    }

    /// Parse then adopt a JSON document.
    pub fn init_from_json_str(&mut self, input: &str) -> GridResult<()> {
        let json = parse_grid_json(input)?;
        self.init_from_json(&json)
    }

    fn replace(&mut self, data: GridData, mode: AddressingMode, source: GridSource) {
        self.data = data;
        self.mode = mode;
        let grid = &self.data.grid;
        let _ = self.events_tx.send(GridEvent::GridReplaced {
            source,
            n_fuses: grid.fuses.len(),
            n_cables: grid.cables.len(),
            n_meters: grid.meters.len(),
            n_entities: grid.entities.len(),
        });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Topology edits
    // ─────────────────────────────────────────────────────────────────────

    /// Add an entity with a generated name and no fuses.
    pub fn add_entity(&mut self, id: EntityId, entity_type: EntityType) -> GridResult<()> {
        self.data.register_entity(Entity::new(id, entity_type))?;
        debug!(entity = %id, %entity_type, "entity added");
        let _ = self.events_tx.send(GridEvent::EntityAdded { id });
        Ok(())
    }

    /// Add a cable between two existing entities.
    ///
    /// Two new closed fuses are allocated with ids continuing from the current
    /// fuse count; the first is mounted in `entity1`, the second in `entity2`.
    pub fn add_cable(
        &mut self,
        id: CableId,
        entity1: EntityId,
        entity2: EntityId,
    ) -> GridResult<[FuseId; 2]> {
        for entity in [entity1, entity2] {
            if !self.data.grid.entities.contains_key(&entity) {
                return Err(GridError::missing(ElementKind::Entity, entity.value()));
            }
        }
        if self.data.grid.cables.contains_key(&id) {
            return Err(GridError::DuplicateId {
                kind: ElementKind::Cable,
                id: id.value(),
            });
        }

        let fuse1 = self.new_fuse()?;
        let fuse2 = self.new_fuse()?;
        self.data.register_cable(Cable::new(id, fuse1, fuse2), Vec::new())?;

        for (entity, fuse) in [(entity1, fuse1), (entity2, fuse2)] {
            if let Some(entity) = self.data.grid.entities.get_mut(&entity) {
                entity.fuses.push(fuse);
            }
        }
        self.refresh_mode();

        debug!(cable = %id, %fuse1, %fuse2, "cable added");
        let _ = self.events_tx.send(GridEvent::CableAdded {
            id,
            fuses: [fuse1, fuse2],
        });
        Ok([fuse1, fuse2])
    }

    fn new_fuse(&mut self) -> GridResult<FuseId> {
        let id = self.data.next_fuse_id();
        self.data.register_fuse(
            Fuse::new(id),
            State::Closed,
            ConfidenceLevel::unknown(),
            Vec::new(),
        )?;
        Ok(id)
    }

    /// Add a meter with zero consumption, not yet attached to a cable.
    pub fn add_meter(&mut self, id: MeterId) -> GridResult<()> {
        self.data.register_meter(Meter::new(id), 0.0)?;
        self.refresh_mode();
        debug!(meter = %id, "meter added");
        let _ = self.events_tx.send(GridEvent::MeterAdded { id });
        Ok(())
    }

    /// Attach a meter to a cable, detaching it from any cable it was on.
    pub fn connect_meter_to_cable(&mut self, meter: MeterId, cable: CableId) -> GridResult<()> {
        if !self.data.grid.meters.contains_key(&meter) {
            return Err(GridError::missing(ElementKind::Meter, meter.value()));
        }
        if !self.data.grid.cables.contains_key(&cable) {
            return Err(GridError::missing(ElementKind::Cable, cable.value()));
        }

        for other in self.data.grid.cables.values_mut() {
            other.meters.retain(|m| *m != meter);
        }
        if let Some(target) = self.data.grid.cables.get_mut(&cable) {
            target.meters.push(meter);
        }

        debug!(%meter, %cable, "meter connected");
        let _ = self
            .events_tx
            .send(GridEvent::MeterConnected { meter, cable });
        Ok(())
    }

    fn cable(&self, id: CableId) -> GridResult<&Cable> {
        self.data
            .grid
            .cables
            .get(&id)
            .ok_or_else(|| GridError::missing(ElementKind::Cable, id.value()))
    }

    fn refresh_mode(&mut self) {
        if self.mode == AddressingMode::Identity
            && !(self.data.fuse_idx.is_identity()
                && self.data.meter_idx.is_identity()
                && self.data.cable_idx.is_identity())
        {
            self.mode = AddressingMode::Indexed;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Live measurement updates
    // ─────────────────────────────────────────────────────────────────────

    pub fn update_consumption(&mut self, id: MeterId, value: f64) -> GridResult<()> {
        let offset = self.data.meter_idx.resolve(id)?;
        *slot_mut(&mut self.data.meters_cons, offset, ElementKind::Meter, id.value())? = value;
        let _ = self
            .events_tx
            .send(GridEvent::ConsumptionUpdated { id, value });
        Ok(())
    }

    pub fn update_state_conf(&mut self, id: FuseId, level: f64) -> GridResult<()> {
        let offset = self.data.fuse_idx.resolve(id)?;
        *slot_mut(&mut self.data.fuses_conf, offset, ElementKind::Fuse, id.value())? =
            ConfidenceLevel::new(level);
        let _ = self
            .events_tx
            .send(GridEvent::ConfidenceUpdated { id, level });
        Ok(())
    }

    /// Toggle a fuse and return its new state.
    pub fn switch_fuse(&mut self, id: FuseId) -> GridResult<State> {
        let offset = self.data.fuse_idx.resolve(id)?;
        let state = slot_mut(&mut self.data.fuses_state, offset, ElementKind::Fuse, id.value())?;
        *state = opposite_state(*state);
        let state = *state;
        debug!(fuse = %id, %state, "fuse switched");
        let _ = self.events_tx.send(GridEvent::FuseSwitched { id, state });
        Ok(state)
    }

    pub fn update_fuse_loads(&mut self, id: FuseId, loads: Vec<ULoad>) -> GridResult<()> {
        let offset = self.data.fuse_idx.resolve(id)?;
        let count = loads.len();
        *slot_mut(&mut self.data.fuses_uloads, offset, ElementKind::Fuse, id.value())? = loads;
        let _ = self
            .events_tx
            .send(GridEvent::FuseLoadsUpdated { id, count });
        Ok(())
    }

    pub fn update_cable_loads(&mut self, id: CableId, loads: Vec<ULoad>) -> GridResult<()> {
        let offset = self.data.cable_idx.resolve(id)?;
        let count = loads.len();
        *slot_mut(&mut self.data.cables_uloads, offset, ElementKind::Cable, id.value())? = loads;
        let _ = self
            .events_tx
            .send(GridEvent::CableLoadsUpdated { id, count });
        Ok(())
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}

fn slot<T>(series: &[T], offset: usize, kind: ElementKind, id: usize) -> GridResult<&T> {
    series
        .get(offset)
        .ok_or_else(|| GridError::missing(kind, id))
}

fn slot_mut<T>(series: &mut [T], offset: usize, kind: ElementKind, id: usize) -> GridResult<&mut T> {
    series
        .get_mut(offset)
        .ok_or_else(|| GridError::missing(kind, id))
}
